//! Run report written under `out/` after a batch completes.
//!
//! The report is the machine-readable record of everything the banners show:
//! per-job outcomes, missing inputs, tool exit codes, unknown job lines.
//! Exit codes are recorded here but never acted on.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Summary of one batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub total_elapsed_secs: f64,
    pub jobs: Vec<JobRecord>,
    pub unknown_lines: Vec<UnknownLine>,
}

/// Job-list line with a field count other than two, skipped by the loader.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UnknownLine {
    /// 1-based line number in the job-list file.
    pub line_number: usize,
    /// Trimmed comma-separated tokens of the offending line.
    pub tokens: Vec<String>,
}

/// Outcome of one job.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Job ran through staging, tool invocation and filing.
    Completed,
    /// `data/<dir>` was not a directory; the job was skipped.
    MissingDataDir,
}

/// Exit codes of the convert/run pair for one staged file.
///
/// `None` means the child was killed by a signal.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ToolInvocation {
    pub file: String,
    pub convert_exit_code: Option<i32>,
    pub run_exit_code: Option<i32>,
}

/// Record of one job, whatever its outcome.
#[derive(Debug, Clone, Serialize)]
pub struct JobRecord {
    pub data_directory: String,
    pub phonon_file_name: String,
    pub status: JobStatus,
    pub staged: Vec<String>,
    pub missing_inputs: Vec<String>,
    pub invocations: Vec<ToolInvocation>,
    pub elapsed_secs: f64,
}

/// Write the report as pretty-printed JSON with a trailing newline.
pub fn write_report(path: &Path, report: &BatchReport) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create report dir {}", parent.display()))?;
    }
    let mut buf = serde_json::to_string_pretty(report).context("serialize report")?;
    buf.push('\n');
    fs::write(path, buf).with_context(|| format!("write report {}", path.display()))?;
    Ok(())
}
