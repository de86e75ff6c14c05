//! External OCLIMAX tool invocation.
//!
//! The [`ToolRunner`] trait decouples batch orchestration from the actual
//! tool binaries. Tests use a scripted runner that fabricates output
//! artifacts without spawning processes.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::config::BatchConfig;

/// Files that must exist in the working directory before any job runs.
pub const REQUIRED_FILES: [&str; 4] = [
    "oclimax.bat",
    "oclimax_convert.exe",
    "oclimax_run.exe",
    "oclimax_plot.exe",
];

/// Distribution name of `oclimax.bat` before the user renames it.
pub const RENAME_SOURCE: &str = "oclimax.win";

/// Where to obtain the OCLIMAX binaries.
pub const DOWNLOAD_URL: &str = "https://sites.google.com/site/ornliceman/download";

/// Result of checking for the required OCLIMAX files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrereqStatus {
    /// All four required files are present.
    Ok,
    /// The `.exe` files are present but `oclimax.bat` still carries its
    /// distribution name `oclimax.win`.
    NotRenamed,
    /// One or more required files are absent.
    Missing,
}

/// Check that the OCLIMAX binaries are present in the working directory.
pub fn check_prerequisites(workdir: &Path) -> PrereqStatus {
    if REQUIRED_FILES.iter().all(|f| workdir.join(f).is_file()) {
        return PrereqStatus::Ok;
    }
    let exes_present = REQUIRED_FILES[1..].iter().all(|f| workdir.join(f).is_file());
    if exes_present && workdir.join(RENAME_SOURCE).is_file() {
        PrereqStatus::NotRenamed
    } else {
        PrereqStatus::Missing
    }
}

/// Abstraction over the external convert/run tool pair.
///
/// Both invocations block until the child exits. Exit codes are returned for
/// the run report but never abort the batch.
pub trait ToolRunner {
    /// Invoke `convert -c <file_name> -o <base_name>` in `workdir`.
    ///
    /// Returns the exit code, or `None` when the child was killed by a
    /// signal.
    fn convert(&self, workdir: &Path, file_name: &str, base_name: &str) -> Result<Option<i32>>;

    /// Invoke `run <base_name>.oclimax <base_name>.params` in `workdir`.
    fn run(&self, workdir: &Path, base_name: &str) -> Result<Option<i32>>;
}

/// Tool runner that spawns the real OCLIMAX binaries.
///
/// Programs are invoked directly with an argument list; no shell is involved,
/// so file names with spaces or metacharacters are passed through verbatim.
pub struct OclimaxToolRunner {
    convert_program: String,
    run_program: String,
}

impl OclimaxToolRunner {
    pub fn from_config(config: &BatchConfig) -> Self {
        Self {
            convert_program: config.convert_program.clone(),
            run_program: config.run_program.clone(),
        }
    }
}

impl ToolRunner for OclimaxToolRunner {
    fn convert(&self, workdir: &Path, file_name: &str, base_name: &str) -> Result<Option<i32>> {
        debug!(file = file_name, "invoking convert");
        let status = Command::new(&self.convert_program)
            .arg("-c")
            .arg(file_name)
            .arg("-o")
            .arg(base_name)
            .current_dir(workdir)
            .status()
            .with_context(|| format!("spawn {}", self.convert_program))?;
        if !status.success() {
            warn!(file = file_name, exit_code = ?status.code(), "convert exited non-zero");
        }
        Ok(status.code())
    }

    fn run(&self, workdir: &Path, base_name: &str) -> Result<Option<i32>> {
        debug!(base = base_name, "invoking run");
        let status = Command::new(&self.run_program)
            .arg(format!("{base_name}.oclimax"))
            .arg(format!("{base_name}.params"))
            .current_dir(workdir)
            .status()
            .with_context(|| format!("spawn {}", self.run_program))?;
        if !status.success() {
            warn!(base = base_name, exit_code = ?status.code(), "run exited non-zero");
        }
        Ok(status.code())
    }
}
