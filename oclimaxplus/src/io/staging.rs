//! Working-directory staging: quarantine of stale artifacts and copying of
//! per-subdirectory phonon inputs.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::artifacts::is_tracked;

/// Move every tracked artifact left in the working directory into the
/// quarantine folder, creating it on first use.
///
/// Leftovers exist only when a prior run was interrupted mid-job; relocating
/// them guarantees the working directory starts the next job with none of
/// the tracked extensions present. Idempotent: a clean directory moves
/// nothing and does not create the quarantine folder.
///
/// Returns the relocated file names.
pub fn quarantine_stale(workdir: &Path, quarantine_dir: &Path) -> Result<Vec<String>> {
    let mut stale = Vec::new();
    for entry in fs::read_dir(workdir).with_context(|| format!("read {}", workdir.display()))? {
        let entry = entry.with_context(|| format!("read entry in {}", workdir.display()))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_tracked(&name) {
            stale.push((entry.path(), entry.file_name()));
        }
    }
    if stale.is_empty() {
        return Ok(Vec::new());
    }

    fs::create_dir_all(quarantine_dir)
        .with_context(|| format!("create quarantine {}", quarantine_dir.display()))?;

    let mut moved = Vec::with_capacity(stale.len());
    for (path, file_name) in stale {
        let target = quarantine_dir.join(&file_name);
        fs::rename(&path, &target)
            .with_context(|| format!("quarantine {}", path.display()))?;
        moved.push(file_name.to_string_lossy().into_owned());
    }
    debug!(count = moved.len(), "quarantined stale artifacts");
    Ok(moved)
}

/// Files staged and inputs missed while scanning one job's input folder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagingReport {
    /// Staged file names in the working directory (`<subdir>.phonon`).
    pub staged: Vec<String>,
    /// Missing inputs as `<subdir>/<phonon_file_name>`.
    pub missing: Vec<String>,
}

/// Copy `<sub>/<phonon_file_name>` into the working directory as
/// `<sub>.phonon` for every immediate subdirectory of `input_folder`.
///
/// Missing inputs are collected, not fatal; the job proceeds with whatever
/// was staged. Non-directory entries of the input folder are ignored.
pub fn stage_phonon_files(
    input_folder: &Path,
    phonon_file_name: &str,
    workdir: &Path,
) -> Result<StagingReport> {
    let mut report = StagingReport::default();
    for entry in
        fs::read_dir(input_folder).with_context(|| format!("read {}", input_folder.display()))?
    {
        let entry = entry.with_context(|| format!("read entry in {}", input_folder.display()))?;
        let file_type = entry
            .file_type()
            .with_context(|| format!("stat {}", entry.path().display()))?;
        if !file_type.is_dir() {
            continue;
        }
        let subdir = entry.file_name().to_string_lossy().into_owned();
        let source = entry.path().join(phonon_file_name);
        if !source.is_file() {
            report.missing.push(format!("{subdir}/{phonon_file_name}"));
            continue;
        }
        let staged_name = format!("{subdir}.phonon");
        fs::copy(&source, workdir.join(&staged_name))
            .with_context(|| format!("stage {}", source.display()))?;
        report.staged.push(staged_name);
    }
    debug!(
        staged = report.staged.len(),
        missing = report.missing.len(),
        "staging scan complete"
    );
    Ok(report)
}

/// List `.phonon` files currently in the working directory, in
/// directory-listing order.
pub fn staged_phonon_files(workdir: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(workdir).with_context(|| format!("read {}", workdir.display()))? {
        let entry = entry.with_context(|| format!("read entry in {}", workdir.display()))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".phonon") {
            files.push(name);
        }
    }
    Ok(files)
}
