//! Job-list file access and the first-run template.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Template written to the job-list path on first run.
pub const JOBS_TEMPLATE: &str = "\
# ----------------------------------------------------------------------------------------------
# OclimaxPlus batch job file
# Copyright (C) 2023  Pablo Gila-Herranz
# If you find this code useful, a citation would be awesome :D
# Gila-Herranz, Pablo. \u{201c}OclimaxPlus\u{201d}, 2023. https://github.com/pablogila/OclimaxPlus
# This is free software, and you are welcome to redistribute it under GNU General Public License
#
# Write here all the OclimaxPlus jobs that you want to execute, following this format:
# data_directory, phonon_files
# Note that the data_directory should be inside a folder called 'data'
#
# Example:
# data_pbe-d3, cc-2_PhonDOS.phonon
# ----------------------------------------------------------------------------------------------
";

/// Result of looking up the job-list file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobFileStatus {
    /// File was absent; the template was written and no jobs may run.
    Created,
    /// File existed; its full contents.
    Loaded(String),
}

/// Read the job-list file, creating it from the template when absent.
pub fn load_or_create(path: &Path) -> Result<JobFileStatus> {
    if !path.exists() {
        fs::write(path, JOBS_TEMPLATE)
            .with_context(|| format!("write job template {}", path.display()))?;
        return Ok(JobFileStatus::Created);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    Ok(JobFileStatus::Loaded(contents))
}
