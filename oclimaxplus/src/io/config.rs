//! Batch configuration stored in an optional `oclimaxplus.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Default config file name, resolved relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "oclimaxplus.toml";

/// Batch configuration (TOML).
///
/// This file is intended to be edited by humans and must remain stable and
/// automatable. Missing fields default to the conventional OCLIMAX layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BatchConfig {
    /// Job-list file name, relative to the working directory.
    pub jobs_file: String,

    /// Folder holding per-job input directories.
    pub data_dir: String,

    /// Folder receiving per-job OUT/TEMP output directories.
    pub out_dir: String,

    /// Quarantine folder for leftover artifacts of interrupted runs.
    pub quarantine_dir: String,

    /// Program invoked as `<convert_program> -c <file> -o <base>`.
    pub convert_program: String,

    /// Program invoked as `<run_program> <base>.oclimax <base>.params`.
    pub run_program: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            jobs_file: "OclimaxPlus_JOBS.txt".to_string(),
            data_dir: "data".to_string(),
            out_dir: "out".to_string(),
            quarantine_dir: "UNFINISHED_FILES".to_string(),
            convert_program: "./oclimax_convert.exe".to_string(),
            run_program: "./oclimax_run.exe".to_string(),
        }
    }
}

impl BatchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.jobs_file.trim().is_empty() {
            return Err(anyhow!("jobs_file must be non-empty"));
        }
        if self.data_dir.trim().is_empty() {
            return Err(anyhow!("data_dir must be non-empty"));
        }
        if self.out_dir.trim().is_empty() {
            return Err(anyhow!("out_dir must be non-empty"));
        }
        if self.quarantine_dir.trim().is_empty() {
            return Err(anyhow!("quarantine_dir must be non-empty"));
        }
        if self.convert_program.trim().is_empty() {
            return Err(anyhow!("convert_program must be non-empty"));
        }
        if self.run_program.trim().is_empty() {
            return Err(anyhow!("run_program must be non-empty"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `BatchConfig::default()`.
pub fn load_config(path: &Path) -> Result<BatchConfig> {
    if !path.exists() {
        let cfg = BatchConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: BatchConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &BatchConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
