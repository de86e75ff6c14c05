//! Canonical filesystem layout for a batch run.

use std::path::PathBuf;

use super::config::BatchConfig;

/// All canonical paths of a run, anchored at one working directory.
///
/// The working directory is the single staging area shared by every job, so
/// it is passed around explicitly as part of this handle rather than read
/// from the process environment.
#[derive(Debug, Clone)]
pub struct BatchPaths {
    /// Working directory: staging area and home of the tool executables.
    pub root: PathBuf,
    /// `data/`: holds one input directory per job.
    pub data_dir: PathBuf,
    /// `out/`: receives per-job OUT/TEMP folders and the run report.
    pub out_dir: PathBuf,
    /// `UNFINISHED_FILES/`: flat quarantine for leftovers of interrupted runs.
    pub quarantine_dir: PathBuf,
    /// Job-list file.
    pub jobs_path: PathBuf,
    /// Run report written after the batch completes.
    pub report_path: PathBuf,
}

impl BatchPaths {
    pub fn new(root: impl Into<PathBuf>, config: &BatchConfig) -> Self {
        let root = root.into();
        let out_dir = root.join(&config.out_dir);
        Self {
            data_dir: root.join(&config.data_dir),
            quarantine_dir: root.join(&config.quarantine_dir),
            jobs_path: root.join(&config.jobs_file),
            report_path: out_dir.join("oclimaxplus_report.json"),
            out_dir,
            root,
        }
    }

    /// `data/<data_directory>`: input folder of one job.
    pub fn input_folder(&self, data_directory: &str) -> PathBuf {
        self.data_dir.join(data_directory)
    }

    /// `out/OUT_oclimax_<data_directory>`: final `.csv` results of one job.
    pub fn output_folder(&self, data_directory: &str) -> PathBuf {
        self.out_dir.join(format!("OUT_oclimax_{data_directory}"))
    }

    /// `out/TEMP_oclimax_<data_directory>`: intermediates of one job.
    pub fn temp_folder(&self, data_directory: &str) -> PathBuf {
        self.out_dir.join(format!("TEMP_oclimax_{data_directory}"))
    }

    /// Paths for `root` with the default config.
    pub fn with_defaults(root: impl Into<PathBuf>) -> Self {
        Self::new(root, &BatchConfig::default())
    }
}
