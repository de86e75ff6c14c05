//! Test-only helpers: a scratch workspace and a scripted tool runner.

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};

use crate::io::paths::BatchPaths;
use crate::io::tools::{REQUIRED_FILES, ToolRunner};

/// Temporary working directory pre-populated with fake OCLIMAX binaries and
/// an empty `data/` folder.
pub struct TestWorkspace {
    temp: tempfile::TempDir,
}

impl TestWorkspace {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        for name in REQUIRED_FILES {
            fs::write(temp.path().join(name), b"").context("write fake binary")?;
        }
        fs::create_dir(temp.path().join("data")).context("create data dir")?;
        Ok(Self { temp })
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Paths for this workspace with the default config.
    pub fn paths(&self) -> BatchPaths {
        BatchPaths::with_defaults(self.root())
    }

    /// Write the job-list file.
    pub fn write_jobs(&self, contents: &str) -> Result<()> {
        fs::write(self.paths().jobs_path, contents).context("write jobs file")
    }

    /// Create `data/<data_directory>/<subdir>/<file_name>` with dummy contents.
    pub fn add_input(&self, data_directory: &str, subdir: &str, file_name: &str) -> Result<()> {
        let dir = self.root().join("data").join(data_directory).join(subdir);
        fs::create_dir_all(&dir).context("create input dirs")?;
        fs::write(dir.join(file_name), b"phonon dos").context("write input file")
    }

    /// Create an empty file directly in the working directory.
    pub fn touch(&self, name: &str) -> Result<()> {
        fs::write(self.root().join(name), b"").context("touch file")
    }
}

/// One recorded tool invocation: `("convert", file)` or `("run", base)`.
pub type RecordedCall = (String, String);

/// Tool runner that fabricates OCLIMAX outputs instead of spawning
/// processes.
///
/// `convert` writes `<base>.oclimax` and `<base>.params`; `run` writes
/// `<base>.csv`. Every call is recorded in order for assertions.
pub struct ScriptedToolRunner {
    exit_code: Option<i32>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedToolRunner {
    /// Runner whose invocations all exit 0.
    pub fn new() -> Self {
        Self {
            exit_code: Some(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Runner whose invocations all report the given exit code.
    pub fn with_exit_code(code: i32) -> Self {
        Self {
            exit_code: Some(code),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// All recorded calls, in invocation order.
    pub fn invocations(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("lock calls").clone()
    }

    fn record(&self, kind: &str, argument: &str) {
        self.calls
            .lock()
            .expect("lock calls")
            .push((kind.to_string(), argument.to_string()));
    }
}

impl Default for ScriptedToolRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRunner for ScriptedToolRunner {
    fn convert(&self, workdir: &Path, file_name: &str, base_name: &str) -> Result<Option<i32>> {
        self.record("convert", file_name);
        fs::write(workdir.join(format!("{base_name}.oclimax")), b"oclimax")
            .context("fabricate oclimax file")?;
        fs::write(workdir.join(format!("{base_name}.params")), b"params")
            .context("fabricate params file")?;
        Ok(self.exit_code)
    }

    fn run(&self, workdir: &Path, base_name: &str) -> Result<Option<i32>> {
        self.record("run", base_name);
        fs::write(workdir.join(format!("{base_name}.csv")), b"q,s")
            .context("fabricate csv file")?;
        Ok(self.exit_code)
    }
}
