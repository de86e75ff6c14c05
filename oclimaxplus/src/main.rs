//! OclimaxPlus: batch-run the OCLIMAX neutron-scattering tool chain over
//! many simulation datasets.
//!
//! Reads a job-list file, executes each job in line order (stage inputs,
//! invoke the convert/run tool pair per staged file, file outputs), and
//! writes a run report under `out/`.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;

use oclimaxplus::batch::{BatchStop, run_batch};
use oclimaxplus::exit_codes;
use oclimaxplus::io::config::{DEFAULT_CONFIG_FILE, load_config};
use oclimaxplus::io::paths::BatchPaths;
use oclimaxplus::io::tools::{
    DOWNLOAD_URL, OclimaxToolRunner, PrereqStatus, REQUIRED_FILES, check_prerequisites,
};
use oclimaxplus::logging;

#[derive(Parser)]
#[command(
    name = "oclimaxplus",
    version,
    about = "Simulate neutron scattering with OCLIMAX for lots of files"
)]
struct Cli {
    /// Working directory holding the OCLIMAX binaries, `data/` and `out/`.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Job-list file name, relative to the working directory.
    #[arg(long)]
    jobs: Option<String>,

    /// Config file (TOML), relative to the working directory.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    let config_path = cli
        .root
        .join(cli.config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE)));
    let mut config = load_config(&config_path)?;
    if let Some(jobs) = cli.jobs {
        config.jobs_file = jobs;
    }

    // The binaries must be present before the job file is even read.
    match check_prerequisites(&cli.root) {
        PrereqStatus::Ok => {}
        PrereqStatus::NotRenamed => {
            println!("\n ERROR:  'oclimax.win' was found, but you must rename it as 'oclimax.bat'\n");
            return Ok(exit_codes::INVALID);
        }
        PrereqStatus::Missing => {
            println!("\n ERROR:  OCLIMAX files not found. Required files are:");
            println!(" {}", REQUIRED_FILES.join(", "));
            println!(" (oclimax.bat is renamed from oclimax.win)");
            println!(" Download from: {DOWNLOAD_URL}\n");
            return Ok(exit_codes::INVALID);
        }
    }

    let paths = BatchPaths::new(&cli.root, &config);
    let runner = OclimaxToolRunner::from_config(&config);
    let outcome = run_batch(&paths, &runner)?;

    Ok(match outcome.stop {
        BatchStop::Completed => exit_codes::OK,
        BatchStop::FirstRun => exit_codes::FIRST_RUN,
        BatchStop::NoJobs => exit_codes::NO_JOBS,
    })
}
