//! Batch orchestration: the job loader and the per-job executor.
//!
//! The loader scans the job-list file and executes each valid line
//! immediately, in file order, with no queuing and no parallelism. Per-job
//! and per-line failures are collected into the run report as values; only
//! unexpected I/O errors propagate as `anyhow` errors.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use tracing::{info, warn};

use crate::core::artifacts::base_name;
use crate::core::job::{Job, JobLine, parse_lines};
use crate::io::job_file::{JobFileStatus, load_or_create};
use crate::io::outputs::file_outputs;
use crate::io::paths::BatchPaths;
use crate::io::report::{
    BatchReport, JobRecord, JobStatus, ToolInvocation, UnknownLine, write_report,
};
use crate::io::staging::{quarantine_stale, stage_phonon_files, staged_phonon_files};
use crate::io::tools::ToolRunner;

/// Reason why the batch stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStop {
    /// All parsed jobs ran; the run report was written.
    Completed,
    /// Job-list file was absent; the template was created, no jobs ran.
    FirstRun,
    /// Job-list file held zero valid job lines; no jobs ran.
    NoJobs,
}

/// Summary of a batch invocation.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub stop: BatchStop,
    pub jobs: Vec<JobRecord>,
    pub unknown_lines: Vec<UnknownLine>,
}

/// Run the whole batch: load the job list and execute every valid job in
/// line order.
///
/// Terminating conditions (missing or empty job file) are returned as
/// [`BatchStop`] values; the caller decides the process exit code.
pub fn run_batch<R: ToolRunner>(paths: &BatchPaths, runner: &R) -> Result<BatchOutcome> {
    let batch_start = Instant::now();

    let contents = match load_or_create(&paths.jobs_path)? {
        JobFileStatus::Created => {
            println!();
            println!(" First time running OclimaxPlus, huh?");
            println!(" The batch job file was not found, so an empty one called");
            println!(" '{}' was created with examples", paths.jobs_path.display());
            println!();
            return Ok(BatchOutcome {
                stop: BatchStop::FirstRun,
                jobs: Vec::new(),
                unknown_lines: Vec::new(),
            });
        }
        JobFileStatus::Loaded(contents) => contents,
    };

    let mut jobs = Vec::new();
    let mut unknown_lines = Vec::new();
    for (index, line) in parse_lines(&contents).into_iter().enumerate() {
        match line {
            JobLine::Skip => {}
            JobLine::Unknown(tokens) => {
                println!();
                println!(" ERROR:  Unknown job. Check this line:");
                println!(" {tokens:?}");
                println!(" Skipping to the next job...");
                println!();
                warn!(line = index + 1, ?tokens, "unknown job line");
                unknown_lines.push(UnknownLine {
                    line_number: index + 1,
                    tokens,
                });
            }
            JobLine::Job(job) => {
                println!();
                println!(
                    "\n Starting new job: {}, {}",
                    job.data_directory, job.phonon_file_name
                );
                println!();
                info!(
                    data_directory = %job.data_directory,
                    phonon_file = %job.phonon_file_name,
                    "starting job"
                );
                jobs.push(run_job(paths, runner, &job)?);
            }
        }
    }

    if jobs.is_empty() {
        println!();
        println!(
            " WARNING:  '{}' batch job file was found,",
            paths.jobs_path.display()
        );
        println!(" but it is empty. Please fill it and try again.");
        println!();
        return Ok(BatchOutcome {
            stop: BatchStop::NoJobs,
            jobs,
            unknown_lines,
        });
    }

    let total_elapsed = batch_start.elapsed().as_secs_f64();
    let report = BatchReport {
        total_elapsed_secs: round_tenth(total_elapsed),
        jobs: jobs.clone(),
        unknown_lines: unknown_lines.clone(),
    };
    write_report(&paths.report_path, &report)?;

    println!();
    println!(" All jobs finished in {:.1} seconds", total_elapsed);
    println!();

    Ok(BatchOutcome {
        stop: BatchStop::Completed,
        jobs,
        unknown_lines,
    })
}

/// Run one job through its whole state machine:
/// quarantine → validate input → stage → tool pair per file → file outputs.
///
/// A missing input folder aborts only this job; the record carries
/// [`JobStatus::MissingDataDir`] and the batch continues.
pub fn run_job<R: ToolRunner>(paths: &BatchPaths, runner: &R, job: &Job) -> Result<JobRecord> {
    let job_start = Instant::now();

    let quarantined = quarantine_stale(&paths.root, &paths.quarantine_dir)?;
    if !quarantined.is_empty() {
        println!(
            " WARNING:  Leftover files from a previous run were moved to '{}'",
            paths.quarantine_dir.display()
        );
        warn!(count = quarantined.len(), "quarantined leftover files");
    }

    let input_folder = paths.input_folder(&job.data_directory);
    if !input_folder.is_dir() {
        println!(
            " ERROR:  Data folder '{}' was not found.",
            input_folder.display()
        );
        println!(" Skipping to the next job...");
        warn!(folder = %input_folder.display(), "input folder missing");
        return Ok(JobRecord {
            data_directory: job.data_directory.clone(),
            phonon_file_name: job.phonon_file_name.clone(),
            status: JobStatus::MissingDataDir,
            staged: Vec::new(),
            missing_inputs: Vec::new(),
            invocations: Vec::new(),
            elapsed_secs: round_tenth(job_start.elapsed().as_secs_f64()),
        });
    }

    println!("\n Renaming and copying the *.phonon files to the working directory...\n");
    let staging = stage_phonon_files(&input_folder, &job.phonon_file_name, &paths.root)?;
    if !staging.missing.is_empty() {
        println!(" WARNING:  The following phonon files were not found:");
        for entry in &staging.missing {
            println!("   {entry}");
        }
        println!();
    }

    println!(" Executing OCLIMAX for all *.phonon files...\n");
    let mut invocations = Vec::new();
    for file in staged_phonon_files(&paths.root)? {
        let base = base_name(&file).to_string();
        let convert_exit_code = runner.convert(&paths.root, &file, &base)?;
        let run_exit_code = runner.run(&paths.root, &base)?;
        invocations.push(ToolInvocation {
            file,
            convert_exit_code,
            run_exit_code,
        });
    }

    file_outputs(
        &paths.root,
        &paths.output_folder(&job.data_directory),
        &paths.temp_folder(&job.data_directory),
    )?;

    let elapsed = job_start.elapsed().as_secs_f64();
    println!();
    println!(" Job finished in {:.1} seconds", elapsed);
    println!();
    info!(data_directory = %job.data_directory, elapsed_secs = elapsed, "job finished");

    Ok(JobRecord {
        data_directory: job.data_directory.clone(),
        phonon_file_name: job.phonon_file_name.clone(),
        status: JobStatus::Completed,
        staged: staging.staged,
        missing_inputs: staging.missing,
        invocations,
        elapsed_secs: round_tenth(elapsed),
    })
}

fn round_tenth(secs: f64) -> f64 {
    (secs * 10.0).round() / 10.0
}
