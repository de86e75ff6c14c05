//! Batch-level harness tests for full run scenarios.
//!
//! These tests drive `run_batch` over a populated workspace to verify
//! end-to-end behavior: loader ordering, staging, tool sequencing, output
//! filing, quarantine, and report writing.

use std::fs;

use oclimaxplus::batch::{BatchStop, run_batch, run_job};
use oclimaxplus::core::artifacts::base_name;
use oclimaxplus::core::job::Job;
use oclimaxplus::io::job_file::JOBS_TEMPLATE;
use oclimaxplus::io::report::JobStatus;
use oclimaxplus::test_support::{ScriptedToolRunner, TestWorkspace};

/// Full lifecycle: two jobs, one unknown line, one missing subdirectory
/// input.
///
/// Workspace layout:
/// ```text
/// data/data_first/sub1/target.phonon   (present)
/// data/data_first/sub2/                (target.phonon absent)
/// data/data_second/cell/other.phonon   (present)
/// ```
///
/// Job file:
/// 1. `data_first, target.phonon`  → staged sub1, missing sub2
/// 2. `broken, line, here`         → unknown, skipped
/// 3. `data_second, other.phonon`  → staged cell
///
/// Tests: line-order execution, per-job isolation of outputs, missing-input
/// collection, convert-before-run pairing, and the run report.
#[test]
fn full_batch_lifecycle() {
    let ws = TestWorkspace::new().expect("workspace");
    ws.add_input("data_first", "sub1", "target.phonon")
        .expect("input");
    fs::create_dir_all(ws.root().join("data/data_first/sub2")).expect("empty subdir");
    ws.add_input("data_second", "cell", "other.phonon")
        .expect("input");
    ws.write_jobs("data_first, target.phonon\nbroken, line, here\ndata_second, other.phonon\n")
        .expect("jobs");
    let runner = ScriptedToolRunner::new();

    let outcome = run_batch(&ws.paths(), &runner).expect("batch");
    assert_eq!(outcome.stop, BatchStop::Completed);

    // Loader: jobs in line order, unknown line collected, not executed.
    assert_eq!(outcome.jobs.len(), 2);
    assert_eq!(outcome.jobs[0].data_directory, "data_first");
    assert_eq!(outcome.jobs[1].data_directory, "data_second");
    assert_eq!(outcome.unknown_lines.len(), 1);
    assert_eq!(outcome.unknown_lines[0].line_number, 2);
    assert_eq!(
        outcome.unknown_lines[0].tokens,
        vec!["broken".to_string(), "line".to_string(), "here".to_string()]
    );

    // Job 1: sub1 staged, sub2 reported missing, job still completed.
    assert_eq!(outcome.jobs[0].status, JobStatus::Completed);
    assert_eq!(outcome.jobs[0].staged, vec!["sub1.phonon"]);
    assert_eq!(
        outcome.jobs[0].missing_inputs,
        vec!["sub2/target.phonon".to_string()]
    );

    // Each staged file gets a convert immediately followed by its run.
    let calls = runner.invocations();
    assert_eq!(calls.len(), 4);
    for pair in calls.chunks(2) {
        let (convert_kind, convert_file) = &pair[0];
        let (run_kind, run_base) = &pair[1];
        assert_eq!(convert_kind, "convert");
        assert_eq!(run_kind, "run");
        assert_eq!(run_base, base_name(convert_file));
    }

    // Outputs filed per job; working directory holds no tracked artifacts.
    let out_first = ws.paths().output_folder("data_first");
    let tmp_first = ws.paths().temp_folder("data_first");
    assert!(out_first.join("sub1.csv").is_file());
    assert!(tmp_first.join("sub1.phonon").is_file());
    assert!(tmp_first.join("sub1.oclimax").is_file());
    assert!(tmp_first.join("sub1.params").is_file());

    let out_second = ws.paths().output_folder("data_second");
    let tmp_second = ws.paths().temp_folder("data_second");
    assert!(out_second.join("cell.csv").is_file());
    assert!(tmp_second.join("cell.phonon").is_file());
    for name in ["sub1.phonon", "sub1.csv", "cell.phonon", "cell.csv"] {
        assert!(
            !ws.root().join(name).exists(),
            "{name} must not remain in the working directory"
        );
    }

    // Report captures the whole run.
    let report = fs::read_to_string(ws.paths().report_path).expect("read report");
    assert!(report.contains("\"data_first\""));
    assert!(report.contains("\"sub2/target.phonon\""));
    assert!(report.contains("\"line_number\": 2"));
    assert!(report.ends_with('\n'));
}

/// A crashed previous run leaves tracked artifacts in the working directory;
/// the next job must quarantine them before staging so they are never fed to
/// the tools or filed as this job's outputs.
#[test]
fn leftovers_are_quarantined_not_reprocessed() {
    let ws = TestWorkspace::new().expect("workspace");
    ws.touch("orphan.phonon").expect("touch");
    ws.touch("orphan.oclimax").expect("touch");
    ws.touch("orphan.params").expect("touch");
    ws.touch("orphan.csv").expect("touch");
    ws.add_input("data_a", "sub", "t.phonon").expect("input");
    let runner = ScriptedToolRunner::new();

    let record = run_job(
        &ws.paths(),
        &runner,
        &Job {
            data_directory: "data_a".to_string(),
            phonon_file_name: "t.phonon".to_string(),
        },
    )
    .expect("job");

    let quarantine = ws.root().join("UNFINISHED_FILES");
    for name in [
        "orphan.phonon",
        "orphan.oclimax",
        "orphan.params",
        "orphan.csv",
    ] {
        assert!(quarantine.join(name).is_file(), "{name} quarantined");
    }

    // Only the freshly staged file was processed and filed.
    assert_eq!(record.staged, vec!["sub.phonon"]);
    assert_eq!(runner.invocations().len(), 2);
    assert!(
        !ws.paths()
            .output_folder("data_a")
            .join("orphan.csv")
            .exists(),
        "quarantined csv must not be filed as output"
    );
}

/// First run: no job file exists yet. The template is created verbatim and
/// nothing executes.
#[test]
fn first_run_creates_template_and_exits() {
    let ws = TestWorkspace::new().expect("workspace");
    let runner = ScriptedToolRunner::new();

    let outcome = run_batch(&ws.paths(), &runner).expect("batch");
    assert_eq!(outcome.stop, BatchStop::FirstRun);
    assert!(runner.invocations().is_empty());

    let template = fs::read_to_string(ws.paths().jobs_path).expect("read");
    assert_eq!(template, JOBS_TEMPLATE);

    // Second invocation now parses the template (comments only) as empty.
    let outcome = run_batch(&ws.paths(), &runner).expect("batch");
    assert_eq!(outcome.stop, BatchStop::NoJobs);
    assert!(runner.invocations().is_empty());
}
