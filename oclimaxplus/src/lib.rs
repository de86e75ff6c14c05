//! Batch driver for the OCLIMAX neutron-scattering tool chain.
//!
//! This crate automates the repetitive convert-run-collect workflow across
//! many simulation datasets: it parses a job-list file, iterates jobs in line
//! order, stages `.phonon` input files into a working directory, invokes the
//! external convert/run tool pair per staged file, and files the resulting
//! artifacts into per-job output and temp folders. The architecture enforces
//! a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (job-line parsing, artifact
//!   classification). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config, staging, process
//!   execution, output filing). Isolated to enable scripted tool runners in
//!   tests.
//!
//! The orchestration module ([`batch`]) coordinates core logic with I/O to
//! implement the batch run.

pub mod batch;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
