//! Side-effecting operations: config, staging, process execution, filing.

pub mod config;
pub mod job_file;
pub mod outputs;
pub mod paths;
pub mod report;
pub mod staging;
pub mod tools;
