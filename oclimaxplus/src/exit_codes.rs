//! Stable exit codes for the oclimaxplus binary.

/// Batch ran to completion over all parsed jobs.
pub const OK: i32 = 0;
/// Prerequisites missing, invalid config, or an unexpected I/O failure.
pub const INVALID: i32 = 1;
/// Job-list file was absent; a template was created and no jobs ran.
pub const FIRST_RUN: i32 = 2;
/// Job-list file existed but contained zero valid job lines.
pub const NO_JOBS: i32 = 3;
