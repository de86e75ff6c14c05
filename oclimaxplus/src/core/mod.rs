//! Pure, deterministic logic with no I/O.

pub mod artifacts;
pub mod job;
