//! Shared helpers for the lab grader: sandbox limits, submission discovery
//! and version-control history inspection.

pub mod execution_config;
pub mod git_history;
pub mod submission;
pub mod test_helpers;
