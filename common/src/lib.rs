//! Process-wide plumbing shared by the grader binary: configuration loading
//! and logging setup.

pub mod config;
pub mod logger;
