//! # Grade Report Module
//!
//! This module defines [`GradeOutcome`], the complete result of one grading
//! run, and its fixed-schema serializations.
//!
//! ## CSV Record
//!
//! The CSV layout is consumed by downstream gradebook tooling and must not change:
//!
//! ```text
//! student_username,obtained_marks,total_marks,status
//! alice,31,100,0
//! ```
//!
//! ## Design Notes
//!
//! - A `GradeOutcome` is built once by the grading job and never mutated afterwards.
//! - Diagnostic fields (`compile_fault`, `runtime_fault`, `sandbox_error`) are
//!   surfaced verbatim in the feedback document.

use crate::scorer::TOTAL_MARKS;
use crate::timeliness::{SubmissionPresence, SubmissionStatus};
use crate::types::TaskResult;
use serde::Serialize;
use std::path::PathBuf;
use util::git_history::CommitInfo;

/// Header line of the CSV record.
pub const CSV_HEADER: &str = "student_username,obtained_marks,total_marks,status";

/// Final, externally visible result of a grading run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeOutcome {
    /// Per-task results in rubric order.
    pub tasks: Vec<TaskResult>,
    pub status: SubmissionStatus,
    /// Marks for the submission component (20 / 10 / 0 by default).
    pub submission_marks: u32,
    /// Capped at 100.
    pub total: u32,
    /// Path of the graded file, when one was located.
    pub submission_path: Option<PathBuf>,
    pub presence: SubmissionPresence,
    /// Commit used for timeliness.
    pub commit: CommitInfo,
    /// Compiler message when the submission did not compile.
    pub compile_fault: Option<String>,
    /// Fault text when the run ended early (exception or timeout).
    pub runtime_fault: Option<String>,
    /// Set when the sandbox itself could not be used.
    pub sandbox_error: Option<String>,
}

impl GradeOutcome {
    pub fn status_code(&self) -> u8 {
        self.status.code()
    }

    /// Sum of task marks before the submission component is added.
    pub fn task_marks(&self) -> u32 {
        self.tasks.iter().map(|t| t.earned).sum()
    }

    /// Header plus one data row, newline-terminated.
    pub fn csv_record(&self, student_id: &str) -> String {
        format!(
            "{}\n{},{},{},{}\n",
            CSV_HEADER,
            student_id,
            self.total,
            TOTAL_MARKS,
            self.status_code()
        )
    }

    /// One-line console summary.
    pub fn summary_line(&self) -> String {
        format!(
            "✔ Lab graded: {}/{} (status={})",
            self.total,
            TOTAL_MARKS,
            self.status_code()
        )
    }
}
