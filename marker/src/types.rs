//! # Types Module
//!
//! This module defines the core data structures produced by a grading run.
//! They are created once per run and never mutated afterwards.

use serde::Serialize;

/// Outcome of one atomic rubric condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requirement {
    /// What the check looks for, phrased for the student.
    pub label: String,
    /// Whether the submission satisfies the condition.
    pub ok: bool,
    /// Suggestion shown when the condition is not met.
    pub hint: Option<String>,
    /// Internal failure of the check itself, if any. A faulted check never passes.
    pub fault: Option<String>,
}

impl Requirement {
    pub fn new(label: impl Into<String>, ok: bool, hint: Option<&str>) -> Self {
        Requirement {
            label: label.into(),
            ok,
            hint: hint.map(str::to_string),
            fault: None,
        }
    }

    pub fn faulted(label: impl Into<String>, hint: Option<&str>, fault: impl Into<String>) -> Self {
        Requirement {
            label: label.into(),
            ok: false,
            hint: hint.map(str::to_string),
            fault: Some(fault.into()),
        }
    }
}

/// Represents the result of a single rubric task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskResult {
    /// Task identifier, e.g. `TODO 3`.
    pub id: String,
    /// Display name of the task.
    pub name: String,
    /// Marks awarded, always within `0..=max`.
    pub earned: u32,
    /// Maximum marks for the task.
    pub max: u32,
    /// The requirements the score was computed from.
    pub requirements: Vec<Requirement>,
}

impl TaskResult {
    pub fn satisfied(&self) -> usize {
        self.requirements.iter().filter(|r| r.ok).count()
    }
}
