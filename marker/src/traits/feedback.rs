//!
//! # Feedback Trait
//!
//! This module defines the [`Feedback`] trait and the [`FeedbackEntry`] struct, which are used to implement pluggable feedback strategies for the grader.
//!
//! Each feedback strategy produces one entry per task from the grading results, so the document layout stays independent of how individual lines are phrased.
//!

use crate::error::MarkerError;
use crate::types::TaskResult;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackEntry {
    /// Heading of the task, e.g. `TODO 2: Object as Map + for...in loop`.
    pub task: String,
    /// One line per requirement, in rubric order.
    pub lines: Vec<String>,
}

/// A trait for pluggable feedback strategies.
///
/// # Arguments
/// - `results`: The graded tasks of one submission, in rubric order.
///
/// # Returns
/// - `Ok(Vec<FeedbackEntry>)`: One entry per task, in the same order.
/// - `Err(MarkerError)`: If feedback generation fails.
///
pub trait Feedback {
    fn assemble_feedback(&self, results: &[TaskResult]) -> Result<Vec<FeedbackEntry>, MarkerError>;
}
