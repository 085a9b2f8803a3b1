//! # AutoFeedback Strategy
//!
//! This module provides the `AutoFeedback` strategy. It implements the
//! [`Feedback`] trait to render every requirement of every task as one
//! checklist line:
//!
//! - `- ✅ <label>` when the requirement is satisfied.
//! - `- ❌ <label> — <hint>` when it is not (the hint is omitted if there is none).
//!
//! A requirement whose check faulted internally gets the fault text appended,
//! so instructors can tell a broken check apart from a missing feature.

use crate::error::MarkerError;
use crate::traits::feedback::{Feedback, FeedbackEntry};
use crate::types::{Requirement, TaskResult};

/// Automatic checklist feedback.
#[derive(Debug, Default)]
pub struct AutoFeedback;

impl AutoFeedback {
    fn line(req: &Requirement) -> String {
        if req.ok {
            return format!("- ✅ {}", req.label);
        }
        let mut line = format!("- ❌ {}", req.label);
        if let Some(hint) = req.hint.as_deref().filter(|h| !h.is_empty()) {
            line.push_str(" — ");
            line.push_str(hint);
        }
        if let Some(fault) = &req.fault {
            line.push_str(&format!(" _(check error: {})_", fault));
        }
        line
    }
}

impl Feedback for AutoFeedback {
    fn assemble_feedback(&self, results: &[TaskResult]) -> Result<Vec<FeedbackEntry>, MarkerError> {
        Ok(results
            .iter()
            .map(|result| FeedbackEntry {
                task: format!("{}: {}", result.id, result.name),
                lines: result.requirements.iter().map(Self::line).collect(),
            })
            .collect())
    }
}
