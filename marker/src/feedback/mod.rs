//! # Feedback Module
//!
//! Student-facing output of a grading run.
//!
//! - [`auto_feedback`]: Checklist-style lines (✅ / ❌ with hints) for every requirement.
//! - [`document`]: Assembles the full markdown report written to the artifacts directory.

pub mod auto_feedback;
pub mod document;
