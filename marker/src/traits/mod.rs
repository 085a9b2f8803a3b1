//!
//! Traits Module
//!
//! This module contains the seams of the grading engine.
//!
//! - [`feedback`]: Turns task results into student-facing feedback entries.
//! - [`sandbox`]: Compiles and runs a submission in isolation.
//!
//! Implement these traits to plug in a different feedback style or execution backend.

pub mod feedback;
pub mod sandbox;
