//! Marker Error Types
//!
//! This module defines the [`MarkerError`] enum, which names every fault the
//! grading pipeline can run into. None of them abort a grading run: the
//! engine turns each one into data (a status code, a failed requirement, a
//! message in the feedback document) and carries on.
//!
//! # Example
//!
//! ```rust
//! use marker::error::MarkerError;
//!
//! fn require_source(source: Option<&str>) -> Result<&str, MarkerError> {
//!     source.ok_or(MarkerError::SourceNotFound)
//! }
//!
//! assert!(require_source(None).is_err());
//! ```

use std::fmt;

/// Represents all error types that can occur in the marker system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerError {
    /// No submission file could be located.
    SourceNotFound,
    /// A submission file exists but holds (almost) nothing besides comments.
    SourceEmpty,
    /// The submission does not compile; carries the compiler message verbatim.
    CompileFault(String),
    /// The submission faulted (or timed out) while running in the sandbox.
    RuntimeFault(String),
    /// A single requirement check failed internally.
    PredicateFault { requirement: String, message: String },
    /// The deadline in the configuration is not a valid RFC 3339 instant.
    InvalidDeadline(String),
}

impl fmt::Display for MarkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerError::SourceNotFound => write!(f, "no submission file found"),
            MarkerError::SourceEmpty => write!(f, "submission file is empty"),
            MarkerError::CompileFault(msg) => write!(f, "compile fault: {}", msg),
            MarkerError::RuntimeFault(msg) => write!(f, "runtime fault: {}", msg),
            MarkerError::PredicateFault {
                requirement,
                message,
            } => write!(f, "check for '{}' failed: {}", requirement, message),
            MarkerError::InvalidDeadline(msg) => write!(f, "invalid deadline: {}", msg),
        }
    }
}

impl std::error::Error for MarkerError {}
