//! Sandbox Trait
//!
//! This module defines the [`Sandbox`] capability used to corroborate static
//! findings by running the submission. Implementations compile and execute
//! the code in an isolated, time-bounded context and always release that
//! context before returning, whatever the outcome.
//!
//! The grading job calls [`Sandbox::check_syntax`] first and
//! [`Sandbox::execute`] at most once, and only for syntactically valid,
//! non-empty submissions.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Result of the compile-only check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SyntaxCheck {
    Valid,
    /// Carries the compiler message verbatim.
    Invalid { message: String },
}

/// How a sandboxed run ended. Logs captured before a fault are always kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ExecutionOutcome {
    Completed { logs: Vec<String> },
    Faulted { logs: Vec<String>, fault: String },
    TimedOut { logs: Vec<String>, after: Duration },
}

impl ExecutionOutcome {
    pub fn logs(&self) -> &[String] {
        match self {
            ExecutionOutcome::Completed { logs }
            | ExecutionOutcome::Faulted { logs, .. }
            | ExecutionOutcome::TimedOut { logs, .. } => logs,
        }
    }

    pub fn into_logs(self) -> Vec<String> {
        match self {
            ExecutionOutcome::Completed { logs }
            | ExecutionOutcome::Faulted { logs, .. }
            | ExecutionOutcome::TimedOut { logs, .. } => logs,
        }
    }

    /// Human-readable fault text, `None` for a clean run.
    pub fn fault_description(&self) -> Option<String> {
        match self {
            ExecutionOutcome::Completed { .. } => None,
            ExecutionOutcome::Faulted { fault, .. } => Some(fault.clone()),
            ExecutionOutcome::TimedOut { after, .. } => Some(format!(
                "Script execution timed out after {}ms",
                after.as_millis()
            )),
        }
    }
}

/// The sandbox itself could not do its job (as opposed to the submission failing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SandboxError {
    /// The execution context could not be created (interpreter missing, temp dir, spawn).
    Unavailable(String),
    /// The execution context answered with something unintelligible.
    Protocol(String),
}

impl fmt::Display for SandboxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SandboxError::Unavailable(msg) => write!(f, "sandbox unavailable: {}", msg),
            SandboxError::Protocol(msg) => write!(f, "sandbox protocol error: {}", msg),
        }
    }
}

impl std::error::Error for SandboxError {}

/// Capability to compile and run a submission in isolation.
#[async_trait]
pub trait Sandbox: Send + Sync {
    /// Compile without running.
    async fn check_syntax(&self, source: &str) -> Result<SyntaxCheck, SandboxError>;

    /// Run the submission once, capturing console output.
    async fn execute(&self, source: &str) -> Result<ExecutionOutcome, SandboxError>;
}
