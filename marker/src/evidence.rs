//! The read-only input shared by every requirement check.

use crate::normalize::strip_comments;
use crate::traits::sandbox::ExecutionOutcome;

/// What the sandboxed run produced, if it happened at all.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuntimeEvidence {
    /// Console lines in emission order.
    pub logs: Vec<String>,
    /// Description of the fault that ended the run early.
    pub fault: Option<String>,
}

impl From<ExecutionOutcome> for RuntimeEvidence {
    fn from(outcome: ExecutionOutcome) -> Self {
        let fault = outcome.fault_description();
        RuntimeEvidence {
            logs: outcome.into_logs(),
            fault,
        }
    }
}

/// Comment-stripped source plus optional runtime output.
///
/// Built once per grading run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evidence {
    source: String,
    runtime: Option<RuntimeEvidence>,
}

impl Evidence {
    /// Build evidence from raw submission text (comments are stripped here).
    pub fn from_raw(raw_source: &str, runtime: Option<RuntimeEvidence>) -> Self {
        Self {
            source: strip_comments(raw_source),
            runtime,
        }
    }

    /// Static-only evidence.
    pub fn static_only(raw_source: &str) -> Self {
        Self::from_raw(raw_source, None)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Captured console lines; `None` when the code was never run.
    pub fn logs(&self) -> Option<&[String]> {
        self.runtime.as_ref().map(|r| r.logs.as_slice())
    }

    pub fn runtime_fault(&self) -> Option<&str> {
        self.runtime.as_ref().and_then(|r| r.fault.as_deref())
    }

    pub fn was_executed(&self) -> bool {
        self.runtime.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_static_only_has_no_logs() {
        let ev = Evidence::static_only("let a = 1; // note");
        assert_eq!(ev.source(), "let a = 1; ");
        assert!(ev.logs().is_none());
        assert!(!ev.was_executed());
    }

    #[test]
    fn test_runtime_from_timeout_outcome() {
        let outcome = ExecutionOutcome::TimedOut {
            logs: vec!["tick".into()],
            after: Duration::from_millis(800),
        };
        let ev = Evidence::from_raw("while(true){}", Some(outcome.into()));
        assert_eq!(ev.logs().unwrap(), &["tick".to_string()]);
        assert!(ev.runtime_fault().unwrap().contains("timed out"));
    }
}
