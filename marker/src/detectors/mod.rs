//! # Detectors
//!
//! Each rubric requirement is described declaratively by a [`RequirementDef`]:
//! a label, an optional hint, and a [`Signal`] describing the *family* of
//! surface forms that count as evidence. Submissions are free-form, so a
//! signal usually lists several acceptable spellings of the same idea rather
//! than one canonical form.
//!
//! Signals are pure functions of an [`Evidence`] value. New accepted forms are
//! added to the tables in [`catalog`] without touching scoring code.

pub mod catalog;

use crate::error::MarkerError;
use crate::evidence::Evidence;
use crate::types::Requirement;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Mutex;

/// Compiled patterns, keyed by their source text. Invalid patterns are not cached.
static COMPILED: Lazy<Mutex<HashMap<&'static str, Regex>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Compile `pattern` once and hand out cheap clones afterwards.
fn compiled(pattern: &'static str) -> Result<Regex, regex::Error> {
    if let Some(re) = COMPILED.lock().ok().and_then(|cache| cache.get(pattern).cloned()) {
        return Ok(re);
    }
    let re = Regex::new(pattern)?;
    if let Ok(mut cache) = COMPILED.lock() {
        cache.insert(pattern, re.clone());
    }
    Ok(re)
}

/// A family of textual or behavioural signatures.
#[derive(Debug, Clone, Copy)]
pub enum Signal {
    /// Any of the patterns matches the comment-stripped source.
    Source(&'static [&'static str]),
    /// Some captured console line matches. Never true when the code was not run.
    Logs(&'static str),
    /// At least one inner signal holds.
    AnyOf(&'static [Signal]),
    /// Every inner signal holds.
    AllOf(&'static [Signal]),
}

impl Signal {
    /// Evaluate against the evidence. A pattern that fails to compile is an error.
    pub fn evaluate(&self, evidence: &Evidence) -> Result<bool, regex::Error> {
        match self {
            Signal::Source(patterns) => {
                for &pattern in patterns.iter() {
                    if compiled(pattern)?.is_match(evidence.source()) {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Signal::Logs(pattern) => {
                let Some(logs) = evidence.logs() else {
                    return Ok(false);
                };
                let re = compiled(*pattern)?;
                Ok(logs.iter().any(|line| re.is_match(line)))
            }
            Signal::AnyOf(signals) => {
                for signal in signals.iter() {
                    if signal.evaluate(evidence)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Signal::AllOf(signals) => {
                for signal in signals.iter() {
                    if !signal.evaluate(evidence)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        }
    }

    /// True when the signal can be satisfied from source text alone.
    pub fn has_static_component(&self) -> bool {
        match self {
            Signal::Source(_) => true,
            Signal::Logs(_) => false,
            Signal::AnyOf(signals) | Signal::AllOf(signals) => {
                signals.iter().any(Signal::has_static_component)
            }
        }
    }
}

/// Static description of one rubric requirement.
#[derive(Debug, Clone, Copy)]
pub struct RequirementDef {
    pub label: &'static str,
    pub hint: Option<&'static str>,
    pub signal: Signal,
}

impl RequirementDef {
    /// Evaluate into a fresh [`Requirement`].
    ///
    /// Faults inside the check (bad pattern, panic) are contained here: the
    /// requirement is reported as not satisfied and the fault is recorded.
    pub fn check(&self, evidence: &Evidence) -> Requirement {
        let verdict = catch_unwind(AssertUnwindSafe(|| self.signal.evaluate(evidence)));
        let message = match verdict {
            Ok(Ok(ok)) => return Requirement::new(self.label, ok, self.hint),
            Ok(Err(e)) => format!("invalid pattern: {}", e),
            Err(_) => "requirement check panicked".to_string(),
        };
        let fault = MarkerError::PredicateFault {
            requirement: self.label.to_string(),
            message: message.clone(),
        };
        tracing::warn!("{}", fault);
        Requirement::faulted(self.label, self.hint, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::RuntimeEvidence;

    const LOG_ONLY: Signal = Signal::Logs("(?i)done");
    const EITHER: Signal = Signal::AnyOf(&[Signal::Source(&[r"\bfinish\("]), LOG_ONLY]);
    const BOTH: Signal = Signal::AllOf(&[Signal::Source(&[r"\ba\b"]), Signal::Source(&[r"\bb\b"])]);

    fn ran(src: &str, logs: &[&str]) -> Evidence {
        Evidence::from_raw(
            src,
            Some(RuntimeEvidence {
                logs: logs.iter().map(|s| s.to_string()).collect(),
                fault: None,
            }),
        )
    }

    #[test]
    fn test_source_any_pattern() {
        let sig = Signal::Source(&[r"\bfoo\b", r"\bbar\b"]);
        assert!(sig.evaluate(&Evidence::static_only("let bar = 1;")).unwrap());
        assert!(!sig.evaluate(&Evidence::static_only("let baz = 1;")).unwrap());
    }

    #[test]
    fn test_source_ignores_comments() {
        let sig = Signal::Source(&[r"\bfoo\b"]);
        assert!(!sig.evaluate(&Evidence::static_only("// foo\nlet x;")).unwrap());
    }

    #[test]
    fn test_logs_false_without_run() {
        assert!(!LOG_ONLY.evaluate(&Evidence::static_only("DONE")).unwrap());
        assert!(LOG_ONLY.evaluate(&ran("", &["all DONE"])).unwrap());
    }

    #[test]
    fn test_combinators() {
        assert!(EITHER.evaluate(&ran("x", &["done"])).unwrap());
        assert!(EITHER.evaluate(&Evidence::static_only("finish()")).unwrap());
        assert!(BOTH.evaluate(&Evidence::static_only("a + b")).unwrap());
        assert!(!BOTH.evaluate(&Evidence::static_only("a + c")).unwrap());
    }

    #[test]
    fn test_static_component() {
        assert!(!LOG_ONLY.has_static_component());
        assert!(EITHER.has_static_component());
    }

    #[test]
    fn test_invalid_pattern_is_isolated_fault() {
        let def = RequirementDef {
            label: "broken",
            hint: Some("fix it"),
            signal: Signal::Source(&["(unclosed"]),
        };
        let req = def.check(&Evidence::static_only("(unclosed"));
        assert!(!req.ok);
        assert!(req.fault.as_deref().unwrap().starts_with("invalid pattern"));
        assert_eq!(req.hint.as_deref(), Some("fix it"));
    }

    #[test]
    fn test_patterns_are_compiled_once() {
        let first = compiled(r"\bcached_once\b").unwrap();
        let again = compiled(r"\bcached_once\b").unwrap();
        assert_eq!(first.as_str(), again.as_str());
        assert!(COMPILED.lock().unwrap().contains_key(r"\bcached_once\b"));

        assert!(compiled("(never cached").is_err());
        assert!(!COMPILED.lock().unwrap().contains_key("(never cached"));
    }
}
