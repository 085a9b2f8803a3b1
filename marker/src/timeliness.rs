//! # Timeliness
//!
//! Decides the submission status once per run from two facts: whether usable
//! source exists, and when the qualifying commit was made relative to the
//! deadline.

use crate::error::MarkerError;
use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

/// Deadline used when none is configured (Riyadh time).
pub const DEFAULT_DUE_ISO: &str = "2025-09-17T23:59:00+03:00";

/// Externally visible status, encoded as `0`, `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SubmissionStatus {
    OnTime,
    Late,
    Missing,
}

impl SubmissionStatus {
    pub fn code(self) -> u8 {
        match self {
            SubmissionStatus::OnTime => 0,
            SubmissionStatus::Late => 1,
            SubmissionStatus::Missing => 2,
        }
    }
}

/// What was found on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SubmissionPresence {
    NotFound,
    /// A file exists but holds nothing gradable.
    Empty,
    Present,
}

impl SubmissionPresence {
    pub fn is_gradable(self) -> bool {
        self == SubmissionPresence::Present
    }
}

/// How to treat a present submission whose commit time cannot be established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownTimestampPolicy {
    #[default]
    TreatAsLate,
    /// Lenient variant for experiments only; never the default.
    TreatAsOnTime,
}

/// The instant after which a commit is late.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline(DateTime<FixedOffset>);

impl Deadline {
    /// Parse an RFC 3339 timestamp such as `2025-09-17T23:59:00+03:00`.
    pub fn parse(iso: &str) -> Result<Self, MarkerError> {
        DateTime::parse_from_rfc3339(iso.trim())
            .map(Deadline)
            .map_err(|e| MarkerError::InvalidDeadline(format!("{}: {}", iso, e)))
    }

    pub fn instant(&self) -> DateTime<FixedOffset> {
        self.0
    }

    /// The deadline in the offset it was written with.
    pub fn iso(&self) -> String {
        self.0.to_rfc3339()
    }

    /// Strictly after the deadline counts as late.
    pub fn is_passed_at(&self, at: DateTime<Utc>) -> bool {
        at > self.0
    }
}

impl Default for Deadline {
    fn default() -> Self {
        // DEFAULT_DUE_ISO is a valid literal.
        Deadline(
            DateTime::parse_from_rfc3339(DEFAULT_DUE_ISO)
                .unwrap_or_else(|_| DateTime::<Utc>::MIN_UTC.fixed_offset()),
        )
    }
}

/// Pure status classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimelinessClassifier {
    pub deadline: Deadline,
    pub unknown_policy: UnknownTimestampPolicy,
}

impl TimelinessClassifier {
    pub fn new(deadline: Deadline) -> Self {
        TimelinessClassifier {
            deadline,
            unknown_policy: UnknownTimestampPolicy::default(),
        }
    }

    pub fn with_unknown_policy(mut self, policy: UnknownTimestampPolicy) -> Self {
        self.unknown_policy = policy;
        self
    }

    /// Missing or empty wins over anything the history says.
    pub fn classify(
        &self,
        presence: SubmissionPresence,
        commit_time: Option<DateTime<Utc>>,
    ) -> SubmissionStatus {
        if !presence.is_gradable() {
            return SubmissionStatus::Missing;
        }
        match commit_time {
            Some(t) if self.deadline.is_passed_at(t) => SubmissionStatus::Late,
            Some(_) => SubmissionStatus::OnTime,
            None => match self.unknown_policy {
                UnknownTimestampPolicy::TreatAsLate => SubmissionStatus::Late,
                UnknownTimestampPolicy::TreatAsOnTime => SubmissionStatus::OnTime,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_default_deadline() {
        let d = Deadline::default();
        assert_eq!(d.instant().with_timezone(&Utc), utc(2025, 9, 17, 20, 59, 0));
    }

    #[test]
    fn test_invalid_deadline() {
        assert!(matches!(
            Deadline::parse("next tuesday"),
            Err(MarkerError::InvalidDeadline(_))
        ));
    }

    #[test]
    fn test_missing_beats_history() {
        let c = TimelinessClassifier::default();
        let early = Some(utc(2025, 9, 1, 0, 0, 0));
        assert_eq!(c.classify(SubmissionPresence::NotFound, early), SubmissionStatus::Missing);
        assert_eq!(c.classify(SubmissionPresence::Empty, early), SubmissionStatus::Missing);
    }

    #[test]
    fn test_on_time_late_and_boundary() {
        let c = TimelinessClassifier::default();
        let p = SubmissionPresence::Present;
        assert_eq!(c.classify(p, Some(utc(2025, 9, 17, 20, 59, 0))), SubmissionStatus::OnTime);
        assert_eq!(c.classify(p, Some(utc(2025, 9, 17, 20, 59, 1))), SubmissionStatus::Late);
    }

    #[test]
    fn test_unknown_timestamp_policy() {
        let c = TimelinessClassifier::default();
        assert_eq!(c.classify(SubmissionPresence::Present, None), SubmissionStatus::Late);
        let lenient = c.with_unknown_policy(UnknownTimestampPolicy::TreatAsOnTime);
        assert_eq!(lenient.classify(SubmissionPresence::Present, None), SubmissionStatus::OnTime);
    }

    #[test]
    fn test_codes() {
        assert_eq!(SubmissionStatus::OnTime.code(), 0);
        assert_eq!(SubmissionStatus::Late.code(), 1);
        assert_eq!(SubmissionStatus::Missing.code(), 2);
    }
}
