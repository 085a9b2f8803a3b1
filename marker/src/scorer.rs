//! # Scorer Module
//!
//! This module turns requirement outcomes into marks and combines task marks
//! with the submission component into the final lab total.
//!
//! Marks are whole numbers. A task earns its maximum scaled by the fraction of
//! satisfied requirements, rounded half-up, so every task score is monotone in
//! the number of satisfied requirements and never exceeds the task maximum.

use crate::timeliness::SubmissionStatus;
use crate::types::{Requirement, TaskResult};

/// Maximum total for the lab.
pub const TOTAL_MARKS: u32 = 100;

/// Computes a task score from its requirement outcomes.
///
/// # Arguments
///
/// * `requirements` - The evaluated requirements of one task.
/// * `max` - The task's maximum marks.
///
/// # Returns
///
/// `round(max * satisfied / total)`, or `0` when there are no requirements.
pub fn score_from_requirements(requirements: &[Requirement], max: u32) -> u32 {
    let total = requirements.len() as u64;
    if total == 0 {
        return 0;
    }
    let satisfied = requirements.iter().filter(|r| r.ok).count() as u64;
    // Integer half-up rounding of max * satisfied / total.
    let scaled = (2 * max as u64 * satisfied + total) / (2 * total);
    scaled.min(max as u64) as u32
}

/// Marks awarded for the submission component, by status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkPolicy {
    pub on_time: u32,
    pub late: u32,
    pub missing: u32,
}

impl Default for MarkPolicy {
    fn default() -> Self {
        MarkPolicy {
            on_time: 20,
            late: 10,
            missing: 0,
        }
    }
}

impl MarkPolicy {
    pub fn submission_marks(&self, status: SubmissionStatus) -> u32 {
        match status {
            SubmissionStatus::OnTime => self.on_time,
            SubmissionStatus::Late => self.late,
            SubmissionStatus::Missing => self.missing,
        }
    }
}

/// Sum of task marks plus the submission component, capped at [`TOTAL_MARKS`].
pub fn total_marks(tasks: &[TaskResult], submission_marks: u32) -> u32 {
    let task_sum: u32 = tasks.iter().map(|t| t.earned).sum();
    (task_sum + submission_marks).min(TOTAL_MARKS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reqs(ok: usize, total: usize) -> Vec<Requirement> {
        (0..total)
            .map(|i| Requirement::new(format!("r{i}"), i < ok, None))
            .collect()
    }

    fn task(earned: u32, max: u32) -> TaskResult {
        TaskResult {
            id: "TODO".into(),
            name: "t".into(),
            earned,
            max,
            requirements: vec![],
        }
    }

    #[test]
    fn test_empty_requirements_score_zero() {
        assert_eq!(score_from_requirements(&[], 11), 0);
    }

    #[test]
    fn test_full_and_none() {
        assert_eq!(score_from_requirements(&reqs(5, 5), 11), 11);
        assert_eq!(score_from_requirements(&reqs(0, 5), 11), 0);
    }

    #[test]
    fn test_rounding() {
        // 11 * 3/5 = 6.6
        assert_eq!(score_from_requirements(&reqs(3, 5), 11), 7);
        // 11 * 1/2 = 5.5 rounds up
        assert_eq!(score_from_requirements(&reqs(1, 2), 11), 6);
        // 11 * 1/4 = 2.75
        assert_eq!(score_from_requirements(&reqs(1, 4), 11), 3);
        // 14 * 4/5 = 11.2
        assert_eq!(score_from_requirements(&reqs(4, 5), 14), 11);
        // 11 * 1/3 = 3.67
        assert_eq!(score_from_requirements(&reqs(1, 3), 11), 4);
    }

    #[test]
    fn test_monotone_and_bounded() {
        for max in [11, 14] {
            for total in 1..=6 {
                let mut prev = 0;
                for ok in 0..=total {
                    let s = score_from_requirements(&reqs(ok, total), max);
                    assert!(s >= prev);
                    assert!(s <= max);
                    prev = s;
                }
            }
        }
    }

    #[test]
    fn test_submission_marks() {
        let p = MarkPolicy::default();
        assert_eq!(p.submission_marks(SubmissionStatus::OnTime), 20);
        assert_eq!(p.submission_marks(SubmissionStatus::Late), 10);
        assert_eq!(p.submission_marks(SubmissionStatus::Missing), 0);
    }

    #[test]
    fn test_total_is_capped() {
        let tasks = vec![task(80, 80), task(30, 30)];
        assert_eq!(total_marks(&tasks, 20), 100);
        assert_eq!(total_marks(&[task(11, 11), task(7, 11)], 10), 28);
    }
}
