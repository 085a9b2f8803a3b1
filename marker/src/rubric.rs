//! # Rubric
//!
//! The fixed seven-task rubric for the lab and the function that turns an
//! [`Evidence`] value into per-task results.
//!
//! Task marks sum to [`TASK_MARKS_TOTAL`]; together with the submission
//! component (see [`crate::scorer::MarkPolicy`]) the lab is out of 100.

use crate::detectors::RequirementDef;
use crate::detectors::catalog::{
    CALENDAR, FAULT_HANDLING, MAP_ENUMERATION, OBJECT_ACCESSORS, PATTERN_SEARCH, SPREAD_AGGREGATE,
    STRING_ACCESS,
};
use crate::evidence::Evidence;
use crate::scorer::score_from_requirements;
use crate::types::{Requirement, TaskResult};

/// Label of the single placeholder requirement used when nothing can be graded.
pub const MISSING_SUBMISSION_LABEL: &str = "No submission / empty JS → cannot grade tasks";

/// Sum of every task's maximum.
pub const TASK_MARKS_TOTAL: u32 = 80;

/// One rubric task.
#[derive(Debug, Clone, Copy)]
pub struct TaskDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub marks: u32,
    pub requirements: &'static [RequirementDef],
}

impl TaskDefinition {
    /// Evaluate every requirement in order and score the task.
    pub fn grade(&self, evidence: &Evidence) -> TaskResult {
        let requirements: Vec<Requirement> =
            self.requirements.iter().map(|def| def.check(evidence)).collect();
        let earned = score_from_requirements(&requirements, self.marks);
        tracing::debug!(task = self.id, earned, max = self.marks, "task graded");
        TaskResult {
            id: self.id.to_string(),
            name: self.name.to_string(),
            earned,
            max: self.marks,
            requirements,
        }
    }

    /// Zero-mark result carrying only the placeholder requirement.
    pub fn missing(&self) -> TaskResult {
        TaskResult {
            id: self.id.to_string(),
            name: self.name.to_string(),
            earned: 0,
            max: self.marks,
            requirements: vec![Requirement::new(MISSING_SUBMISSION_LABEL, false, None)],
        }
    }
}

pub static RUBRIC: [TaskDefinition; 7] = [
    TaskDefinition {
        id: "TODO 1",
        name: "Object with Getters & Setters (Student: fullName + GPA validation)",
        marks: 11,
        requirements: OBJECT_ACCESSORS,
    },
    TaskDefinition {
        id: "TODO 2",
        name: "Object as Map + for...in loop",
        marks: 11,
        requirements: MAP_ENUMERATION,
    },
    TaskDefinition {
        id: "TODO 3",
        name: "String — charAt() & length",
        marks: 11,
        requirements: STRING_ACCESS,
    },
    TaskDefinition {
        id: "TODO 4",
        name: "Date — day, month, year",
        marks: 11,
        requirements: CALENDAR,
    },
    TaskDefinition {
        id: "TODO 5",
        name: "Array + Spread — min and max from 10 numbers",
        marks: 11,
        requirements: SPREAD_AGGREGATE,
    },
    TaskDefinition {
        id: "TODO 6",
        name: "Exceptions — try/catch/finally with empty array edge case",
        marks: 11,
        requirements: FAULT_HANDLING,
    },
    TaskDefinition {
        id: "TODO 7",
        name: "Regex + forEach — find words containing 'ab'",
        marks: 14,
        requirements: PATTERN_SEARCH,
    },
];

/// Grade all seven tasks in rubric order.
pub fn grade_tasks(evidence: &Evidence) -> Vec<TaskResult> {
    RUBRIC.iter().map(|task| task.grade(evidence)).collect()
}

/// All seven tasks at zero, for absent or empty submissions.
pub fn grade_missing() -> Vec<TaskResult> {
    RUBRIC.iter().map(TaskDefinition::missing).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks_add_up() {
        let sum: u32 = RUBRIC.iter().map(|t| t.marks).sum();
        assert_eq!(sum, TASK_MARKS_TOTAL);
    }

    #[test]
    fn test_requirement_counts() {
        let counts: Vec<usize> = RUBRIC.iter().map(|t| t.requirements.len()).collect();
        assert_eq!(counts, vec![5, 3, 4, 5, 4, 5, 5]);
    }

    #[test]
    fn test_missing_is_all_zero() {
        let tasks = grade_missing();
        assert_eq!(tasks.len(), 7);
        for t in &tasks {
            assert_eq!(t.earned, 0);
            assert_eq!(t.requirements.len(), 1);
            assert_eq!(t.requirements[0].label, MISSING_SUBMISSION_LABEL);
            assert!(!t.requirements[0].ok);
        }
    }

    #[test]
    fn test_blank_source_scores_zero() {
        let tasks = grade_tasks(&Evidence::static_only("let x = 0;"));
        assert!(tasks.iter().all(|t| t.earned == 0));
    }

    #[test]
    fn test_order_and_ids() {
        let ids: Vec<&str> = RUBRIC.iter().map(|t| t.id).collect();
        assert_eq!(
            ids,
            vec!["TODO 1", "TODO 2", "TODO 3", "TODO 4", "TODO 5", "TODO 6", "TODO 7"]
        );
    }
}
