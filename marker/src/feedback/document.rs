//! Markdown feedback document.
//!
//! The layout is fixed: a header describing the submission and the commit used
//! for timing, a marks table, the total, and a checklist per task. A compile
//! or runtime fault is appended at the end, verbatim.

use crate::report::GradeOutcome;
use crate::timeliness::{SubmissionPresence, SubmissionStatus};
use crate::traits::feedback::FeedbackEntry;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write;

/// Run-level facts that are not part of the grade itself.
#[derive(Debug, Clone)]
pub struct FeedbackDocument {
    pub lab_name: String,
    pub student_id: String,
    pub due_iso: String,
    pub generated_at: DateTime<Utc>,
}

impl FeedbackDocument {
    pub fn new(
        lab_name: impl Into<String>,
        student_id: impl Into<String>,
        due_iso: impl Into<String>,
    ) -> Self {
        FeedbackDocument {
            lab_name: lab_name.into(),
            student_id: student_id.into(),
            due_iso: due_iso.into(),
            generated_at: Utc::now(),
        }
    }

    fn submission_note(outcome: &GradeOutcome) -> String {
        let path = outcome
            .submission_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        match outcome.presence {
            SubmissionPresence::NotFound => {
                "❌ No student JS file found in repository root (or index.html link).".to_string()
            }
            SubmissionPresence::Empty => {
                format!("⚠️ Found `{}` but it appears empty (or only comments).", path)
            }
            SubmissionPresence::Present => format!("✅ Found `{}`.", path),
        }
    }

    fn status_text(outcome: &GradeOutcome) -> String {
        let commit = &outcome.commit;
        match outcome.status {
            SubmissionStatus::Missing => format!(
                "No submission detected (missing/empty JS): submission marks = {}/20.",
                outcome.submission_marks
            ),
            SubmissionStatus::Late => format!(
                "Late submission via latest *student* commit: {}/20. (commit: {} @ {})",
                outcome.submission_marks,
                commit.sha,
                commit.iso()
            ),
            SubmissionStatus::OnTime => format!(
                "On-time submission via latest *student* commit: {}/20. (commit: {} @ {})",
                outcome.submission_marks,
                commit.sha,
                commit.iso()
            ),
        }
    }

    /// Render the whole document.
    pub fn render(&self, outcome: &GradeOutcome, entries: &[FeedbackEntry]) -> String {
        let commit = &outcome.commit;
        let mut md = String::new();

        // Writing into a String cannot fail.
        let _ = writeln!(md, "# Lab | {} | Autograding Summary\n", self.lab_name);
        let _ = writeln!(md, "- Student: `{}`", self.student_id);
        let _ = writeln!(md, "- {}", Self::submission_note(outcome));
        let _ = writeln!(md, "- {}", Self::status_text(outcome));
        let _ = writeln!(md, "- Due (Riyadh): `{}`", self.due_iso);
        let _ = writeln!(md, "- Chosen commit for submission timing:");
        let _ = writeln!(md, "  - SHA: `{}`", commit.sha);
        let _ = writeln!(md, "  - Author: `{}` <{}>", commit.author, commit.email);
        let _ = writeln!(md, "  - Time (UTC ISO): `{}`", commit.iso());
        let _ = writeln!(md, "  - Note: {}", commit.note);
        let _ = writeln!(
            md,
            "- Status: **{}** (0=on time, 1=late, 2=no submission/empty)",
            outcome.status_code()
        );
        let _ = writeln!(
            md,
            "- Run: `{}`\n",
            self.generated_at.to_rfc3339_opts(SecondsFormat::Millis, true)
        );

        md.push_str("## Marks Breakdown\n\n| Item | Marks |\n|------|------:|\n");
        for task in &outcome.tasks {
            let _ = writeln!(md, "| {}: {} | {}/{} |", task.id, task.name, task.earned, task.max);
        }
        let _ = writeln!(md, "| Submission | {}/20 |", outcome.submission_marks);

        let _ = writeln!(md, "\n## Total Marks\n\n**{} / 100**\n", outcome.total);
        md.push_str("## Detailed Feedback\n");

        for entry in entries {
            let _ = writeln!(md, "\n### {}", entry.task);
            md.push_str(&entry.lines.join("\n"));
            md.push('\n');
        }

        if let Some(message) = &outcome.compile_fault {
            let _ = write!(
                md,
                "\n---\n⚠️ **SyntaxError: code could not compile.** Dynamic checks were skipped; grading used static checks only.\n\n```\n{}\n```\n",
                message
            );
        } else if let Some(message) = &outcome.runtime_fault {
            let _ = write!(
                md,
                "\n---\n⚠️ **Runtime error detected (best-effort captured):**\n\n```\n{}\n```\n",
                message
            );
        } else if let Some(message) = &outcome.sandbox_error {
            let _ = write!(
                md,
                "\n---\n⚠️ **Sandbox unavailable.** Dynamic checks were skipped; grading used static checks only.\n\n```\n{}\n```\n",
                message
            );
        }

        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::auto_feedback::AutoFeedback;
    use crate::rubric::grade_missing;
    use crate::traits::feedback::Feedback;
    use std::path::PathBuf;
    use util::git_history::CommitInfo;

    fn missing_outcome() -> GradeOutcome {
        GradeOutcome {
            tasks: grade_missing(),
            status: SubmissionStatus::Missing,
            submission_marks: 0,
            total: 0,
            submission_path: None,
            presence: SubmissionPresence::NotFound,
            commit: CommitInfo::unknown("git inspection failed: not a repository"),
            compile_fault: None,
            runtime_fault: None,
            sandbox_error: None,
        }
    }

    fn doc() -> FeedbackDocument {
        FeedbackDocument::new("4.2 JS Advance", "alice", "2025-09-17T23:59:00+03:00")
    }

    #[test]
    fn test_missing_document_layout() {
        let outcome = missing_outcome();
        let entries = AutoFeedback.assemble_feedback(&outcome.tasks).unwrap();
        let md = doc().render(&outcome, &entries);

        assert!(md.starts_with("# Lab | 4.2 JS Advance | Autograding Summary\n"));
        assert!(md.contains("- Student: `alice`"));
        assert!(md.contains("❌ No student JS file found"));
        assert!(md.contains("submission marks = 0/20."));
        assert!(md.contains("- Status: **2**"));
        assert!(md.contains("| TODO 7: Regex + forEach — find words containing 'ab' | 0/14 |"));
        assert!(md.contains("| Submission | 0/20 |"));
        assert!(md.contains("**0 / 100**"));
        assert!(md.contains("### TODO 1: Object with Getters & Setters"));
        assert!(md.contains("- ❌ No submission / empty JS → cannot grade tasks"));
        assert!(!md.contains("---\n⚠️"));
    }

    #[test]
    fn test_compile_fault_appendix() {
        let mut outcome = missing_outcome();
        outcome.status = SubmissionStatus::Late;
        outcome.presence = SubmissionPresence::Present;
        outcome.submission_path = Some(PathBuf::from("script.js"));
        outcome.submission_marks = 10;
        outcome.compile_fault = Some("SyntaxError: Unexpected token '}'".into());
        outcome.runtime_fault = Some("ignored".into());
        let md = doc().render(&outcome, &[]);

        assert!(md.contains("✅ Found `script.js`."));
        assert!(md.contains("Late submission via latest *student* commit: 10/20. (commit: unknown @ unknown)"));
        assert!(md.contains("SyntaxError: code could not compile."));
        assert!(md.contains("```\nSyntaxError: Unexpected token '}'\n```"));
        assert!(!md.contains("Runtime error detected"));
    }

    #[test]
    fn test_runtime_fault_appendix() {
        let mut outcome = missing_outcome();
        outcome.runtime_fault = Some("ReferenceError: x is not defined".into());
        let md = doc().render(&outcome, &[]);
        assert!(md.contains("Runtime error detected (best-effort captured):"));
        assert!(md.contains("ReferenceError: x is not defined"));
    }
}
