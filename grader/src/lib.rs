//! Command-line autograder for the JS Advance lab.
//!
//! Locates the student's script, picks the commit that timestamps the
//! submission, grades it with the marker engine and writes the CSV record and
//! the markdown feedback.

pub mod artifacts;
pub mod settings;

use crate::artifacts::{Artifact, write_all};
use crate::settings::GradingSettings;
use code_runner::NodeSandbox;
use marker::GradingJob;
use marker::feedback::document::FeedbackDocument;
use marker::report::GradeOutcome;
use marker::timeliness::TimelinessClassifier;
use util::git_history::latest_student_commit;
use util::submission::locate_submission;

/// Everything one run produced.
#[derive(Debug)]
pub struct RunReport {
    pub outcome: GradeOutcome,
    pub csv: String,
    pub markdown: String,
    /// Artifact writes that failed; grading itself never does.
    pub write_failures: Vec<anyhow::Error>,
}

/// Grade the configured submission and write all artifacts.
pub async fn run(settings: &GradingSettings) -> RunReport {
    let submission = locate_submission(&settings.submission_root);
    match &submission {
        Some(s) => tracing::info!(path = %s.path.display(), "submission located"),
        None => tracing::info!(root = %settings.submission_root.display(), "no submission found"),
    }

    let commit = latest_student_commit(&settings.submission_root, &settings.bot_filter).await;
    tracing::info!(sha = %commit.sha, time = %commit.iso(), fallback = commit.used_fallback, "commit selected");

    let mut job = GradingJob::new(
        submission,
        commit,
        TimelinessClassifier::new(settings.deadline),
    );
    if let Some(limits) = &settings.sandbox {
        job = job.with_sandbox(NodeSandbox::new(limits.clone()));
    }

    let outcome = job.grade().await;
    for task in &outcome.tasks {
        tracing::info!(
            task = %task.id,
            satisfied = task.satisfied(),
            of = task.requirements.len(),
            earned = task.earned,
            "task graded"
        );
    }
    tracing::info!(
        tasks = outcome.task_marks(),
        submission = outcome.submission_marks,
        total = outcome.total,
        "grading finished"
    );
    let entries = job.feedback(&outcome).unwrap_or_else(|e| {
        tracing::error!("feedback generation failed: {}", e);
        Vec::new()
    });
    if let Ok(json) = serde_json::to_string(&outcome) {
        tracing::debug!(outcome = %json, "grade outcome");
    }

    let markdown = FeedbackDocument::new(&settings.lab_name, &settings.student_id, &settings.due_iso)
        .render(&outcome, &entries);
    let csv = outcome.csv_record(&settings.student_id);

    let csv_path = settings.csv_path();
    let feedback_path = settings.feedback_path();
    let mut pending = vec![
        Artifact::Write {
            path: &csv_path,
            contents: &csv,
        },
        Artifact::Write {
            path: &feedback_path,
            contents: &markdown,
        },
    ];
    if let Some(summary) = &settings.step_summary {
        pending.push(Artifact::Append {
            path: summary,
            contents: &markdown,
        });
    }
    let write_failures = write_all(&pending);

    RunReport {
        outcome,
        csv,
        markdown,
        write_failures,
    }
}
