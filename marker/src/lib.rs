//! # Marker Library
//!
//! This crate holds the grading engine for the JS Advance lab. It inspects a
//! single student JavaScript file against a fixed seven-task rubric and
//! produces a [`GradeOutcome`](report::GradeOutcome) with per-requirement
//! results, submission timeliness and a capped total out of 100.
//!
//! ## Key Concepts
//! - **GradingJob**: One grading run over one submission. Never fails: every
//!   fault becomes data in the outcome.
//! - **Detectors**: Declarative requirement tables matched against
//!   comment-stripped source and, when available, captured console output.
//! - **Sandbox**: Pluggable capability that compiles and runs the submission.
//! - **Feedback**: Pluggable strategy that phrases results for the student.

pub mod detectors;
pub mod error;
pub mod evidence;
pub mod feedback;
pub mod normalize;
pub mod report;
pub mod rubric;
pub mod scorer;
pub mod timeliness;
pub mod traits;
pub mod types;

use crate::error::MarkerError;
use crate::evidence::{Evidence, RuntimeEvidence};
use crate::feedback::auto_feedback::AutoFeedback;
use crate::normalize::is_effectively_empty;
use crate::report::GradeOutcome;
use crate::rubric::{grade_missing, grade_tasks};
use crate::scorer::{MarkPolicy, total_marks};
use crate::timeliness::{SubmissionPresence, TimelinessClassifier};
use crate::traits::feedback::{Feedback, FeedbackEntry};
use crate::traits::sandbox::{Sandbox, SyntaxCheck};

use util::git_history::CommitInfo;
use util::submission::Submission;

/// What the sandbox contributed to a run.
#[derive(Debug, Default)]
struct DynamicFindings {
    runtime: Option<RuntimeEvidence>,
    compile_fault: Option<String>,
    runtime_fault: Option<String>,
    sandbox_error: Option<String>,
}

/// A grading run for a single submission.
///
/// # Fields
/// - `submission`: The located file, or `None` when nothing was found.
/// - `commit`: The qualifying commit used for timeliness.
/// - `classifier`: Deadline and unknown-timestamp policy.
/// - `policy`: Marks for the submission component.
/// - `sandbox`: Optional execution backend. Without one, grading is static only.
/// - `feedback`: Strategy used to phrase requirement results.
pub struct GradingJob<'a> {
    submission: Option<Submission>,
    commit: CommitInfo,
    classifier: TimelinessClassifier,
    policy: MarkPolicy,
    sandbox: Option<Box<dyn Sandbox + 'a>>,
    feedback: Box<dyn Feedback + Send + Sync + 'a>,
}

impl<'a> GradingJob<'a> {
    /// Create a job with the default mark policy, no sandbox and checklist feedback.
    ///
    /// # Arguments
    /// * `submission` - The located submission, if any.
    /// * `commit` - The commit chosen for timeliness.
    /// * `classifier` - Deadline and unknown-timestamp policy.
    pub fn new(
        submission: Option<Submission>,
        commit: CommitInfo,
        classifier: TimelinessClassifier,
    ) -> Self {
        Self {
            submission,
            commit,
            classifier,
            policy: MarkPolicy::default(),
            sandbox: None,
            feedback: Box::new(AutoFeedback),
        }
    }

    /// Corroborate static findings by running the code in `sandbox`.
    pub fn with_sandbox<S: Sandbox + 'a>(mut self, sandbox: S) -> Self {
        self.sandbox = Some(Box::new(sandbox));
        self
    }

    pub fn with_policy(mut self, policy: MarkPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set a custom feedback strategy for this job.
    pub fn with_feedback<F: Feedback + Send + Sync + 'a>(mut self, feedback: F) -> Self {
        self.feedback = Box::new(feedback);
        self
    }

    fn gradable_source(&self) -> Result<&Submission, MarkerError> {
        let submission = self.submission.as_ref().ok_or(MarkerError::SourceNotFound)?;
        if is_effectively_empty(&submission.source) {
            return Err(MarkerError::SourceEmpty);
        }
        Ok(submission)
    }

    /// Compile, then (only if that succeeds) run once.
    async fn collect_dynamic(&self, source: &str) -> DynamicFindings {
        let mut findings = DynamicFindings::default();
        let Some(sandbox) = self.sandbox.as_deref() else {
            return findings;
        };

        match sandbox.check_syntax(source).await {
            Ok(SyntaxCheck::Valid) => {}
            Ok(SyntaxCheck::Invalid { message }) => {
                tracing::info!("{}", MarkerError::CompileFault(message.clone()));
                findings.compile_fault = Some(message);
                return findings;
            }
            Err(e) => {
                tracing::warn!("syntax check skipped: {}", e);
                findings.sandbox_error = Some(e.to_string());
                return findings;
            }
        }

        match sandbox.execute(source).await {
            Ok(outcome) => {
                let runtime = RuntimeEvidence::from(outcome);
                if let Some(fault) = &runtime.fault {
                    tracing::info!("{}", MarkerError::RuntimeFault(fault.clone()));
                }
                findings.runtime_fault = runtime.fault.clone();
                findings.runtime = Some(runtime);
            }
            Err(e) => {
                tracing::warn!("execution skipped: {}", e);
                findings.sandbox_error = Some(e.to_string());
            }
        }
        findings
    }

    /// Run the grading pipeline.
    ///
    /// # Steps
    /// 1. Decide presence (not found / empty / present) and the status, once.
    /// 2. Missing or empty: every task gets the placeholder requirement and 0 marks.
    /// 3. Otherwise compile-check, run at most once, and evaluate every requirement
    ///    against the combined evidence.
    /// 4. Add the submission component and cap the total.
    pub async fn grade(&self) -> GradeOutcome {
        let source = self.gradable_source();
        let presence = match &source {
            Ok(_) => SubmissionPresence::Present,
            Err(MarkerError::SourceEmpty) => SubmissionPresence::Empty,
            Err(_) => SubmissionPresence::NotFound,
        };
        if let Err(e) = &source {
            tracing::info!("{}", e);
        }

        let status = self.classifier.classify(presence, self.commit.timestamp);
        let submission_marks = self.policy.submission_marks(status);

        let (tasks, dynamic) = match source {
            Ok(submission) => {
                let mut dynamic = self.collect_dynamic(&submission.source).await;
                let evidence = Evidence::from_raw(&submission.source, dynamic.runtime.take());
                (grade_tasks(&evidence), dynamic)
            }
            Err(_) => (grade_missing(), DynamicFindings::default()),
        };

        let total = total_marks(&tasks, submission_marks);
        tracing::info!(
            status = status.code(),
            submission_marks,
            total,
            "grading finished"
        );

        GradeOutcome {
            tasks,
            status,
            submission_marks,
            total,
            submission_path: self.submission.as_ref().map(|s| s.path.clone()),
            presence,
            commit: self.commit.clone(),
            compile_fault: dynamic.compile_fault,
            runtime_fault: dynamic.runtime_fault,
            sandbox_error: dynamic.sandbox_error,
        }
    }

    /// Phrase the outcome's task results with the configured strategy.
    pub fn feedback(&self, outcome: &GradeOutcome) -> Result<Vec<FeedbackEntry>, MarkerError> {
        self.feedback.assemble_feedback(&outcome.tasks)
    }
}
