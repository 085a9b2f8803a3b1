//! Explicit per-run values derived from the global configuration.
//!
//! Everything the grading pipeline needs is resolved here once, so the rest
//! of the run never touches the environment.

use common::config::GraderConfig;
use marker::timeliness::Deadline;
use std::path::{Path, PathBuf};
use util::execution_config::ExecutionLimits;
use util::git_history::BotFilter;

#[derive(Debug, Clone)]
pub struct GradingSettings {
    pub lab_name: String,
    pub student_id: String,
    pub deadline: Deadline,
    /// The deadline as configured, shown verbatim in the feedback document.
    pub due_iso: String,
    pub submission_root: PathBuf,
    pub artifacts_dir: PathBuf,
    pub step_summary: Option<PathBuf>,
    pub bot_filter: BotFilter,
    /// `None` grades from source text only.
    pub sandbox: Option<ExecutionLimits>,
}

impl GradingSettings {
    /// Resolve settings from configuration. Bad values fall back to defaults
    /// with a warning rather than stopping the run.
    pub fn from_config(cfg: &GraderConfig) -> Self {
        let deadline = Deadline::parse(&cfg.due_iso).unwrap_or_else(|e| {
            tracing::warn!("{}; using the default deadline", e);
            Deadline::default()
        });

        let limits = match &cfg.execution_config_path {
            Some(path) => ExecutionLimits::load(Path::new(path)).unwrap_or_else(|e| {
                tracing::warn!("{}; using default sandbox limits", e);
                ExecutionLimits::default()
            }),
            None => ExecutionLimits::default(),
        };

        let bot_filter = cfg
            .bot_signals
            .as_deref()
            .map(BotFilter::from_csv)
            .unwrap_or_default();

        Self {
            lab_name: cfg.lab_name.clone(),
            student_id: cfg.student_id(),
            deadline,
            due_iso: cfg.due_iso.clone(),
            submission_root: PathBuf::from(&cfg.submission_root),
            artifacts_dir: PathBuf::from(&cfg.artifacts_dir),
            step_summary: cfg.github_step_summary.as_ref().map(PathBuf::from),
            bot_filter,
            sandbox: Some(limits),
        }
    }

    /// Same settings, graded without running the code.
    pub fn static_only(mut self) -> Self {
        self.sandbox = None;
        self
    }

    pub fn csv_path(&self) -> PathBuf {
        self.artifacts_dir.join("grade.csv")
    }

    pub fn feedback_path(&self) -> PathBuf {
        self.artifacts_dir.join("feedback").join("README.md")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> GraderConfig {
        GraderConfig {
            lab_name: "4.2 JS Advance".into(),
            due_iso: "2025-09-17T23:59:00+03:00".into(),
            artifacts_dir: "out".into(),
            submission_root: "repo".into(),
            log_level: "info".into(),
            log_dir: "logs".into(),
            log_file: "grader.log".into(),
            log_to_stdout: false,
            student_username: None,
            github_repository: "org/lab-4-2-sara".into(),
            github_actor: None,
            github_step_summary: Some("summary.md".into()),
            execution_config_path: None,
            bot_signals: Some("ci-bot, Robot".into()),
        }
    }

    #[test]
    fn test_from_config() {
        let s = GradingSettings::from_config(&cfg());
        assert_eq!(s.student_id, "sara");
        assert_eq!(s.csv_path(), PathBuf::from("out/grade.csv"));
        assert_eq!(s.feedback_path(), PathBuf::from("out/feedback/README.md"));
        assert_eq!(s.step_summary, Some(PathBuf::from("summary.md")));
        assert_eq!(s.bot_filter.signals(), &["ci-bot".to_string(), "robot".to_string()]);
        assert_eq!(s.sandbox, Some(ExecutionLimits::default()));
        assert!(s.static_only().sandbox.is_none());
    }

    #[test]
    fn test_bad_deadline_falls_back() {
        let s = GradingSettings::from_config(&GraderConfig {
            due_iso: "soon".into(),
            ..cfg()
        });
        assert_eq!(s.deadline, Deadline::default());
        assert_eq!(s.due_iso, "soon");
    }
}
