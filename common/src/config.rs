//! Global grader configuration.
//!
//! `GraderConfig` is a lazily initialized, globally accessible singleton
//! containing runtime configuration values loaded from `.env` and environment
//! variables. It provides thread-safe access and per-field overrides for tests.
//!
//! Library code never reads this singleton directly: the binary turns it into
//! explicit values (deadline, bot filter, sandbox limits) and passes them down.

use std::env;
use std::sync::{OnceLock, RwLock};

/// Represents the complete grader configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct GraderConfig {
    pub lab_name: String,
    pub due_iso: String,
    pub artifacts_dir: String,
    pub submission_root: String,
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub student_username: Option<String>,
    pub github_repository: String,
    pub github_actor: Option<String>,
    pub github_step_summary: Option<String>,
    pub execution_config_path: Option<String>,
    pub bot_signals: Option<String>,
}

/// Filter used when `LOG_LEVEL` is unset. Covers every crate of the grader.
pub const DEFAULT_LOG_LEVEL: &str = "grader=info,marker=info,util=info,code_runner=info";

/// Lazily-initialized, thread-safe singleton instance of `GraderConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<GraderConfig>> = OnceLock::new();

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl GraderConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Every value has a default, so loading never fails.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            lab_name: env::var("LAB_NAME").unwrap_or_else(|_| "4.2 JS Advance".into()),
            due_iso: env::var("DUE_ISO").unwrap_or_else(|_| "2025-09-17T23:59:00+03:00".into()),
            artifacts_dir: env::var("ARTIFACTS_DIR").unwrap_or_else(|_| "artifacts".into()),
            submission_root: env::var("SUBMISSION_ROOT").unwrap_or_else(|_| ".".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.into()),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "grader.log".into()),
            log_to_stdout: env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true",
            student_username: non_empty("STUDENT_USERNAME"),
            github_repository: env::var("GITHUB_REPOSITORY").unwrap_or_default(),
            github_actor: non_empty("GITHUB_ACTOR"),
            github_step_summary: non_empty("GITHUB_STEP_SUMMARY"),
            execution_config_path: non_empty("EXECUTION_CONFIG"),
            bot_signals: non_empty("BOT_SIGNALS"),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock is poisoned.
    pub fn global() -> std::sync::RwLockReadGuard<'static, GraderConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(GraderConfig::from_env()))
            .read()
            .expect("Failed to acquire GraderConfig read lock")
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock
                .write()
                .expect("Failed to acquire GraderConfig write lock");
            *guard = GraderConfig::from_env();
        }
    }

    /// Generic internal setter for any field in the config.
    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut GraderConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(GraderConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire GraderConfig write lock");
        setter(&mut guard);
    }

    /// Repository name without the owner (`org/repo` → `repo`).
    pub fn repo_name(&self) -> &str {
        match self.github_repository.split_once('/') {
            Some((_, name)) => name,
            None => &self.github_repository,
        }
    }

    /// Identifier written to the CSV record.
    ///
    /// Classroom repositories end with the student's username (`lab-4-2-sara`),
    /// so the suffix after the last `-` is preferred to the workflow actor.
    pub fn student_id(&self) -> String {
        if let Some(name) = &self.student_username {
            return name.clone();
        }
        let repo = self.repo_name();
        if repo.contains('-') {
            if let Some(suffix) = repo.rsplit('-').next().filter(|s| !s.is_empty()) {
                return suffix.to_string();
            }
        }
        if let Some(actor) = &self.github_actor {
            return actor.clone();
        }
        if !repo.is_empty() {
            return repo.to_string();
        }
        "student".to_string()
    }

    // --- Per-field setters below ---

    pub fn set_lab_name(value: impl Into<String>) {
        GraderConfig::set_field(|cfg| cfg.lab_name = value.into());
    }
}
