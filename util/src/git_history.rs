//! Version-control history inspection.
//!
//! The submission time is taken from the most recent commit made by the
//! student rather than by automation (classroom bots, CI workflows). This
//! module reads `git log`, filters out bot-like commits and describes the
//! chosen commit for the feedback document.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::{path::Path, process::Stdio};
use tokio::process::Command;

/// Number of commits inspected, newest first.
pub const HISTORY_DEPTH: usize = 500;

/// Field separator used in the `git log` format string.
const FIELD_SEPARATOR: char = '|';

/// Substrings marking a commit as authored by automation.
pub const DEFAULT_BOT_SIGNALS: [&str; 8] = [
    "[bot]",
    "github-actions",
    "actions@github.com",
    "github classroom",
    "classroom[bot]",
    "dependabot",
    "autograding",
    "workflow",
];

/// One line of `git log` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub sha: String,
    /// `None` when the committer timestamp could not be parsed.
    pub timestamp: Option<DateTime<Utc>>,
    pub author: String,
    pub email: String,
    pub subject: String,
}

impl CommitRecord {
    /// Parse a `%H|%ct|%an|%ae|%s` line. The subject may itself contain `|`.
    pub fn parse_line(line: &str) -> Self {
        let mut parts = line.splitn(5, FIELD_SEPARATOR);
        let sha = parts.next().unwrap_or_default().trim().to_string();
        let timestamp = parts
            .next()
            .and_then(|ct| ct.trim().parse::<i64>().ok())
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));
        let author = parts.next().unwrap_or_default().to_string();
        let email = parts.next().unwrap_or_default().to_string();
        let subject = parts.next().unwrap_or_default().to_string();

        CommitRecord {
            sha,
            timestamp,
            author,
            email,
            subject,
        }
    }
}

/// Parse the full output of `git log`, skipping blank lines.
pub fn parse_log(output: &str) -> Vec<CommitRecord> {
    output
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(CommitRecord::parse_line)
        .collect()
}

/// Decides whether a commit was made by automation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotFilter {
    signals: Vec<String>,
}

impl Default for BotFilter {
    fn default() -> Self {
        Self::new(DEFAULT_BOT_SIGNALS.iter().map(|s| s.to_string()))
    }
}

impl BotFilter {
    pub fn new<I: IntoIterator<Item = String>>(signals: I) -> Self {
        Self {
            signals: signals
                .into_iter()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Build a filter from a comma-separated list (e.g. from the environment).
    pub fn from_csv(csv: &str) -> Self {
        Self::new(csv.split(',').map(str::to_string))
    }

    pub fn signals(&self) -> &[String] {
        &self.signals
    }

    /// Matches against the lower-cased `author email subject` haystack.
    pub fn is_bot(&self, commit: &CommitRecord) -> bool {
        let hay = format!("{} {} {}", commit.author, commit.email, commit.subject).to_lowercase();
        self.signals.iter().any(|s| hay.contains(s.as_str()))
    }
}

/// The commit chosen to timestamp the submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitInfo {
    pub sha: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub author: String,
    pub email: String,
    pub subject: String,
    /// True when no human commit could be identified.
    pub used_fallback: bool,
    pub note: String,
}

impl CommitInfo {
    /// Placeholder used whenever history is unavailable.
    pub fn unknown(note: impl Into<String>) -> Self {
        CommitInfo {
            sha: "unknown".to_string(),
            timestamp: None,
            author: "unknown".to_string(),
            email: "unknown".to_string(),
            subject: String::new(),
            used_fallback: true,
            note: note.into(),
        }
    }

    /// ISO-8601 UTC rendering of the timestamp, or `"unknown"`.
    pub fn iso(&self) -> String {
        self.timestamp
            .map(|t| t.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
            .unwrap_or_else(|| "unknown".to_string())
    }

    fn from_record(record: &CommitRecord, used_fallback: bool, note: &str) -> Self {
        let or_unknown = |s: &str| {
            if s.is_empty() {
                "unknown".to_string()
            } else {
                s.to_string()
            }
        };
        CommitInfo {
            sha: or_unknown(&record.sha),
            timestamp: record.timestamp,
            author: or_unknown(&record.author),
            email: or_unknown(&record.email),
            subject: record.subject.clone(),
            used_fallback,
            note: note.to_string(),
        }
    }
}

/// Pick the newest non-bot commit with a valid timestamp.
///
/// If every commit looks automated, the newest commit is used and the result
/// is flagged with `used_fallback`.
pub fn select_qualifying_commit(history: &[CommitRecord], filter: &BotFilter) -> CommitInfo {
    let Some(newest) = history.first() else {
        return CommitInfo::unknown("git log returned no commits");
    };

    let human = history
        .iter()
        .filter(|c| !filter.is_bot(c))
        .find(|c| c.timestamp.is_some());

    match human {
        Some(commit) => CommitInfo::from_record(commit, false, "selected latest non-bot commit"),
        None => CommitInfo::from_record(
            newest,
            true,
            "all commits looked bot-like; using latest commit as fallback",
        ),
    }
}

/// Run `git log` in `repo_dir` and parse the newest [`HISTORY_DEPTH`] commits.
pub async fn read_commit_history(repo_dir: &Path) -> Result<Vec<CommitRecord>, String> {
    let output = Command::new("git")
        .arg("log")
        .arg("--format=%H|%ct|%an|%ae|%s")
        .arg("-n")
        .arg(HISTORY_DEPTH.to_string())
        .current_dir(repo_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
        .await
        .map_err(|e| format!("Failed to run git: {}", e))?;

    if !output.status.success() {
        return Err(format!(
            "git log exited with code {}",
            output.status.code().unwrap_or(-1)
        ));
    }

    Ok(parse_log(&String::from_utf8_lossy(&output.stdout)))
}

/// Inspect history and describe the qualifying commit. Never fails: git
/// problems are reported through [`CommitInfo::note`].
pub async fn latest_student_commit(repo_dir: &Path, filter: &BotFilter) -> CommitInfo {
    match read_commit_history(repo_dir).await {
        Ok(history) => select_qualifying_commit(&history, filter),
        Err(e) => {
            tracing::warn!("git inspection failed: {}", e);
            CommitInfo::unknown(format!("git inspection failed: {}", e))
        }
    }
}
