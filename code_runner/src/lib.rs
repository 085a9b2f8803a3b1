//! Node.js-backed [`Sandbox`] for student submissions.
//!
//! Every call creates a fresh temp dir holding the harness and a copy of the
//! submission, starts `node` with a cleared environment and waits for it
//! under a wall-clock limit. The child is killed on drop and the temp dir is
//! removed when it goes out of scope, so both are released on every path.

pub mod harness;

use crate::harness::{HARNESS_FILE, HARNESS_JS, HarnessMode, HarnessReport, SUBMISSION_FILE};
use async_trait::async_trait;
use marker::traits::sandbox::{ExecutionOutcome, Sandbox, SandboxError, SyntaxCheck};
use std::process::Stdio;
use std::time::Duration;
use tempfile::tempdir;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::task::JoinHandle;
use tokio::{fs, process::Command, time::timeout};
use util::execution_config::ExecutionLimits;

/// How long to wait for the pipes to drain once the child is gone.
const PIPE_DRAIN: Duration = Duration::from_secs(1);

/// How one harness process ended.
#[derive(Debug)]
enum Invocation {
    Finished(HarnessReport),
    /// Killed at the wall-clock limit, with whatever report it had printed.
    Killed(Option<HarnessReport>),
}

/// Runs submissions in a Node `vm` context.
#[derive(Debug, Clone, Default)]
pub struct NodeSandbox {
    limits: ExecutionLimits,
}

impl NodeSandbox {
    pub fn new(limits: ExecutionLimits) -> Self {
        Self { limits }
    }

    /// Start the harness once and return how it ended.
    async fn invoke(&self, mode: HarnessMode, source: &str) -> Result<Invocation, SandboxError> {
        let workdir = tempdir()
            .map_err(|e| SandboxError::Unavailable(format!("Failed to create temp dir: {}", e)))?;
        let harness_path = workdir.path().join(HARNESS_FILE);
        let source_path = workdir.path().join(SUBMISSION_FILE);

        fs::write(&harness_path, HARNESS_JS)
            .await
            .map_err(|e| SandboxError::Unavailable(format!("Failed to write harness: {}", e)))?;
        fs::write(&source_path, source)
            .await
            .map_err(|e| SandboxError::Unavailable(format!("Failed to stage submission: {}", e)))?;

        let mut command = Command::new(&self.limits.node_binary);
        command
            .arg(&harness_path)
            .arg(mode.as_arg())
            .arg(&source_path)
            .arg(self.limits.timeout_ms.to_string())
            .arg(self.limits.max_log_lines.to_string())
            .current_dir(workdir.path())
            .env_clear()
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        // Keep PATH so a bare `node` still resolves.
        if let Some(path) = std::env::var_os("PATH") {
            command.env("PATH", path);
        }

        let mut child = command.spawn().map_err(|e| {
            SandboxError::Unavailable(format!(
                "Failed to start '{}': {}",
                self.limits.node_binary, e
            ))
        })?;

        // Drain both pipes in the background so output survives a kill.
        let stdout_reader = tokio::spawn(read_pipe(child.stdout.take()));
        let stderr_reader = tokio::spawn(read_pipe(child.stderr.take()));

        let wall_clock = self.limits.wall_clock();
        let status = match timeout(wall_clock, child.wait()).await {
            Ok(result) => Some(result.map_err(|e| {
                SandboxError::Unavailable(format!("Failed to wait for interpreter: {}", e))
            })?),
            Err(_) => {
                tracing::warn!(mode = mode.as_arg(), "interpreter exceeded {:?}, killed", wall_clock);
                if let Err(e) = child.kill().await {
                    tracing::warn!("failed to kill interpreter: {}", e);
                }
                None
            }
        };

        let stdout = drain(stdout_reader).await;
        let report = HarnessReport::parse(&String::from_utf8_lossy(&stdout));
        match (status, report) {
            (None, report) => Ok(Invocation::Killed(report.ok())),
            (Some(_), Ok(report)) => Ok(Invocation::Finished(report)),
            (Some(status), Err(e)) => {
                let stderr = drain(stderr_reader).await;
                Err(SandboxError::Protocol(format!(
                    "{} (exit code {}):\n{}",
                    e,
                    status.code().unwrap_or(-1),
                    String::from_utf8_lossy(&stderr).trim()
                )))
            }
        }
    }

    fn cap(&self, mut logs: Vec<String>) -> Vec<String> {
        logs.truncate(self.limits.max_log_lines);
        logs
    }
}

/// Read a child pipe to the end, keeping what arrived before any error.
async fn read_pipe<R: AsyncRead + Unpin>(pipe: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        if let Err(e) = pipe.read_to_end(&mut buf).await {
            tracing::debug!("pipe read stopped early: {}", e);
        }
    }
    buf
}

async fn drain(reader: JoinHandle<Vec<u8>>) -> Vec<u8> {
    match timeout(PIPE_DRAIN, reader).await {
        Ok(Ok(buf)) => buf,
        _ => Vec::new(),
    }
}

#[async_trait]
impl Sandbox for NodeSandbox {
    async fn check_syntax(&self, source: &str) -> Result<SyntaxCheck, SandboxError> {
        match self.invoke(HarnessMode::Check, source).await? {
            Invocation::Finished(HarnessReport::Valid) => Ok(SyntaxCheck::Valid),
            Invocation::Finished(HarnessReport::Invalid { message }) => {
                Ok(SyntaxCheck::Invalid { message })
            }
            Invocation::Finished(other) => Err(SandboxError::Protocol(format!(
                "unexpected report for syntax check: {:?}",
                other
            ))),
            Invocation::Killed(_) => Err(SandboxError::Unavailable(format!(
                "syntax check did not finish within {:?}",
                self.limits.wall_clock()
            ))),
        }
    }

    async fn execute(&self, source: &str) -> Result<ExecutionOutcome, SandboxError> {
        let outcome = match self.invoke(HarnessMode::Run, source).await? {
            Invocation::Finished(HarnessReport::Completed { logs }) => ExecutionOutcome::Completed {
                logs: self.cap(logs),
            },
            Invocation::Finished(HarnessReport::Faulted { logs, message }) => {
                ExecutionOutcome::Faulted {
                    logs: self.cap(logs),
                    fault: message,
                }
            }
            Invocation::Finished(HarnessReport::TimedOut { logs }) => ExecutionOutcome::TimedOut {
                logs: self.cap(logs),
                after: Duration::from_millis(self.limits.timeout_ms),
            },
            Invocation::Finished(other) => {
                return Err(SandboxError::Protocol(format!(
                    "unexpected report for execution: {:?}",
                    other
                )));
            }
            Invocation::Killed(report) => ExecutionOutcome::TimedOut {
                logs: self.cap(report.map(HarnessReport::into_logs).unwrap_or_default()),
                after: self.limits.wall_clock(),
            },
        };
        tracing::debug!(lines = outcome.logs().len(), "submission executed");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_interpreter_is_unavailable() {
        let sandbox = NodeSandbox::new(ExecutionLimits {
            node_binary: "definitely-not-a-node-binary".into(),
            ..ExecutionLimits::default()
        });
        let err = sandbox.check_syntax("let a = 1;").await.unwrap_err();
        assert!(matches!(err, SandboxError::Unavailable(_)));
        let err = sandbox.execute("let a = 1;").await.unwrap_err();
        assert!(err.to_string().contains("definitely-not-a-node-binary"));
    }

    /// Stand-in interpreter that prints a report and then hangs.
    #[cfg(unix)]
    fn hanging_interpreter(dir: &std::path::Path) -> String {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join("fake-node");
        std::fs::write(
            &path,
            "#!/bin/sh\necho '{\"status\":\"timed_out\",\"message\":null,\"logs\":[\"early\"]}'\nexec sleep 30\n",
        )
        .unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_killed_interpreter_keeps_printed_logs() {
        let dir = tempdir().unwrap();
        let sandbox = NodeSandbox::new(ExecutionLimits {
            node_binary: hanging_interpreter(dir.path()),
            timeout_ms: 100,
            startup_grace_ms: 300,
            ..ExecutionLimits::default()
        });

        let started = std::time::Instant::now();
        let outcome = sandbox.execute("while (true) {}").await.unwrap();
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(
            outcome,
            ExecutionOutcome::TimedOut {
                logs: vec!["early".to_string()],
                after: Duration::from_millis(400),
            }
        );

        let err = sandbox.check_syntax("let a = 1;").await.unwrap_err();
        assert!(matches!(err, SandboxError::Unavailable(_)));
    }

    #[test]
    fn test_cap_truncates_logs() {
        let sandbox = NodeSandbox::new(ExecutionLimits {
            max_log_lines: 2,
            ..ExecutionLimits::default()
        });
        let logs = sandbox.cap(vec!["a".into(), "b".into(), "c".into()]);
        assert_eq!(logs, vec!["a".to_string(), "b".to_string()]);
    }
}
