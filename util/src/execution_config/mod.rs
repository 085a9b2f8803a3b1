//! Sandbox execution limits.
//!
//! `ExecutionLimits` describes how the submitted script may be run: which
//! interpreter binary to use, how long the evaluation may take and how much
//! console output is kept. Every field has a default so a partial JSON file
//! (or none at all) is a valid configuration.

use serde::{Deserialize, Serialize};
use std::{fs, io::ErrorKind, path::Path, time::Duration};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ExecutionLimits {
    /// Budget for evaluating the submission inside the VM context.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Extra wall-clock allowance for interpreter start-up, on top of `timeout_ms`.
    #[serde(default = "default_startup_grace_ms")]
    pub startup_grace_ms: u64,

    /// Interpreter used to host the harness.
    #[serde(default = "default_node_binary")]
    pub node_binary: String,

    /// Captured console lines beyond this count are dropped.
    #[serde(default = "default_max_log_lines")]
    pub max_log_lines: usize,
}

impl Default for ExecutionLimits {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            startup_grace_ms: default_startup_grace_ms(),
            node_binary: default_node_binary(),
            max_log_lines: default_max_log_lines(),
        }
    }
}

impl ExecutionLimits {
    /// Hard wall-clock limit for the whole interpreter process.
    pub fn wall_clock(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.saturating_add(self.startup_grace_ms))
    }

    /// Load limits from a JSON file.
    ///
    /// A missing file yields the defaults; an unreadable or malformed file is an error.
    pub fn load(path: &Path) -> Result<Self, String> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(format!(
                    "Failed to read execution config at {:?} ({})",
                    path,
                    e.kind()
                ));
            }
        };

        serde_json::from_str(&contents)
            .map_err(|e| format!("Invalid execution config JSON at {:?}: {}", path, e))
    }
}

//Default Functions

fn default_timeout_ms() -> u64 {
    800
}

fn default_startup_grace_ms() -> u64 {
    5_000
}

fn default_node_binary() -> String {
    "node".to_string()
}

fn default_max_log_lines() -> usize {
    1_000
}
