//! Writing the run's outputs to disk.
//!
//! Every write is attempted even if an earlier one failed; the failures are
//! returned together so the caller can decide on the exit code.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Write `contents` to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

/// Append `contents` to `path`, creating the file if it does not exist.
pub fn append_file(path: &Path, contents: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to append to {}", path.display()))
}

/// One pending output of a run.
pub enum Artifact<'a> {
    Write { path: &'a Path, contents: &'a str },
    Append { path: &'a Path, contents: &'a str },
}

/// Attempt every artifact; collect the failures.
pub fn write_all(artifacts: &[Artifact<'_>]) -> Vec<anyhow::Error> {
    let mut failures = Vec::new();
    for artifact in artifacts {
        let (result, path) = match artifact {
            Artifact::Write { path, contents } => (write_file(path, contents), path),
            Artifact::Append { path, contents } => (append_file(path, contents), path),
        };
        match result {
            Ok(()) => tracing::debug!(path = %path.display(), "artifact written"),
            Err(e) => {
                tracing::error!("{:#}", e);
                failures.push(e);
            }
        }
    }
    failures
}
