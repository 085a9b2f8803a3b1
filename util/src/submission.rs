//! Locating the student's script inside a checked-out repository.
//!
//! Lookup order:
//! 1. scripts referenced from `index.html` via `<script src="...">`,
//! 2. conventional file names (`script.js`, `app.js`, `main.js`, `index.js`),
//! 3. the first `.js` file in the root directory (by name), never `.cjs`.

use regex::Regex;
use std::{
    fs,
    path::{Component, Path, PathBuf},
};

/// File names tried when the HTML entry point does not reference a usable script.
pub const CONVENTIONAL_NAMES: [&str; 4] = ["script.js", "app.js", "main.js", "index.js"];

/// A located submission and its (possibly empty) contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub path: PathBuf,
    pub source: String,
}

/// Locate the submission under `root` and read it.
///
/// Returns `None` when no candidate file exists. Read failures produce an
/// empty `source`, which the grader classifies as an empty submission.
pub fn locate_submission(root: &Path) -> Option<Submission> {
    let path = guess_script_path(root)?;
    let source = fs::read_to_string(&path).unwrap_or_else(|e| {
        tracing::warn!("Failed to read submission {:?}: {}", path, e);
        String::new()
    });
    Some(Submission { path, source })
}

/// Pick the most likely student script under `root`.
pub fn guess_script_path(root: &Path) -> Option<PathBuf> {
    let index_path = root.join("index.html");
    if index_path.is_file() {
        let html = fs::read_to_string(&index_path).unwrap_or_default();
        for src in find_script_srcs(&html) {
            let Some(resolved) = resolve_from_index(&src, &index_path) else {
                continue;
            };
            if resolved.is_file() && has_extension(&resolved, "js") {
                return Some(resolved);
            }
        }
    }

    for name in CONVENTIONAL_NAMES {
        let candidate = root.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
    }

    let mut entries: Vec<PathBuf> = fs::read_dir(root)
        .ok()?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    entries.sort();

    entries
        .into_iter()
        .find(|p| has_extension(p, "js") && !has_extension(p, "cjs"))
}

/// Remove `<!-- ... -->` blocks so commented-out script tags are ignored.
pub fn strip_html_comments(html: &str) -> String {
    match Regex::new(r"(?s)<!--.*?-->") {
        Ok(re) => re.replace_all(html, "").into_owned(),
        Err(_) => html.to_string(),
    }
}

/// All `src` attributes of external `<script>` tags, in document order.
pub fn find_script_srcs(html: &str) -> Vec<String> {
    let cleaned = strip_html_comments(html);
    let Ok(re) = Regex::new(
        r#"(?i)<script\b[^>]*\bsrc\s*=\s*["']([^"']+)["'][^>]*>\s*</script\s*>"#,
    ) else {
        return Vec::new();
    };

    re.captures_iter(&cleaned)
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// Resolve a script `src` relative to the HTML file that references it.
///
/// Remote URLs resolve to `None`. A leading `/` is treated as repository-relative.
pub fn resolve_from_index(src: &str, index_path: &Path) -> Option<PathBuf> {
    let lower = src.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return None;
    }
    let base = index_path.parent().unwrap_or_else(|| Path::new(""));
    let cleaned = src.strip_prefix('/').unwrap_or(src);
    Some(normalize(&base.join(cleaned)))
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}
