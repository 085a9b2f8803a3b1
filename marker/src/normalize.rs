//! Text normalisation applied before any pattern search.
//!
//! Comment removal is regex based and deliberately not string-aware: a `//`
//! only starts a comment at the beginning of a line or after whitespace, which
//! keeps URLs such as `http://host` intact in the common case.

use once_cell::sync::Lazy;
use regex::Regex;

/// Submissions shorter than this after normalisation count as empty.
pub const EMPTY_THRESHOLD: usize = 10;

static BLOCK_COMMENT: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").ok());
static LINE_COMMENT: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"(?m)(^|\s)//.*$").ok());
static WHITESPACE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"\s+").ok());

/// Remove block comments, then line comments (the whitespace before `//` is kept).
pub fn strip_comments(code: &str) -> String {
    let without_blocks = match BLOCK_COMMENT.as_ref() {
        Some(re) => re.replace_all(code, ""),
        None => code.into(),
    };
    match LINE_COMMENT.as_ref() {
        Some(re) => re.replace_all(&without_blocks, "$1").into_owned(),
        None => without_blocks.into_owned(),
    }
}

/// Collapse every whitespace run to a single space and trim the ends.
pub fn compact_whitespace(s: &str) -> String {
    match WHITESPACE.as_ref() {
        Some(re) => re.replace_all(s, " ").trim().to_string(),
        None => s.split_whitespace().collect::<Vec<_>>().join(" "),
    }
}

/// True when only comments and whitespace (or a handful of characters) remain.
pub fn is_effectively_empty(code: &str) -> bool {
    compact_whitespace(&strip_comments(code)).chars().count() < EMPTY_THRESHOLD
}
