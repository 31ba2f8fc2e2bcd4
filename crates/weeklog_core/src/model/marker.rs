//! Routing marker grammar.
//!
//! # Responsibility
//! - Recognize one leading `[code]` token in task text.
//! - Produce the display form with the token stripped.
//!
//! # Invariants
//! - Extraction is deterministic: identical text always yields the same code.
//! - Malformed brackets are treated as unprefixed text, never as an error.

use once_cell::sync::Lazy;
use regex::Regex;

/// A marker is a leading bracketed alphanumeric run, e.g. `[ops]`.
/// Case is preserved; matching against the project directory is case-sensitive.
static MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[([A-Za-z0-9]+)\]").expect("marker pattern is valid"));

/// Extracts the routing code from task text, if present.
///
/// The text is trimmed before matching, so indentation and trailing spaces do
/// not affect recognition. Returns `None` for unmarked or malformed text
/// (e.g. an unmatched `[` or an empty `[]`).
pub fn extract_prefix(text: &str) -> Option<&str> {
    MARKER_RE
        .captures(text.trim())
        .and_then(|caps| caps.get(1))
        .map(|code| code.as_str())
}

/// Returns the display form of task text: trimmed, with the marker token and
/// the single whitespace run after it removed.
///
/// Unmarked text is returned trimmed but otherwise unchanged.
pub fn strip_marker(text: &str) -> &str {
    let trimmed = text.trim();
    match MARKER_RE.find(trimmed) {
        Some(token) => trimmed[token.end()..].trim_start(),
        None => trimmed,
    }
}
