//! Best-effort recovery of a line number from a bug message

use std::sync::LazyLock;

use regex::Regex;

static LINE_WORD_THEN_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)line\s+(\d+)").expect("valid regex"));
static DIGITS_THEN_LINE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d+)\s*(?:line|ln)").expect("valid regex"));

/// Find a line number mentioned in `message`.
///
/// Tries "line 42" first, then "42 line" / "42ln". Returns the digits as written.
pub fn recover_line(message: &str) -> Option<&str> {
    LINE_WORD_THEN_DIGITS
        .captures(message)
        .or_else(|| DIGITS_THEN_LINE_WORD.captures(message))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
