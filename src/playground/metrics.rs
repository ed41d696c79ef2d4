//! Rough code metrics shown under the editor
//!
//! These are regex counts, not parses: "def" inside "undefined" counts as a
//! function. They are cheap enough to recompute on every debounced edit.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static FUNCTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"function|def|const.*=.*=>|\w+\s*\(").expect("valid regex"));
static LOOP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)for|while|foreach").expect("valid regex"));
static CONDITION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)if|else|switch|case").expect("valid regex"));

const MEDIUM_THRESHOLD: usize = 5;
const HIGH_THRESHOLD: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplexityLabel {
    Low,
    Medium,
    High,
}

impl ComplexityLabel {
    /// Label for a combined loop + condition count
    pub fn from_score(score: usize) -> Self {
        if score > HIGH_THRESHOLD {
            ComplexityLabel::High
        } else if score > MEDIUM_THRESHOLD {
            ComplexityLabel::Medium
        } else {
            ComplexityLabel::Low
        }
    }
}

impl fmt::Display for ComplexityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ComplexityLabel::Low => "Low",
            ComplexityLabel::Medium => "Medium",
            ComplexityLabel::High => "High",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeMetrics {
    pub lines: usize,
    pub chars: usize,
    pub functions: usize,
    pub complexity: ComplexityLabel,
}

impl Default for CodeMetrics {
    fn default() -> Self {
        compute_metrics("")
    }
}

/// Number of lines as the gutter counts them (an empty buffer has one line)
pub fn line_count(code: &str) -> usize {
    code.split('\n').count()
}

pub fn compute_metrics(code: &str) -> CodeMetrics {
    let loops = LOOP_PATTERN.find_iter(code).count();
    let conditions = CONDITION_PATTERN.find_iter(code).count();

    CodeMetrics {
        lines: line_count(code),
        chars: code.chars().count(),
        functions: FUNCTION_PATTERN.find_iter(code).count(),
        complexity: ComplexityLabel::from_score(loops + conditions),
    }
}
