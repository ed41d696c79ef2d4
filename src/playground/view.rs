//! View model for a rendered analysis result
//!
//! Pure functions turning an [`AnalysisResult`] into the rows and blocks the
//! TUI and the CLI display. Optional response fields stay optional here: a
//! section is present only if the analyzer sent it.

use std::fmt;

use super::line_hint::recover_line;
use crate::models::{AnalysisResult, Bug, TestCase};

/// Type label used when a bug has none
pub const DEFAULT_BUG_TYPE: &str = "Info";
/// Placeholder for a line cell with nothing to show
pub const LINE_PLACEHOLDER: &str = "-";
/// Text of the single row shown when no bugs were reported
pub const NO_BUGS_MESSAGE: &str = "No bugs detected.";
/// Column headers of the bug table
pub const BUG_TABLE_COLUMNS: [&str; 4] = ["Line", "Type", "Message", "Details"];

/// Contents of a bug's line cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineCell {
    /// Line reported by the analyzer; rendered emphasized
    Reported(u32),
    /// Line recovered from the message text
    Recovered(String),
    /// Nothing known; rendered as a de-emphasized placeholder
    Unknown,
}

impl LineCell {
    pub fn for_bug(bug: &Bug) -> Self {
        if let Some(line) = bug.line {
            return LineCell::Reported(line);
        }
        match bug.message.as_deref().and_then(recover_line) {
            Some(digits) => LineCell::Recovered(digits.to_string()),
            None => LineCell::Unknown,
        }
    }

    pub fn is_emphasized(&self) -> bool {
        matches!(self, LineCell::Reported(_))
    }

    pub fn is_dimmed(&self) -> bool {
        matches!(self, LineCell::Unknown)
    }
}

impl fmt::Display for LineCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineCell::Reported(line) => write!(f, "{}", line),
            LineCell::Recovered(digits) => f.write_str(digits),
            LineCell::Unknown => f.write_str(LINE_PLACEHOLDER),
        }
    }
}

/// Colour class of a bug type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BugCategory {
    Syntax,
    Logic,
    Performance,
    Style,
    Other,
    /// Anything not in the known set, including the default `Info`
    Unclassified,
}

impl BugCategory {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Syntax" => BugCategory::Syntax,
            "Logic" => BugCategory::Logic,
            "Performance" => BugCategory::Performance,
            "Style" => BugCategory::Style,
            "Other" => BugCategory::Other,
            _ => BugCategory::Unclassified,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugRow {
    pub line: LineCell,
    pub kind: String,
    pub category: BugCategory,
    pub message: String,
}

/// One row of the bug table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BugTableRow {
    Bug(BugRow),
    /// Informational row spanning every column
    NoBugs,
}

/// Rows of the bug table: one per bug, or exactly one [`BugTableRow::NoBugs`]
pub fn bug_table_rows(bugs: &[Bug]) -> Vec<BugTableRow> {
    if bugs.is_empty() {
        return vec![BugTableRow::NoBugs];
    }

    bugs.iter()
        .map(|bug| {
            let kind = bug
                .kind
                .as_deref()
                .filter(|k| !k.is_empty())
                .unwrap_or(DEFAULT_BUG_TYPE)
                .to_string();
            BugTableRow::Bug(BugRow {
                line: LineCell::for_bug(bug),
                category: BugCategory::from_label(&kind),
                kind,
                message: bug.message.clone().unwrap_or_default(),
            })
        })
        .collect()
}

/// `<description> | input: <input> | expected: <expected_output>`
pub fn format_test_case(test: &TestCase) -> String {
    format!(
        "{} | input: {} | expected: {}",
        test.description.as_deref().unwrap_or_default(),
        test.input.as_deref().unwrap_or_default(),
        test.expected_output.as_deref().unwrap_or_default()
    )
}

/// Everything the results pane shows for one successful analysis
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalysisView {
    pub bug_rows: Vec<BugTableRow>,
    pub explanation: Option<String>,
    pub fixed_code: Option<String>,
    pub optimized_code: Option<String>,
    pub time_complexity: Option<String>,
    pub space_complexity: Option<String>,
    pub tests: Vec<String>,
}

impl AnalysisView {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let non_empty = |s: &Option<String>| s.clone().filter(|v| !v.is_empty());
        let complexity = result.complexity.clone().unwrap_or_default();

        Self {
            bug_rows: bug_table_rows(result.bugs()),
            explanation: non_empty(&result.explanation),
            fixed_code: non_empty(&result.fixed_code),
            optimized_code: non_empty(&result.optimized_code),
            time_complexity: non_empty(&complexity.time),
            space_complexity: non_empty(&complexity.space),
            tests: result.tests().iter().map(format_test_case).collect(),
        }
    }

    pub fn bug_count(&self) -> usize {
        self.bug_rows.iter().filter(|r| matches!(r, BugTableRow::Bug(_))).count()
    }
}
