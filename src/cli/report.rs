//! Plain-text rendering of an analysis for the non-interactive CLI

use crate::playground::metrics::CodeMetrics;
use crate::playground::view::{BUG_TABLE_COLUMNS, BugTableRow, NO_BUGS_MESSAGE};
use crate::playground::{AnalysisView, Status};
use crate::utils::sanitize_remote_text;

const LINE_WIDTH: usize = 6;
const TYPE_WIDTH: usize = 13;

/// Full report: status line, bug table, then each section the analyzer sent
pub fn render_report(status: Option<&Status>, view: &AnalysisView) -> String {
    let mut out = String::new();

    if let Some(status) = status {
        out.push_str(&format!("{}\n\n", sanitize_remote_text(&status.text)));
    }

    out.push_str(&render_bug_table(&view.bug_rows));

    if let Some(explanation) = &view.explanation {
        push_section(&mut out, "Explanation", explanation);
    }
    if let Some(fixed) = &view.fixed_code {
        push_section(&mut out, "Fixed code", fixed);
    }
    if let Some(optimized) = &view.optimized_code {
        push_section(&mut out, "Optimized code", optimized);
    }

    if view.time_complexity.is_some() || view.space_complexity.is_some() {
        out.push_str("\nComplexity\n");
        if let Some(time) = &view.time_complexity {
            out.push_str(&format!("  Time: {}\n", sanitize_remote_text(time)));
        }
        if let Some(space) = &view.space_complexity {
            out.push_str(&format!("  Space: {}\n", sanitize_remote_text(space)));
        }
    }

    if !view.tests.is_empty() {
        out.push_str("\nGenerated tests\n");
        for test in &view.tests {
            out.push_str(&format!("  - {}\n", sanitize_remote_text(test)));
        }
    }

    out
}

fn table_row(line: &str, kind: &str, message: &str) -> String {
    format!("{:<lw$}{:<tw$}{}\n", line, kind, message, lw = LINE_WIDTH, tw = TYPE_WIDTH)
}

/// Bug table without the Details column, which only has meaning on screen
pub fn render_bug_table(rows: &[BugTableRow]) -> String {
    let mut out = table_row(BUG_TABLE_COLUMNS[0], BUG_TABLE_COLUMNS[1], BUG_TABLE_COLUMNS[2]);

    for row in rows {
        match row {
            BugTableRow::Bug(bug) => out.push_str(&table_row(
                &bug.line.to_string(),
                &sanitize_remote_text(&bug.kind),
                &sanitize_remote_text(&bug.message),
            )),
            BugTableRow::NoBugs => {
                out.push_str(NO_BUGS_MESSAGE);
                out.push('\n');
            }
        }
    }
    out
}

fn push_section(out: &mut String, title: &str, body: &str) {
    out.push_str(&format!("\n{}\n", title));
    for line in sanitize_remote_text(body).lines() {
        out.push_str(&format!("  {}\n", line));
    }
}

pub fn render_metrics(metrics: &CodeMetrics) -> String {
    format!(
        "Lines: {}\nCharacters: {}\nFunctions: {}\nComplexity: {}\n",
        metrics.lines, metrics.chars, metrics.functions, metrics.complexity
    )
}
