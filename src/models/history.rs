use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Number of characters kept in a history preview
pub const PREVIEW_CHARS: usize = 100;
/// Marker appended to previews of longer code
pub const PREVIEW_ELLIPSIS: &str = "...";

/// A retained record of a past analysis request.
///
/// Serialized field names are camelCase, like the store's other keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Creation time in Unix milliseconds
    pub id: i64,
    /// Local display string captured at creation
    pub timestamp: String,
    pub language: String,
    /// Truncated preview of the submitted code
    pub code: String,
    #[serde(rename = "fullCode")]
    pub full_code: String,
    #[serde(rename = "bugCount", default)]
    pub bug_count: usize,
}

impl HistoryEntry {
    /// Build an entry for code submitted at `created`
    pub fn new(language: &str, code: &str, bug_count: usize, created: DateTime<Utc>) -> Self {
        Self {
            id: created.timestamp_millis(),
            timestamp: created.with_timezone(&Local).format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
            language: language.to_string(),
            code: preview(code),
            full_code: code.to_string(),
            bug_count,
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.id)
    }
}

/// First [`PREVIEW_CHARS`] characters of `code`, plus an ellipsis if anything was cut
pub fn preview(code: &str) -> String {
    match code.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{}", &code[..cut], PREVIEW_ELLIPSIS),
        None => code.to_string(),
    }
}
