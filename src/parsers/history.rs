use serde_json::Value;

use crate::models::HistoryEntry;

/// Parse the JSON-encoded history list kept in local storage.
///
/// Never fails: a document that is not a JSON array is logged and treated as an
/// empty history, and individual entries that do not match [`HistoryEntry`] are
/// skipped with a warning so one bad record does not hide the rest.
pub fn parse_history_list(raw: &str) -> Vec<HistoryEntry> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    let values = match serde_json::from_str::<Vec<Value>>(raw) {
        Ok(values) => values,
        Err(e) => {
            log::warn!("Stored history is not a JSON array, starting empty: {}", e);
            return Vec::new();
        }
    };

    let total = values.len();
    let entries: Vec<HistoryEntry> = values
        .into_iter()
        .enumerate()
        .filter_map(|(idx, value)| match serde_json::from_value::<HistoryEntry>(value) {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping malformed history entry {}: {}", idx, e);
                None
            }
        })
        .collect();

    if entries.len() < total {
        log::info!("Loaded history: {} entries ({} skipped)", entries.len(), total - entries.len());
    }

    entries
}
