//! Analysis history kept under the `codeDebugHistory` key

use anyhow::{Context, Result};
use chrono::Utc;

use super::local_store::{LocalStore, keys};
use crate::models::HistoryEntry;
use crate::parsers::parse_history_list;

/// Most recent entries retained; older ones are evicted from the tail
pub const MAX_HISTORY_ENTRIES: usize = 20;

/// Stored history, newest first
pub fn load_history(store: &LocalStore) -> Vec<HistoryEntry> {
    store.get(keys::HISTORY).map(parse_history_list).unwrap_or_default()
}

/// Insert `entry` at the head and evict from the tail beyond the cap
pub fn push_entry(history: &mut Vec<HistoryEntry>, entry: HistoryEntry) {
    history.insert(0, entry);
    history.truncate(MAX_HISTORY_ENTRIES);
}

/// Record a completed analysis and return the new entry
pub fn record(
    store: &mut LocalStore,
    language: &str,
    code: &str,
    bug_count: usize,
) -> Result<HistoryEntry> {
    let entry = HistoryEntry::new(language, code, bug_count, Utc::now());
    let mut history = load_history(store);
    push_entry(&mut history, entry.clone());

    let json = serde_json::to_string(&history).context("Failed to serialize history")?;
    store.set(keys::HISTORY, json)?;
    log::debug!("Recorded history entry {} ({} total)", entry.id, history.len());
    Ok(entry)
}

pub fn find_entry(store: &LocalStore, id: i64) -> Option<HistoryEntry> {
    load_history(store).into_iter().find(|e| e.id == id)
}

pub fn clear_history(store: &mut LocalStore) -> Result<()> {
    store.remove(keys::HISTORY)
}
