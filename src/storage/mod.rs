//! Persistent local storage
//!
//! A small string-keyed store standing in for browser local storage. All keys
//! live in one JSON document, `local-storage.json`, inside the data directory:
//! - Linux: `~/.local/share/ai-debug-playground/`
//! - macOS: `~/Library/Application Support/ai-debug-playground/`
//! - Windows: `%APPDATA%\ai-debug-playground\`
//!
//! Writes are synchronous and atomic (temp file + rename). There is no
//! cross-process coordination; the last writer wins.

pub mod history;
pub mod local_store;
pub mod settings;

pub use history::{MAX_HISTORY_ENTRIES, clear_history, find_entry, load_history, push_entry, record};
pub use local_store::{LocalStore, keys};
pub use settings::{
    load_last_code, load_settings, save_last_code, set_auto_analyze, set_auto_save,
    set_default_language, set_show_metrics, set_theme, toggle_theme,
};
