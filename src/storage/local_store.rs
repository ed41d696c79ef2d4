//! String-keyed store persisted as one JSON document

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const STORE_FILENAME: &str = "local-storage.json";

/// Persisted key names
pub mod keys {
    pub const HISTORY: &str = "codeDebugHistory";
    pub const THEME: &str = "theme";
    pub const AUTO_ANALYZE: &str = "autoAnalyze";
    pub const DEFAULT_LANGUAGE: &str = "defaultLanguage";
    pub const AUTO_SAVE: &str = "autoSave";
    pub const SHOW_METRICS: &str = "showMetrics";
    pub const LAST_CODE: &str = "lastCode";
}

/// In-memory view of the store, written through to disk on every mutation
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl LocalStore {
    /// Open (or create) the store in `data_dir`.
    ///
    /// A missing file is an empty store. A corrupt file is logged and treated
    /// as empty; it is replaced on the next write.
    pub fn open(data_dir: &Path) -> Result<Self> {
        if !data_dir.exists() {
            fs::create_dir_all(data_dir).with_context(|| {
                format!("Failed to create data directory: {}", data_dir.display())
            })?;
        }

        let path = data_dir.join(STORE_FILENAME);
        let values = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read store: {}", path.display()))?;
            match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
                Ok(values) => values,
                Err(e) => {
                    log::warn!("Ignoring corrupt store {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        log::debug!("Opened local store {} ({} keys)", path.display(), values.len());
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        self.values.insert(key.to_string(), value.into());
        self.flush()
    }

    pub fn remove(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    /// Write the whole document atomically (temp file + rename)
    fn flush(&self) -> Result<()> {
        let temp = self.path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(&self.values).context("Failed to serialize store")?;
        fs::write(&temp, json)
            .with_context(|| format!("Failed to write store temp file: {}", temp.display()))?;
        fs::rename(&temp, &self.path)
            .with_context(|| format!("Failed to replace store: {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_open_creates_missing_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested").join("data");

        let store = LocalStore::open(&dir).unwrap();
        assert!(dir.exists());
        assert_eq!(store.get(keys::THEME), None);
    }

    #[test]
    fn test_set_persists_across_reopen() {
        let temp = TempDir::new().unwrap();

        let mut store = LocalStore::open(temp.path()).unwrap();
        store.set(keys::THEME, "light").unwrap();
        store.set(keys::AUTO_ANALYZE, "true").unwrap();

        let reopened = LocalStore::open(temp.path()).unwrap();
        assert_eq!(reopened.get(keys::THEME), Some("light"));
        assert_eq!(reopened.get(keys::AUTO_ANALYZE), Some("true"));
    }

    #[test]
    fn test_remove_key() {
        let temp = TempDir::new().unwrap();
        let mut store = LocalStore::open(temp.path()).unwrap();
        store.set(keys::LAST_CODE, "x = 1").unwrap();
        store.remove(keys::LAST_CODE).unwrap();

        let reopened = LocalStore::open(temp.path()).unwrap();
        assert_eq!(reopened.get(keys::LAST_CODE), None);
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let temp = TempDir::new().unwrap();
        let mut store = LocalStore::open(temp.path()).unwrap();
        assert!(store.remove("nope").is_ok());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_corrupt_file_treated_as_empty() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(STORE_FILENAME), "{not json").unwrap();

        let mut store = LocalStore::open(temp.path()).unwrap();
        assert_eq!(store.get(keys::THEME), None);

        // Next write replaces the corrupt document
        store.set(keys::THEME, "dark").unwrap();
        let reopened = LocalStore::open(temp.path()).unwrap();
        assert_eq!(reopened.get(keys::THEME), Some("dark"));
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp = TempDir::new().unwrap();
        let mut store = LocalStore::open(temp.path()).unwrap();
        store.set(keys::THEME, "dark").unwrap();

        assert!(!temp.path().join("local-storage.json.tmp").exists());
    }
}
