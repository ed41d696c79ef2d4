//! Settings load/save on top of [`LocalStore`]
//!
//! Every setting is its own key and defaults independently:
//! - `theme`: stored value, `dark` when absent or unrecognised
//! - `defaultLanguage`: stored value, `Python` when absent or empty
//! - `autoAnalyze`: on only when the stored value is exactly `"true"`
//! - `autoSave`, `showMetrics`: off only when the stored value is exactly `"false"`

use anyhow::Result;

use super::local_store::{LocalStore, keys};
use crate::models::{DEFAULT_LANGUAGE, Settings, Theme};

pub fn load_settings(store: &LocalStore) -> Settings {
    let theme = match store.get(keys::THEME) {
        Some(raw) => raw.parse::<Theme>().unwrap_or_else(|e| {
            log::warn!("{}; using dark theme", e);
            Theme::Dark
        }),
        None => Theme::Dark,
    };

    let default_language = store
        .get(keys::DEFAULT_LANGUAGE)
        .filter(|l| !l.trim().is_empty())
        .unwrap_or(DEFAULT_LANGUAGE)
        .to_string();

    Settings {
        theme,
        default_language,
        auto_analyze: store.get(keys::AUTO_ANALYZE) == Some("true"),
        auto_save: store.get(keys::AUTO_SAVE) != Some("false"),
        show_metrics: store.get(keys::SHOW_METRICS) != Some("false"),
    }
}

pub fn set_theme(store: &mut LocalStore, settings: &mut Settings, theme: Theme) -> Result<()> {
    settings.theme = theme;
    store.set(keys::THEME, theme.as_str())
}

/// Flip between dark and light and persist the result
pub fn toggle_theme(store: &mut LocalStore, settings: &mut Settings) -> Result<Theme> {
    let theme = settings.theme.toggled();
    set_theme(store, settings, theme)?;
    Ok(theme)
}

pub fn set_auto_analyze(store: &mut LocalStore, settings: &mut Settings, on: bool) -> Result<()> {
    settings.auto_analyze = on;
    store.set(keys::AUTO_ANALYZE, on.to_string())
}

pub fn set_auto_save(store: &mut LocalStore, settings: &mut Settings, on: bool) -> Result<()> {
    settings.auto_save = on;
    store.set(keys::AUTO_SAVE, on.to_string())
}

pub fn set_show_metrics(store: &mut LocalStore, settings: &mut Settings, on: bool) -> Result<()> {
    settings.show_metrics = on;
    store.set(keys::SHOW_METRICS, on.to_string())
}

pub fn set_default_language(
    store: &mut LocalStore,
    settings: &mut Settings,
    language: &str,
) -> Result<()> {
    settings.default_language = language.to_string();
    store.set(keys::DEFAULT_LANGUAGE, language)
}

/// Code restored at startup when auto-save is on
pub fn load_last_code(store: &LocalStore, settings: &Settings) -> Option<String> {
    if !settings.auto_save {
        return None;
    }
    store.get(keys::LAST_CODE).filter(|c| !c.is_empty()).map(str::to_string)
}

/// Persist the editor contents; a no-op when auto-save is off
pub fn save_last_code(store: &mut LocalStore, settings: &Settings, code: &str) -> Result<()> {
    if settings.auto_save {
        store.set(keys::LAST_CODE, code)?;
    }
    Ok(())
}
