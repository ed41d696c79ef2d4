use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};

/// Language selected when nothing has been stored
pub const DEFAULT_LANGUAGE: &str = "Python";

/// Languages offered by the language selector, in cycling order
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "Python",
    "JavaScript",
    "TypeScript",
    "Java",
    "C",
    "C++",
    "C#",
    "Go",
    "Rust",
    "PHP",
    "Ruby",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => bail!("Unknown theme '{}' (expected 'dark' or 'light')", other),
        }
    }
}

/// Flat user preferences.
///
/// Each field is persisted under its own key and defaults on its own when the
/// key is absent; see [`crate::storage::settings`] for the load/save rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub theme: Theme,
    pub default_language: String,
    pub auto_analyze: bool,
    pub auto_save: bool,
    pub show_metrics: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            default_language: DEFAULT_LANGUAGE.to_string(),
            auto_analyze: false,
            auto_save: true,
            show_metrics: true,
        }
    }
}

/// Next language after `current` in [`SUPPORTED_LANGUAGES`], wrapping around.
/// Unknown languages restart at the first entry.
pub fn next_language(current: &str) -> &'static str {
    let idx = SUPPORTED_LANGUAGES.iter().position(|l| l.eq_ignore_ascii_case(current));
    match idx {
        Some(i) => SUPPORTED_LANGUAGES[(i + 1) % SUPPORTED_LANGUAGES.len()],
        None => SUPPORTED_LANGUAGES[0],
    }
}

/// Canonical spelling of `name` if it is a supported language (case-insensitive)
pub fn canonical_language(name: &str) -> Option<&'static str> {
    let name = name.trim();
    SUPPORTED_LANGUAGES.iter().copied().find(|l| l.eq_ignore_ascii_case(name))
}
