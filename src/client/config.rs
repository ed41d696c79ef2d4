use std::time::Duration;

use anyhow::{Result, bail};

/// Analyzer location used when neither a flag nor the environment sets one
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
/// The analyzer runs an LLM round trip; allow it time
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const DEBUG_PATH: &str = "/api/debug";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Validate and normalise a base URL (trailing slashes are dropped)
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            bail!("Analyzer base URL cannot be empty");
        }
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            bail!("Analyzer base URL must start with http:// or https://: {}", trimmed);
        }
        if timeout_secs == 0 {
            bail!("Request timeout must be at least one second");
        }

        Ok(Self { base_url: trimmed.to_string(), timeout: Duration::from_secs(timeout_secs) })
    }

    pub fn debug_url(&self) -> String {
        format!("{}{}", self.base_url, DEBUG_PATH)
    }

    pub fn health_url(&self) -> String {
        format!("{}/", self.base_url)
    }
}
