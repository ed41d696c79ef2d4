use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Overrides the data directory (also settable with `--data-dir`)
pub const DATA_DIR_ENV: &str = "DEBUG_PLAYGROUND_HOME";

const APP_DIR_NAME: &str = "ai-debug-playground";

/// Resolve the data directory holding the local store and log file.
///
/// Precedence: explicit path, then `DEBUG_PLAYGROUND_HOME`, then the
/// platform data directory joined with `ai-debug-playground`.
pub fn get_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let base = dirs::data_dir().context("Failed to get platform data directory")?;
    Ok(base.join(APP_DIR_NAME))
}
