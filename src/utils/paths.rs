use std::borrow::Cow;
use std::env;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Largest source file accepted for analysis: 1MB
const MAX_SOURCE_BYTES: u64 = 1024 * 1024;

/// Read source code from `path`, or from stdin when `path` is `None` or `-`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, is larger than 1MB, or is
/// not valid UTF-8.
pub fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => {
            let file = File::open(p)
                .with_context(|| format!("Failed to open source file: {}", p.display()))?;
            validate_file_size(&file, p)?;
            fs::read_to_string(p)
                .with_context(|| format!("Failed to read source file: {}", p.display()))
        }
        _ => {
            let mut code = String::new();
            io::stdin()
                .take(MAX_SOURCE_BYTES + 1)
                .read_to_string(&mut code)
                .context("Failed to read code from stdin")?;
            if code.len() as u64 > MAX_SOURCE_BYTES {
                bail!("Input too large (max {} bytes)", MAX_SOURCE_BYTES);
            }
            Ok(code)
        }
    }
}

/// Validates that a file's size is within the source limit.
///
/// Takes an open file handle so the size checked is the size of the file
/// actually opened.
pub fn validate_file_size(file: &File, path: &Path) -> Result<()> {
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    let file_size = metadata.len();
    if file_size > MAX_SOURCE_BYTES {
        bail!(
            "File too large: {} ({} bytes, max {} bytes)",
            path.display(),
            file_size,
            MAX_SOURCE_BYTES
        );
    }

    Ok(())
}

/// Formats a path with ~ substitution for the home directory
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, None)
}

pub(crate) fn format_path_with_tilde_internal(path: &Path, home_override: Option<&str>) -> String {
    let home_from_env = env::var("HOME").ok();
    let home = home_override.or(home_from_env.as_deref());

    let path_str = path.to_string_lossy();
    if let Some(home) = home
        && !home.is_empty()
        && path_str.starts_with(home)
    {
        return path_str.replacen(home, "~", 1);
    }

    match path_str {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}
