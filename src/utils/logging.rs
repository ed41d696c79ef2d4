use std::fs::{self, OpenOptions};
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Env, Target};

const LOG_FILENAME: &str = "playground.log";

/// Where log records go
pub enum LogTarget<'a> {
    Stderr,
    /// Append to `playground.log` inside this directory; used while the TUI
    /// owns the terminal
    File(&'a Path),
}

fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global logger. `RUST_LOG` overrides the verbosity-derived level.
pub fn init_logging(verbosity: u8, target: LogTarget<'_>) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(default_level(verbosity)));

    if let LogTarget::File(dir) = target {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
        let path = dir.join(LOG_FILENAME);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    // A second init (tests, embedding) keeps the first logger
    let _ = builder.try_init();
    Ok(())
}
