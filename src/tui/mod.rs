//! Interactive full-screen playground
mod app;
mod debounce;
mod editor;
mod events;
mod layout;
mod rendering;
mod terminal;
mod timestamps;

use std::env;

use anyhow::{Context, Result};
pub use app::App;
pub use debounce::{AUTO_ANALYZE_DELAY, Debouncer, LINE_NUMBERS_DELAY, METRICS_DELAY};
pub use editor::Editor;
use terminal::TerminalManager;

use crate::playground::Playground;

/// Run the interactive TUI until the user quits.
///
/// Exports are written to the current directory.
pub fn run_interactive(playground: Playground, initial_code: Option<String>) -> Result<()> {
    let export_dir = env::current_dir().context("Failed to resolve current directory")?;
    let mut app = App::new(playground, initial_code, export_dir);

    let mut manager = TerminalManager::new()?;
    let res = app.run(manager.terminal_mut());
    manager.restore()?;

    res
}
