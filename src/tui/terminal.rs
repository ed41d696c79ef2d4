use std::io;

use anyhow::{Context, Result};
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    supports_keyboard_enhancement,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Owns the raw-mode alternate screen for the lifetime of the editor
pub struct TerminalManager {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    enhanced_keys: bool,
}

impl TerminalManager {
    /// Enter raw mode and the alternate screen.
    ///
    /// Where the terminal supports the keyboard enhancement protocol, modifier
    /// chords such as Ctrl+Enter are reported distinctly; elsewhere they
    /// degrade to their function-key alternates.
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

        let enhanced_keys = matches!(supports_keyboard_enhancement(), Ok(true));
        if enhanced_keys {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
            )?;
        }
        log::debug!("Terminal ready (keyboard enhancement: {})", enhanced_keys);

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal, enhanced_keys })
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<io::Stdout>> {
        &mut self.terminal
    }

    fn leave(&mut self) -> Result<()> {
        if self.enhanced_keys {
            execute!(self.terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
            self.enhanced_keys = false;
        }
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Restore terminal to normal mode
    pub fn restore(mut self) -> Result<()> {
        self.leave()
    }
}

// Cleanup also runs on panic and early return
impl Drop for TerminalManager {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_manager_drop_safety() {
        // Without a TTY setup fails; with one, restore must succeed
        if let Ok(manager) = TerminalManager::new() {
            assert!(manager.restore().is_ok());
        }
    }
}
