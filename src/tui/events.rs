use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// User actions from keyboard events
#[derive(Debug, PartialEq)]
pub enum Action {
    Quit,
    Analyze,
    ClearInput,
    ToggleTheme,
    CycleLanguage,
    ToggleHistory,
    ToggleSettings,
    CycleDiff,
    CopyFixed,
    CopyOptimized,
    CopyExplanation,
    ExportJson,
    ExportMarkdown,
    Escape,
    // Editing
    InsertChar(char),
    InsertTab,
    Newline,
    Backspace,
    Delete,
    // Cursor and scrolling
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Home,
    End,
    PageUp,
    PageDown,
    Paste(String),
    Resize,
    None,
}

/// Poll for terminal events and convert to actions
pub fn poll_event(timeout: Duration) -> anyhow::Result<Action> {
    if !event::poll(timeout)? {
        return Ok(Action::None);
    }
    match event::read()? {
        Event::Key(key) if key.kind != KeyEventKind::Release => Ok(key_to_action(key)),
        Event::Paste(text) => Ok(Action::Paste(text)),
        Event::Resize(_, _) => Ok(Action::Resize),
        _ => Ok(Action::None),
    }
}

pub fn key_to_action(key: KeyEvent) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    match key.code {
        // Ctrl+Enter is only reported by terminals with keyboard enhancement; F5 always works
        KeyCode::Enter if ctrl => Action::Analyze,
        KeyCode::F(5) => Action::Analyze,

        // Ctrl+Shift+T may arrive as an upper- or lower-case 't'
        KeyCode::Char('t' | 'T') if ctrl && shift => Action::ToggleTheme,
        KeyCode::F(8) => Action::ToggleTheme,

        KeyCode::Char('c' | 'q') if ctrl => Action::Quit,
        KeyCode::Char('k') if ctrl => Action::ClearInput,
        KeyCode::Char('y') if ctrl => Action::CopyFixed,
        KeyCode::Char('u') if ctrl => Action::CopyOptimized,
        KeyCode::Char('e') if ctrl => Action::ExportJson,
        KeyCode::Char('g') if ctrl => Action::ExportMarkdown,
        KeyCode::Char(_) if ctrl => Action::None,

        KeyCode::F(2) => Action::CycleLanguage,
        KeyCode::F(3) => Action::ToggleHistory,
        KeyCode::F(4) => Action::ToggleSettings,
        KeyCode::F(6) => Action::CycleDiff,
        KeyCode::F(7) => Action::CopyExplanation,
        KeyCode::Esc => Action::Escape,

        KeyCode::Char(c) => Action::InsertChar(c),
        KeyCode::Tab => Action::InsertTab,
        KeyCode::Enter => Action::Newline,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Delete => Action::Delete,

        KeyCode::Up => Action::MoveUp,
        KeyCode::Down => Action::MoveDown,
        KeyCode::Left => Action::MoveLeft,
        KeyCode::Right => Action::MoveRight,
        KeyCode::Home => Action::Home,
        KeyCode::End => Action::End,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,

        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_quit_actions() {
        assert_eq!(key_to_action(key(KeyCode::Char('c'), KeyModifiers::CONTROL)), Action::Quit);
        assert_eq!(key_to_action(key(KeyCode::Char('q'), KeyModifiers::CONTROL)), Action::Quit);
    }

    #[test]
    fn test_analyze_shortcuts() {
        assert_eq!(key_to_action(key(KeyCode::Enter, KeyModifiers::CONTROL)), Action::Analyze);
        assert_eq!(key_to_action(key(KeyCode::F(5), KeyModifiers::NONE)), Action::Analyze);
    }

    #[test]
    fn test_plain_enter_is_newline() {
        assert_eq!(key_to_action(key(KeyCode::Enter, KeyModifiers::NONE)), Action::Newline);
    }

    #[test]
    fn test_clear_input() {
        assert_eq!(
            key_to_action(key(KeyCode::Char('k'), KeyModifiers::CONTROL)),
            Action::ClearInput
        );
    }

    #[test]
    fn test_toggle_theme_variants() {
        let ctrl_shift = KeyModifiers::CONTROL | KeyModifiers::SHIFT;
        assert_eq!(key_to_action(key(KeyCode::Char('T'), ctrl_shift)), Action::ToggleTheme);
        assert_eq!(key_to_action(key(KeyCode::Char('t'), ctrl_shift)), Action::ToggleTheme);
        assert_eq!(key_to_action(key(KeyCode::F(8), KeyModifiers::NONE)), Action::ToggleTheme);
    }

    #[test]
    fn test_ctrl_t_without_shift_is_ignored() {
        assert_eq!(key_to_action(key(KeyCode::Char('t'), KeyModifiers::CONTROL)), Action::None);
    }

    #[test]
    fn test_function_keys() {
        let none = KeyModifiers::NONE;
        assert_eq!(key_to_action(key(KeyCode::F(2), none)), Action::CycleLanguage);
        assert_eq!(key_to_action(key(KeyCode::F(3), none)), Action::ToggleHistory);
        assert_eq!(key_to_action(key(KeyCode::F(4), none)), Action::ToggleSettings);
        assert_eq!(key_to_action(key(KeyCode::F(6), none)), Action::CycleDiff);
        assert_eq!(key_to_action(key(KeyCode::F(7), none)), Action::CopyExplanation);
    }

    #[test]
    fn test_copy_and_export() {
        let ctrl = KeyModifiers::CONTROL;
        assert_eq!(key_to_action(key(KeyCode::Char('y'), ctrl)), Action::CopyFixed);
        assert_eq!(key_to_action(key(KeyCode::Char('u'), ctrl)), Action::CopyOptimized);
        assert_eq!(key_to_action(key(KeyCode::Char('e'), ctrl)), Action::ExportJson);
        assert_eq!(key_to_action(key(KeyCode::Char('g'), ctrl)), Action::ExportMarkdown);
    }

    #[test]
    fn test_text_input() {
        assert_eq!(
            key_to_action(key(KeyCode::Char('a'), KeyModifiers::NONE)),
            Action::InsertChar('a')
        );
        assert_eq!(
            key_to_action(key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Action::InsertChar('A')
        );
        assert_eq!(key_to_action(key(KeyCode::Tab, KeyModifiers::NONE)), Action::InsertTab);
        assert_eq!(key_to_action(key(KeyCode::Backspace, KeyModifiers::NONE)), Action::Backspace);
        assert_eq!(key_to_action(key(KeyCode::Delete, KeyModifiers::NONE)), Action::Delete);
    }

    #[test]
    fn test_navigation() {
        let none = KeyModifiers::NONE;
        assert_eq!(key_to_action(key(KeyCode::Up, none)), Action::MoveUp);
        assert_eq!(key_to_action(key(KeyCode::Down, none)), Action::MoveDown);
        assert_eq!(key_to_action(key(KeyCode::Left, none)), Action::MoveLeft);
        assert_eq!(key_to_action(key(KeyCode::Right, none)), Action::MoveRight);
        assert_eq!(key_to_action(key(KeyCode::Home, none)), Action::Home);
        assert_eq!(key_to_action(key(KeyCode::End, none)), Action::End);
        assert_eq!(key_to_action(key(KeyCode::PageUp, none)), Action::PageUp);
        assert_eq!(key_to_action(key(KeyCode::PageDown, none)), Action::PageDown);
    }

    #[test]
    fn test_unknown_ctrl_chord_does_not_insert() {
        assert_eq!(key_to_action(key(KeyCode::Char('z'), KeyModifiers::CONTROL)), Action::None);
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(key_to_action(key(KeyCode::F(12), KeyModifiers::NONE)), Action::None);
    }
}
