//! TUI application state and event handling.
//!
//! The [`App`] wraps a [`Playground`] with everything the interactive screen
//! needs on top of the request/render cycle:
//!
//! - **Editor**: a multi-line buffer with a line-number gutter
//! - **Debounced refresh**: gutter, metrics and auto-analyze each restart on
//!   every edit and fire after their own quiet period
//! - **Background analysis**: the HTTP call runs on a worker thread; its
//!   outcome comes back over a channel polled by the event loop
//! - **Panels**: history and settings overlays
//! - **Status messages**: transient feedback for copy and export
//! - **Dirty state tracking**: redraw only when state changes
//!
//! # Example
//!
//! ```rust,ignore
//! let mut app = App::new(playground, None, std::env::current_dir()?);
//! app.run(&mut terminal)?;
//! ```

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Utc;
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::layout::Rect;

use super::debounce::{AUTO_ANALYZE_DELAY, Debouncer, LINE_NUMBERS_DELAY, METRICS_DELAY};
use super::editor::Editor;
use super::events::{Action, poll_event};
use super::layout::AppLayout;
use super::rendering::{RenderState, render_ui};
use crate::client::AnalyzeError;
use crate::clipboard::{CopyTarget, copy_to_clipboard};
use crate::models::{AnalysisRequest, AnalysisResult, HistoryEntry, next_language};
use crate::playground::diff::{DiffLine, diff_lines};
use crate::playground::export::ExportFormat;
use crate::playground::metrics::{CodeMetrics, compute_metrics, line_count};
use crate::playground::{AnalysisOutcome, Playground};
use crate::utils::format_path_with_tilde;

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
/// Rows scrolled by PageUp/PageDown in the results pane
const RESULTS_PAGE: u16 = 10;

/// Type of status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

/// What the results pane compares the editor against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffTarget {
    Off,
    Fixed,
    Optimized,
}

impl DiffTarget {
    fn next(self) -> Self {
        match self {
            DiffTarget::Off => DiffTarget::Fixed,
            DiffTarget::Fixed => DiffTarget::Optimized,
            DiffTarget::Optimized => DiffTarget::Off,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DiffTarget::Off => "off",
            DiffTarget::Fixed => "fixed code",
            DiffTarget::Optimized => "optimized code",
        }
    }
}

/// Rows of the settings panel, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsRow {
    Theme,
    DefaultLanguage,
    AutoAnalyze,
    AutoSave,
    ShowMetrics,
}

pub const SETTINGS_ROWS: [SettingsRow; 5] = [
    SettingsRow::Theme,
    SettingsRow::DefaultLanguage,
    SettingsRow::AutoAnalyze,
    SettingsRow::AutoSave,
    SettingsRow::ShowMetrics,
];

impl SettingsRow {
    pub fn label(self) -> &'static str {
        match self {
            SettingsRow::Theme => "Theme",
            SettingsRow::DefaultLanguage => "Default language",
            SettingsRow::AutoAnalyze => "Auto-analyze",
            SettingsRow::AutoSave => "Auto-save",
            SettingsRow::ShowMetrics => "Show metrics",
        }
    }
}

/// Overlay currently shown over the main screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Panel {
    Closed,
    History { selected: usize, confirm_clear: bool },
    Settings { selected: usize },
}

struct PendingAnalysis {
    request: AnalysisRequest,
    receiver: Receiver<Result<AnalysisResult, AnalyzeError>>,
}

pub struct App {
    playground: Playground,
    editor: Editor,
    panel: Panel,
    // Snapshot taken when the history panel opens
    history: Vec<HistoryEntry>,
    diff_target: DiffTarget,
    results_scroll: u16,
    // Gutter and metrics lag the buffer until their debouncers fire
    gutter_lines: usize,
    metrics: CodeMetrics,
    line_debounce: Debouncer,
    metrics_debounce: Debouncer,
    auto_analyze_debounce: Debouncer,
    pending: Option<PendingAnalysis>,
    status_message: Option<StatusMessage>,
    export_dir: PathBuf,
    should_quit: bool,
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    /// `initial_code` wins over the auto-saved code from the last session
    pub fn new(playground: Playground, initial_code: Option<String>, export_dir: PathBuf) -> Self {
        let code = initial_code.or_else(|| playground.last_code()).unwrap_or_default();
        let editor = Editor::new(&code);

        Self {
            playground,
            gutter_lines: line_count(&code),
            metrics: compute_metrics(&code),
            editor,
            panel: Panel::Closed,
            history: Vec::new(),
            diff_target: DiffTarget::Off,
            results_scroll: 0,
            line_debounce: Debouncer::new(LINE_NUMBERS_DELAY),
            metrics_debounce: Debouncer::new(METRICS_DELAY),
            auto_analyze_debounce: Debouncer::new(AUTO_ANALYZE_DELAY),
            pending: None,
            status_message: None,
            export_dir,
            should_quit: false,
            needs_redraw: true,
            last_draw_time: Instant::now(),
        }
    }

    /// Set a transient status message with automatic expiry
    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    fn set_success(&mut self, text: impl Into<String>) {
        self.set_status(text, MessageType::Success, STATUS_SUCCESS_DURATION_MS);
    }

    fn set_error(&mut self, text: impl Into<String>) {
        self.set_status(text, MessageType::Error, STATUS_ERROR_DURATION_MS);
    }

    fn check_and_clear_expired_status(&mut self) {
        let should_clear = self
            .status_message
            .as_ref()
            .map(|msg| Instant::now() >= msg.expires_at)
            .unwrap_or(false);
        if should_clear {
            self.status_message = None;
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            let had_status = self.status_message.is_some();
            self.check_and_clear_expired_status();
            if had_status && self.status_message.is_none() {
                self.needs_redraw = true;
            }

            self.poll_analysis(Duration::ZERO);
            self.tick(Instant::now());

            // Draw if dirty or if it's been >100ms (for terminal resize handling)
            let now = Instant::now();
            let elapsed = now.duration_since(self.last_draw_time);
            if self.needs_redraw || elapsed >= Duration::from_millis(100) {
                let size = terminal.size()?;
                self.sync_viewport(Rect::new(0, 0, size.width, size.height));
                terminal.draw(|f| {
                    let diff = self.diff_view();
                    render_ui(f, &self.render_state(diff.as_deref()));
                })?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(50))?;
            self.handle_action(action);
        }

        Ok(())
    }

    fn render_state<'a>(&'a self, diff: Option<&'a [DiffLine]>) -> RenderState<'a> {
        let settings = self.playground.settings();
        RenderState {
            settings,
            language: self.playground.language(),
            editor: &self.editor,
            gutter_lines: self.gutter_lines,
            analyzing: self.playground.is_analyzing(),
            cycle_status: self.playground.status(),
            view: self.playground.view(),
            results_scroll: self.results_scroll,
            diff_target: self.diff_target,
            diff,
            metrics: settings.show_metrics.then_some(&self.metrics),
            status_message: self.status_message.as_ref(),
            panel: &self.panel,
            history: &self.history,
            now: Utc::now(),
        }
    }

    /// Keep the cursor row inside the editor viewport for a screen of `area`
    fn sync_viewport(&mut self, area: Rect) {
        let layout = AppLayout::new(area, self.playground.settings().show_metrics);
        // Borders take two rows
        let height = layout.editor_area.height.saturating_sub(2) as usize;
        self.editor.ensure_visible(height);
    }

    /// Positional diff of the editor against the selected section, if both exist
    fn diff_view(&self) -> Option<Vec<DiffLine>> {
        let view = self.playground.view()?;
        let revised = match self.diff_target {
            DiffTarget::Off => return None,
            DiffTarget::Fixed => view.fixed_code.as_deref()?,
            DiffTarget::Optimized => view.optimized_code.as_deref()?,
        };
        Some(diff_lines(&self.editor.text(), revised))
    }

    /// Fire whichever debouncers have gone quiet by `now`
    fn tick(&mut self, now: Instant) {
        if self.line_debounce.fire(now) {
            self.gutter_lines = self.editor.line_count();
            self.needs_redraw = true;
        }
        if self.metrics_debounce.fire(now) {
            self.metrics = compute_metrics(&self.editor.text());
            self.needs_redraw = true;
        }
        if self.auto_analyze_debounce.fire(now)
            && self.playground.settings().auto_analyze
            && !self.editor.is_blank()
        {
            log::debug!("Auto-analyze after quiet period");
            self.start_analysis();
        }
    }

    /// Start the cycle; the request runs on a worker thread
    fn start_analysis(&mut self) {
        let code = self.editor.text();
        match self.playground.begin_analysis(&code) {
            Ok(request) => {
                let analyzer = self.playground.analyzer();
                let (tx, rx) = mpsc::channel();
                let worker_request = request.clone();
                thread::spawn(move || {
                    // The receiver is gone if the app quit mid-request
                    let _ = tx.send(analyzer.analyze(&worker_request));
                });
                self.pending = Some(PendingAnalysis { request, receiver: rx });
                self.diff_target = DiffTarget::Off;
                self.results_scroll = 0;
            }
            Err(AnalysisOutcome::Busy) => {}
            Err(outcome) => log::debug!("Analysis not started: {:?}", outcome),
        }
        self.needs_redraw = true;
    }

    /// Deliver a finished request to the cycle, waiting at most `wait`.
    /// Returns true when a result (or failure) was applied.
    fn poll_analysis(&mut self, wait: Duration) -> bool {
        let Some(pending) = self.pending.as_ref() else {
            return false;
        };
        let outcome = match pending.receiver.recv_timeout(wait) {
            Ok(outcome) => outcome,
            Err(RecvTimeoutError::Timeout) => return false,
            Err(RecvTimeoutError::Disconnected) => Err(AnalyzeError::Interrupted),
        };
        if let Some(pending) = self.pending.take() {
            self.playground.finish_analysis(&pending.request, outcome);
        }
        self.needs_redraw = true;
        true
    }

    /// Restart the debouncers and auto-save after any buffer change
    fn on_edit(&mut self) {
        let now = Instant::now();
        self.line_debounce.trigger_at(now);
        self.metrics_debounce.trigger_at(now);
        self.auto_analyze_debounce.trigger_at(now);

        if let Err(e) = self.playground.save_last_code(&self.editor.text()) {
            log::warn!("Auto-save failed: {:#}", e);
        }
        self.needs_redraw = true;
    }

    /// Refresh gutter and metrics now, for programmatic buffer changes
    fn refresh_code_views(&mut self) {
        self.line_debounce.cancel();
        self.metrics_debounce.cancel();
        self.gutter_lines = self.editor.line_count();
        self.metrics = compute_metrics(&self.editor.text());
        self.needs_redraw = true;
    }

    fn clear_input(&mut self) {
        self.editor.clear();
        self.auto_analyze_debounce.cancel();
        self.refresh_code_views();
        self.playground.reset();
        self.diff_target = DiffTarget::Off;
        self.results_scroll = 0;
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::None => return,
            Action::Quit => {
                self.should_quit = true;
                return;
            }
            Action::Resize => {
                self.needs_redraw = true;
                return;
            }
            Action::ToggleHistory => {
                self.toggle_history();
                return;
            }
            Action::ToggleSettings => {
                self.panel = match self.panel {
                    Panel::Settings { .. } => Panel::Closed,
                    _ => Panel::Settings { selected: 0 },
                };
                self.needs_redraw = true;
                return;
            }
            Action::ToggleTheme => {
                self.toggle_theme();
                return;
            }
            _ => {}
        }

        match self.panel {
            Panel::History { .. } => self.handle_history_action(action),
            Panel::Settings { .. } => self.handle_settings_action(action),
            Panel::Closed => self.handle_editor_action(action),
        }
    }

    fn handle_editor_action(&mut self, action: Action) {
        match action {
            Action::Analyze => self.start_analysis(),
            Action::ClearInput => self.clear_input(),
            Action::CycleLanguage => {
                let next = next_language(self.playground.language());
                self.playground.set_language(next);
                self.needs_redraw = true;
            }
            Action::CycleDiff => self.cycle_diff(),
            Action::CopyFixed => self.copy(CopyTarget::FixedCode),
            Action::CopyOptimized => self.copy(CopyTarget::OptimizedCode),
            Action::CopyExplanation => self.copy(CopyTarget::Explanation),
            Action::ExportJson => self.export(ExportFormat::Json),
            Action::ExportMarkdown => self.export(ExportFormat::Markdown),
            Action::Escape => {
                if self.diff_target != DiffTarget::Off {
                    self.diff_target = DiffTarget::Off;
                } else {
                    self.status_message = None;
                }
                self.needs_redraw = true;
            }
            Action::InsertChar(c) => {
                self.editor.insert_char(c);
                self.on_edit();
            }
            Action::InsertTab => {
                self.editor.insert_tab();
                // Tab refreshes the gutter at once
                self.on_edit();
                self.gutter_lines = self.editor.line_count();
            }
            Action::Newline => {
                self.editor.newline();
                self.on_edit();
            }
            Action::Paste(text) => {
                self.editor.insert_str(&text.replace("\r\n", "\n"));
                self.on_edit();
            }
            Action::Backspace => {
                if self.editor.backspace() {
                    self.on_edit();
                }
            }
            Action::Delete => {
                if self.editor.delete() {
                    self.on_edit();
                }
            }
            Action::MoveUp => self.move_cursor(Editor::move_up),
            Action::MoveDown => self.move_cursor(Editor::move_down),
            Action::MoveLeft => self.move_cursor(Editor::move_left),
            Action::MoveRight => self.move_cursor(Editor::move_right),
            Action::Home => self.move_cursor(Editor::move_home),
            Action::End => self.move_cursor(Editor::move_end),
            Action::PageUp => {
                self.results_scroll = self.results_scroll.saturating_sub(RESULTS_PAGE);
                self.needs_redraw = true;
            }
            Action::PageDown => {
                self.results_scroll = self.results_scroll.saturating_add(RESULTS_PAGE);
                self.needs_redraw = true;
            }
            _ => {}
        }
    }

    fn move_cursor(&mut self, movement: fn(&mut Editor)) {
        movement(&mut self.editor);
        self.needs_redraw = true;
    }

    fn toggle_theme(&mut self) {
        match self.playground.toggle_theme() {
            Ok(theme) => self.set_success(format!("Theme: {}", theme)),
            Err(e) => self.set_error(format!("Failed to save theme: {:#}", e)),
        }
    }

    fn cycle_diff(&mut self) {
        if self.playground.view().is_none() {
            self.set_error("No analysis results to compare");
            return;
        }
        self.diff_target = self.diff_target.next();
        self.results_scroll = 0;
        self.needs_redraw = true;
    }

    fn copy(&mut self, target: CopyTarget) {
        match copy_to_clipboard(self.playground.view(), target) {
            Ok(_) => self.set_success(format!("Copied {} to clipboard", target.label())),
            Err(e) => self.set_error(format!("{:#}", e)),
        }
    }

    fn export(&mut self, format: ExportFormat) {
        let report = self.playground.export_report(&self.editor.text());
        match report.write(format, None, &self.export_dir) {
            Ok(path) => self.set_success(format!("Exported to {}", format_path_with_tilde(&path))),
            Err(e) => self.set_error(format!("{:#}", e)),
        }
    }

    fn toggle_history(&mut self) {
        self.panel = match self.panel {
            Panel::History { .. } => Panel::Closed,
            _ => {
                self.history = self.playground.history();
                Panel::History { selected: 0, confirm_clear: false }
            }
        };
        self.needs_redraw = true;
    }

    fn handle_history_action(&mut self, action: Action) {
        let Panel::History { selected, confirm_clear } = self.panel else {
            return;
        };

        if confirm_clear {
            match action {
                Action::InsertChar('y' | 'Y') => {
                    match self.playground.clear_history() {
                        Ok(()) => {
                            self.history.clear();
                            self.set_success("History cleared");
                        }
                        Err(e) => self.set_error(format!("{:#}", e)),
                    }
                    self.panel = Panel::History { selected: 0, confirm_clear: false };
                }
                Action::InsertChar('n' | 'N') | Action::Escape => {
                    self.panel = Panel::History { selected, confirm_clear: false };
                }
                _ => {}
            }
            self.needs_redraw = true;
            return;
        }

        let count = self.history.len();
        match action {
            Action::MoveUp => {
                self.panel = Panel::History { selected: selected.saturating_sub(1), confirm_clear };
            }
            Action::MoveDown if selected + 1 < count => {
                self.panel = Panel::History { selected: selected + 1, confirm_clear };
            }
            Action::Newline => self.load_history_entry(selected),
            Action::InsertChar('c') | Action::Delete if count > 0 => {
                self.panel = Panel::History { selected, confirm_clear: true };
            }
            Action::Escape => self.panel = Panel::Closed,
            _ => {}
        }
        self.needs_redraw = true;
    }

    fn load_history_entry(&mut self, index: usize) {
        let Some(id) = self.history.get(index).map(|e| e.id) else {
            return;
        };
        match self.playground.load_history_entry(id) {
            Some(code) => {
                self.editor.set_text(&code);
                self.refresh_code_views();
                self.panel = Panel::Closed;
                self.set_success("Loaded code from history");
            }
            None => self.set_error("History entry no longer exists"),
        }
    }

    fn handle_settings_action(&mut self, action: Action) {
        let Panel::Settings { selected } = self.panel else {
            return;
        };
        match action {
            Action::MoveUp => self.panel = Panel::Settings { selected: selected.saturating_sub(1) },
            Action::MoveDown if selected + 1 < SETTINGS_ROWS.len() => {
                self.panel = Panel::Settings { selected: selected + 1 };
            }
            Action::Newline | Action::InsertChar(' ') => self.activate_setting(SETTINGS_ROWS[selected]),
            Action::Escape => self.panel = Panel::Closed,
            _ => {}
        }
        self.needs_redraw = true;
    }

    fn activate_setting(&mut self, row: SettingsRow) {
        let settings = self.playground.settings().clone();
        let result = match row {
            SettingsRow::Theme => self.playground.toggle_theme().map(|_| ()),
            SettingsRow::DefaultLanguage => {
                self.playground.set_default_language(next_language(&settings.default_language))
            }
            SettingsRow::AutoAnalyze => self.playground.set_auto_analyze(!settings.auto_analyze),
            SettingsRow::AutoSave => self.playground.set_auto_save(!settings.auto_save),
            SettingsRow::ShowMetrics => self.playground.set_show_metrics(!settings.show_metrics),
        };
        if let Err(e) = result {
            self.set_error(format!("Failed to save setting: {:#}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use ratatui::backend::TestBackend;
    use tempfile::TempDir;

    use super::*;
    use crate::client::Analyzer;
    use crate::models::{Bug, Theme};
    use crate::playground::StatusKind;
    use crate::storage::LocalStore;

    struct StubAnalyzer {
        calls: AtomicUsize,
        fail: bool,
    }

    impl Analyzer for StubAnalyzer {
        fn analyze(&self, _request: &AnalysisRequest) -> Result<AnalysisResult, AnalyzeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AnalyzeError::Status(500));
            }
            Ok(AnalysisResult {
                message: Some("Done".to_string()),
                bugs: Some(vec![Bug {
                    line: None,
                    kind: Some("Logic".to_string()),
                    message: Some("Off by one on line 42".to_string()),
                }]),
                fixed_code: Some("x = 2".to_string()),
                ..Default::default()
            })
        }
    }

    fn create_app(code: &str, fail: bool) -> (App, Arc<StubAnalyzer>, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        let analyzer = Arc::new(StubAnalyzer { calls: AtomicUsize::new(0), fail });
        let playground = Playground::new(store, analyzer.clone());
        let app = App::new(playground, Some(code.to_string()), dir.path().to_path_buf());
        (app, analyzer, dir)
    }

    fn wait_for_result(app: &mut App) {
        assert!(app.poll_analysis(Duration::from_secs(5)), "analysis did not finish");
    }

    #[test]
    fn test_app_new_initializes_state() {
        let (app, _, _dir) = create_app("a\nb", false);
        assert_eq!(app.editor.text(), "a\nb");
        assert_eq!(app.gutter_lines, 2);
        assert_eq!(app.metrics.lines, 2);
        assert_eq!(app.panel, Panel::Closed);
        assert!(!app.should_quit);
        assert!(app.needs_redraw);
    }

    #[test]
    fn test_app_restores_last_code() {
        let dir = TempDir::new().unwrap();
        let mut store = LocalStore::open(dir.path()).unwrap();
        store.set(crate::storage::keys::LAST_CODE, "saved()").unwrap();
        let analyzer = Arc::new(StubAnalyzer { calls: AtomicUsize::new(0), fail: false });
        let playground = Playground::new(store, analyzer);

        let app = App::new(playground, None, dir.path().to_path_buf());
        assert_eq!(app.editor.text(), "saved()");
    }

    #[test]
    fn test_handle_action_quit() {
        let (mut app, _, _dir) = create_app("", false);
        app.handle_action(Action::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_typing_updates_buffer_and_autosaves() {
        let (mut app, _, _dir) = create_app("", false);
        app.handle_action(Action::InsertChar('x'));
        app.handle_action(Action::InsertTab);

        assert_eq!(app.editor.text(), "x  ");
        assert_eq!(app.playground.last_code().as_deref(), Some("x  "));
    }

    #[test]
    fn test_gutter_waits_for_debounce() {
        let (mut app, _, _dir) = create_app("a", false);
        app.handle_action(Action::Newline);
        assert_eq!(app.gutter_lines, 1);

        app.tick(Instant::now() + LINE_NUMBERS_DELAY);
        assert_eq!(app.gutter_lines, 2);
    }

    #[test]
    fn test_metrics_wait_for_debounce() {
        let (mut app, _, _dir) = create_app("", false);
        for c in "def f():".chars() {
            app.handle_action(Action::InsertChar(c));
        }
        assert_eq!(app.metrics.functions, 0);

        app.tick(Instant::now() + METRICS_DELAY);
        assert!(app.metrics.functions >= 1);
    }

    #[test]
    fn test_analyze_empty_input_makes_no_request() {
        let (mut app, analyzer, _dir) = create_app("   \n ", false);
        app.handle_action(Action::Analyze);

        assert!(app.pending.is_none());
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);
        let status = app.playground.status().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
    }

    #[test]
    fn test_analyze_runs_in_background_and_renders() {
        let (mut app, analyzer, _dir) = create_app("x = 1", false);
        app.handle_action(Action::Analyze);
        assert!(app.playground.is_analyzing());

        wait_for_result(&mut app);

        assert!(!app.playground.is_analyzing());
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 1);
        assert_eq!(app.playground.status().unwrap().text, "Done");
        assert_eq!(app.playground.view().unwrap().bug_count(), 1);
        assert_eq!(app.playground.history().len(), 1);
    }

    #[test]
    fn test_trigger_ignored_while_in_flight() {
        let (mut app, _, _dir) = create_app("x = 1", false);
        app.handle_action(Action::Analyze);
        app.handle_action(Action::Analyze);
        wait_for_result(&mut app);

        assert!(app.pending.is_none());
        assert_eq!(app.playground.history().len(), 1);
    }

    #[test]
    fn test_failed_analysis_sets_error_status() {
        let (mut app, _, _dir) = create_app("x = 1", true);
        app.handle_action(Action::Analyze);
        wait_for_result(&mut app);

        let status = app.playground.status().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.text, "Error: HTTP error! status: 500");
        assert!(app.playground.view().is_none());
    }

    #[test]
    fn test_auto_analyze_only_when_enabled() {
        let (mut app, _, _dir) = create_app("", false);
        app.handle_action(Action::InsertChar('x'));
        app.tick(Instant::now() + AUTO_ANALYZE_DELAY);
        assert!(app.pending.is_none());

        app.playground.set_auto_analyze(true).unwrap();
        app.handle_action(Action::InsertChar('y'));
        app.tick(Instant::now() + AUTO_ANALYZE_DELAY);
        assert!(app.pending.is_some());
        wait_for_result(&mut app);
    }

    #[test]
    fn test_auto_analyze_skips_blank_buffer() {
        let (mut app, _, _dir) = create_app("", false);
        app.playground.set_auto_analyze(true).unwrap();
        app.handle_action(Action::InsertChar(' '));
        app.tick(Instant::now() + AUTO_ANALYZE_DELAY);

        assert!(app.pending.is_none());
        assert!(app.playground.status().is_none());
    }

    #[test]
    fn test_clear_input_resets_results() {
        let (mut app, _, _dir) = create_app("x = 1", false);
        app.handle_action(Action::Analyze);
        wait_for_result(&mut app);

        app.handle_action(Action::ClearInput);

        assert_eq!(app.editor.text(), "");
        assert_eq!(app.gutter_lines, 1);
        assert!(app.playground.view().is_none());
        assert!(app.playground.status().is_none());
    }

    #[test]
    fn test_cycle_language() {
        let (mut app, _, _dir) = create_app("", false);
        assert_eq!(app.playground.language(), "Python");
        app.handle_action(Action::CycleLanguage);
        assert_eq!(app.playground.language(), "JavaScript");
    }

    #[test]
    fn test_toggle_theme_twice_restores() {
        let (mut app, _, _dir) = create_app("", false);
        app.handle_action(Action::ToggleTheme);
        assert_eq!(app.playground.settings().theme, Theme::Light);
        app.handle_action(Action::ToggleTheme);
        assert_eq!(app.playground.settings().theme, Theme::Dark);
    }

    #[test]
    fn test_cycle_diff_requires_results() {
        let (mut app, _, _dir) = create_app("x = 1", false);
        app.handle_action(Action::CycleDiff);
        assert_eq!(app.diff_target, DiffTarget::Off);
        assert_eq!(app.status_message.as_ref().unwrap().message_type, MessageType::Error);

        app.handle_action(Action::Analyze);
        wait_for_result(&mut app);
        app.handle_action(Action::CycleDiff);
        assert_eq!(app.diff_target, DiffTarget::Fixed);

        let diff = app.diff_view().unwrap();
        assert_eq!(diff.len(), 2);

        app.handle_action(Action::CycleDiff);
        assert_eq!(app.diff_target, DiffTarget::Optimized);
        // No optimized code in the stub response
        assert!(app.diff_view().is_none());

        app.handle_action(Action::Escape);
        assert_eq!(app.diff_target, DiffTarget::Off);
    }

    #[test]
    fn test_copy_without_results_reports_error() {
        let (mut app, _, _dir) = create_app("", false);
        app.handle_action(Action::CopyFixed);

        let msg = app.status_message.as_ref().unwrap();
        assert_eq!(msg.message_type, MessageType::Error);
        assert_eq!(msg.text, "No fixed code to copy");
    }

    #[test]
    fn test_export_writes_into_export_dir() {
        let (mut app, _, dir) = create_app("print(1)", false);
        app.handle_action(Action::ExportMarkdown);

        let content = std::fs::read_to_string(dir.path().join("code-analysis.md")).unwrap();
        assert!(content.contains("print(1)"));
        assert_eq!(app.status_message.as_ref().unwrap().message_type, MessageType::Success);
    }

    #[test]
    fn test_history_panel_load_entry() {
        let (mut app, _, _dir) = create_app("x = 1", false);
        app.handle_action(Action::Analyze);
        wait_for_result(&mut app);
        app.handle_action(Action::ClearInput);
        app.handle_action(Action::CycleLanguage);

        app.handle_action(Action::ToggleHistory);
        assert_eq!(app.history.len(), 1);
        app.handle_action(Action::Newline);

        assert_eq!(app.panel, Panel::Closed);
        assert_eq!(app.editor.text(), "x = 1");
        assert_eq!(app.playground.language(), "Python");
    }

    #[test]
    fn test_history_panel_typing_does_not_edit() {
        let (mut app, _, _dir) = create_app("abc", false);
        app.handle_action(Action::ToggleHistory);
        app.handle_action(Action::InsertChar('z'));
        assert_eq!(app.editor.text(), "abc");
    }

    #[test]
    fn test_history_clear_requires_confirmation() {
        let (mut app, _, _dir) = create_app("x = 1", false);
        app.handle_action(Action::Analyze);
        wait_for_result(&mut app);

        app.handle_action(Action::ToggleHistory);
        app.handle_action(Action::InsertChar('c'));
        assert_eq!(app.panel, Panel::History { selected: 0, confirm_clear: true });

        app.handle_action(Action::InsertChar('n'));
        assert_eq!(app.playground.history().len(), 1);

        app.handle_action(Action::InsertChar('c'));
        app.handle_action(Action::InsertChar('y'));
        assert!(app.playground.history().is_empty());
        assert!(app.history.is_empty());
    }

    #[test]
    fn test_settings_panel_toggles() {
        let (mut app, _, _dir) = create_app("", false);
        app.handle_action(Action::ToggleSettings);

        // Auto-analyze row
        app.handle_action(Action::MoveDown);
        app.handle_action(Action::MoveDown);
        app.handle_action(Action::Newline);
        assert!(app.playground.settings().auto_analyze);

        // Show metrics row, clamped at the bottom
        for _ in 0..10 {
            app.handle_action(Action::MoveDown);
        }
        app.handle_action(Action::InsertChar(' '));
        assert!(!app.playground.settings().show_metrics);

        app.handle_action(Action::Escape);
        assert_eq!(app.panel, Panel::Closed);
    }

    #[test]
    fn test_settings_default_language_moves_selection() {
        let (mut app, _, _dir) = create_app("", false);
        app.handle_action(Action::ToggleSettings);
        app.handle_action(Action::MoveDown);
        app.handle_action(Action::Newline);

        assert_eq!(app.playground.settings().default_language, "JavaScript");
        assert_eq!(app.playground.language(), "JavaScript");
    }

    #[test]
    fn test_results_scroll_saturates() {
        let (mut app, _, _dir) = create_app("", false);
        app.handle_action(Action::PageUp);
        assert_eq!(app.results_scroll, 0);
        app.handle_action(Action::PageDown);
        assert_eq!(app.results_scroll, RESULTS_PAGE);
    }

    #[test]
    fn test_set_status_success_message() {
        let (mut app, _, _dir) = create_app("", false);
        app.set_success("ok");
        let msg = app.status_message.as_ref().unwrap();
        assert_eq!(msg.message_type, MessageType::Success);
        assert!(msg.expires_at > Instant::now());
    }

    #[test]
    fn test_check_and_clear_expired_status_clears_expired() {
        let (mut app, _, _dir) = create_app("", false);
        app.set_status("gone", MessageType::Error, 0);
        std::thread::sleep(Duration::from_millis(1));
        app.check_and_clear_expired_status();
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_draw_with_test_backend() {
        let (mut app, _, _dir) = create_app("x = 1", false);
        app.handle_action(Action::Analyze);
        wait_for_result(&mut app);

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        app.sync_viewport(Rect::new(0, 0, 120, 40));
        terminal
            .draw(|f| {
                let diff = app.diff_view();
                render_ui(f, &app.render_state(diff.as_deref()));
            })
            .unwrap();
    }
}
