//! The analysis request/render cycle
//!
//! [`Playground`] owns everything the cycle touches: the local store, the
//! settings loaded from it, the selected language, the status line, and the
//! last rendered result. It is surface-agnostic; the CLI drives it
//! synchronously through [`Playground::analyze`], the TUI splits the cycle
//! into [`Playground::begin_analysis`] and [`Playground::finish_analysis`] so
//! the HTTP call can run off the UI thread.
//!
//! # Cycle
//!
//! 1. Trim the code. Empty input sets an error status and stops: no request.
//! 2. Disable the trigger, clear prior results, show an in-progress status.
//! 3. Send one request (caller's job between begin and finish).
//! 4. On failure set one error status. On success set the response message
//!    (or a default), record history, and build the [`AnalysisView`].
//! 5. Re-enable the trigger regardless of outcome.

pub mod diff;
pub mod export;
pub mod line_hint;
pub mod metrics;
pub mod view;

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;

use crate::client::{AnalyzeError, Analyzer};
use crate::models::{AnalysisRequest, AnalysisResult, HistoryEntry, Settings, Theme};
use crate::storage::{self, LocalStore};
use export::ExportReport;
pub use view::AnalysisView;

pub const EMPTY_CODE_MESSAGE: &str = "Please enter some code before analyzing.";
pub const IN_PROGRESS_MESSAGE: &str = "Analyzing code, please wait...";
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Analysis complete.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// The status line shown above the results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub kind: StatusKind,
}

impl Status {
    pub fn info(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: StatusKind::Info }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: StatusKind::Error }
    }
}

/// How one trigger of the cycle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// Input was empty; no request was made
    Rejected,
    /// A request is already in flight; the trigger was ignored
    Busy,
    Failed,
    Completed,
}

pub struct Playground {
    store: LocalStore,
    settings: Settings,
    analyzer: Arc<dyn Analyzer>,
    language: String,
    status: Option<Status>,
    view: Option<AnalysisView>,
    last_result: Option<AnalysisResult>,
    analyzing: bool,
}

impl Playground {
    /// Load settings from `store`; the selected language starts at the default language
    pub fn new(store: LocalStore, analyzer: Arc<dyn Analyzer>) -> Self {
        let settings = storage::load_settings(&store);
        let language = settings.default_language.clone();
        Self {
            store,
            settings,
            analyzer,
            language,
            status: None,
            view: None,
            last_result: None,
            analyzing: false,
        }
    }

    pub fn analyzer(&self) -> Arc<dyn Analyzer> {
        Arc::clone(&self.analyzer)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn view(&self) -> Option<&AnalysisView> {
        self.view.as_ref()
    }

    pub fn last_result(&self) -> Option<&AnalysisResult> {
        self.last_result.as_ref()
    }

    /// True while a request is in flight (the trigger is disabled)
    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    /// Steps 1 and 2 of the cycle. Returns the request to send, if any.
    pub fn begin_analysis(&mut self, code: &str) -> Result<AnalysisRequest, AnalysisOutcome> {
        if self.analyzing {
            log::debug!("Analysis already in flight, ignoring trigger");
            return Err(AnalysisOutcome::Busy);
        }

        let code = code.trim();
        if code.is_empty() {
            self.status = Some(Status::error(EMPTY_CODE_MESSAGE));
            return Err(AnalysisOutcome::Rejected);
        }

        self.analyzing = true;
        self.clear_results();
        self.status = Some(Status::info(IN_PROGRESS_MESSAGE));

        Ok(AnalysisRequest { language: self.language.clone(), code: code.to_string() })
    }

    /// Steps 4 and 5 of the cycle
    pub fn finish_analysis(
        &mut self,
        request: &AnalysisRequest,
        outcome: Result<AnalysisResult, AnalyzeError>,
    ) -> AnalysisOutcome {
        self.analyzing = false;

        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                log::error!("Analysis failed: {}", e);
                self.status = Some(Status::error(format!("Error: {}", e)));
                return AnalysisOutcome::Failed;
            }
        };

        let message = result
            .message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_SUCCESS_MESSAGE);
        self.status = Some(Status::info(message));

        if let Err(e) =
            storage::record(&mut self.store, &request.language, &request.code, result.bug_count())
        {
            log::warn!("Failed to record history: {:#}", e);
        }

        self.view = Some(AnalysisView::from_result(&result));
        self.last_result = Some(result);
        AnalysisOutcome::Completed
    }

    /// Run the whole cycle on the current thread
    pub fn analyze(&mut self, code: &str) -> AnalysisOutcome {
        let request = match self.begin_analysis(code) {
            Ok(request) => request,
            Err(outcome) => return outcome,
        };
        let outcome = self.analyzer.analyze(&request);
        self.finish_analysis(&request, outcome)
    }

    pub fn clear_results(&mut self) {
        self.view = None;
        self.last_result = None;
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Clear the results and status, as when the input is cleared
    pub fn reset(&mut self) {
        self.clear_results();
        self.clear_status();
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        storage::toggle_theme(&mut self.store, &mut self.settings)
    }

    pub fn set_auto_analyze(&mut self, on: bool) -> Result<()> {
        storage::set_auto_analyze(&mut self.store, &mut self.settings, on)
    }

    pub fn set_auto_save(&mut self, on: bool) -> Result<()> {
        storage::set_auto_save(&mut self.store, &mut self.settings, on)
    }

    pub fn set_show_metrics(&mut self, on: bool) -> Result<()> {
        storage::set_show_metrics(&mut self.store, &mut self.settings, on)
    }

    /// Change the default language; the current selection follows it
    pub fn set_default_language(&mut self, language: &str) -> Result<()> {
        storage::set_default_language(&mut self.store, &mut self.settings, language)?;
        self.language = language.to_string();
        Ok(())
    }

    pub fn last_code(&self) -> Option<String> {
        storage::load_last_code(&self.store, &self.settings)
    }

    pub fn save_last_code(&mut self, code: &str) -> Result<()> {
        storage::save_last_code(&mut self.store, &self.settings, code)
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        storage::load_history(&self.store)
    }

    pub fn clear_history(&mut self) -> Result<()> {
        storage::clear_history(&mut self.store)
    }

    /// Restore a history entry: returns its full code and selects its language
    pub fn load_history_entry(&mut self, id: i64) -> Option<String> {
        let entry = storage::find_entry(&self.store, id)?;
        self.language = entry.language;
        Some(entry.full_code)
    }

    /// Export document for `code` with the complexity currently shown
    pub fn export_report(&self, code: &str) -> ExportReport {
        let view = self.view.as_ref();
        ExportReport::new(
            &self.language,
            code,
            view.and_then(|v| v.time_complexity.as_deref()),
            view.and_then(|v| v.space_complexity.as_deref()),
            Utc::now(),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tempfile::TempDir;

    use super::view::BugTableRow;
    use super::*;
    use crate::models::{Bug, Complexity};

    /// Analyzer double that counts calls and replays a canned outcome
    struct MockAnalyzer {
        calls: AtomicUsize,
        last_request: Mutex<Option<AnalysisRequest>>,
        respond: fn() -> Result<AnalysisResult, AnalyzeError>,
    }

    impl MockAnalyzer {
        fn new(respond: fn() -> Result<AnalysisResult, AnalyzeError>) -> Arc<Self> {
            Arc::new(Self { calls: AtomicUsize::new(0), last_request: Mutex::new(None), respond })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Analyzer for MockAnalyzer {
        fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalyzeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request.clone());
            (self.respond)()
        }
    }

    fn two_bugs() -> Result<AnalysisResult, AnalyzeError> {
        Ok(AnalysisResult {
            message: Some("Groq AI analysis successful.".into()),
            bugs: Some(vec![
                Bug { line: Some(1), kind: Some("Syntax".into()), message: Some("a".into()) },
                Bug { line: None, kind: None, message: Some("problem on line 42".into()) },
            ]),
            complexity: Some(Complexity { time: Some("O(n)".into()), space: Some("O(1)".into()) }),
            ..Default::default()
        })
    }

    fn no_bugs() -> Result<AnalysisResult, AnalyzeError> {
        Ok(AnalysisResult::default())
    }

    fn server_error() -> Result<AnalysisResult, AnalyzeError> {
        Err(AnalyzeError::Status(503))
    }

    fn playground(analyzer: Arc<MockAnalyzer>) -> (TempDir, Playground) {
        let temp = TempDir::new().unwrap();
        let store = LocalStore::open(temp.path()).unwrap();
        (temp, Playground::new(store, analyzer))
    }

    #[test]
    fn test_whitespace_input_rejected_without_request() {
        let mock = MockAnalyzer::new(two_bugs);
        let (_temp, mut pg) = playground(mock.clone());

        for input in ["", "   ", "\n\t \n"] {
            assert_eq!(pg.analyze(input), AnalysisOutcome::Rejected);
            let status = pg.status().unwrap();
            assert_eq!(status.kind, StatusKind::Error);
            assert_eq!(status.text, EMPTY_CODE_MESSAGE);
        }
        assert_eq!(mock.calls(), 0);
        assert!(!pg.is_analyzing());
        assert!(pg.history().is_empty());
    }

    #[test]
    fn test_successful_cycle_renders_and_records() {
        let mock = MockAnalyzer::new(two_bugs);
        let (_temp, mut pg) = playground(mock.clone());

        assert_eq!(pg.analyze("  print(x)\n"), AnalysisOutcome::Completed);
        assert_eq!(mock.calls(), 1);

        let sent = mock.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(sent.language, "Python");
        assert_eq!(sent.code, "print(x)", "code is trimmed before sending");

        let status = pg.status().unwrap();
        assert_eq!(status.text, "Groq AI analysis successful.");
        assert_eq!(status.kind, StatusKind::Info);

        let view = pg.view().unwrap();
        assert_eq!(view.bug_count(), 2);
        let BugTableRow::Bug(row) = &view.bug_rows[1] else { panic!("expected a bug row") };
        assert_eq!(row.line.to_string(), "42");

        let history = pg.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].bug_count, 2);
        assert_eq!(history[0].full_code, "print(x)");
        assert!(!pg.is_analyzing());
    }

    #[test]
    fn test_default_success_message() {
        let (_temp, mut pg) = playground(MockAnalyzer::new(no_bugs));
        pg.analyze("x = 1");
        assert_eq!(pg.status().unwrap().text, DEFAULT_SUCCESS_MESSAGE);
        assert_eq!(pg.view().unwrap().bug_rows, vec![BugTableRow::NoBugs]);
    }

    #[test]
    fn test_failure_sets_error_and_reenables() {
        let (_temp, mut pg) = playground(MockAnalyzer::new(server_error));

        assert_eq!(pg.analyze("x = 1"), AnalysisOutcome::Failed);
        let status = pg.status().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.text, "Error: HTTP error! status: 503");
        assert!(pg.view().is_none());
        assert!(pg.history().is_empty());
        assert!(!pg.is_analyzing());
    }

    #[test]
    fn test_begin_clears_previous_results() {
        let (_temp, mut pg) = playground(MockAnalyzer::new(two_bugs));
        pg.analyze("x = 1");
        assert!(pg.view().is_some());

        let request = pg.begin_analysis("y = 2").unwrap();
        assert!(pg.view().is_none());
        assert!(pg.is_analyzing());
        assert_eq!(pg.status().unwrap().text, IN_PROGRESS_MESSAGE);

        pg.finish_analysis(&request, no_bugs());
        assert!(!pg.is_analyzing());
    }

    #[test]
    fn test_trigger_ignored_while_in_flight() {
        let mock = MockAnalyzer::new(no_bugs);
        let (_temp, mut pg) = playground(mock.clone());

        let _request = pg.begin_analysis("a").unwrap();
        assert_eq!(pg.begin_analysis("b"), Err(AnalysisOutcome::Busy));
        assert_eq!(pg.analyze("c"), AnalysisOutcome::Busy);
        assert_eq!(mock.calls(), 0);
    }

    #[test]
    fn test_default_language_change_updates_selection() {
        let (temp, mut pg) = playground(MockAnalyzer::new(no_bugs));
        pg.set_default_language("Rust").unwrap();
        assert_eq!(pg.language(), "Rust");

        let reopened = Playground::new(LocalStore::open(temp.path()).unwrap(), MockAnalyzer::new(no_bugs));
        assert_eq!(reopened.language(), "Rust");
    }

    #[test]
    fn test_load_history_entry_restores_language() {
        let (_temp, mut pg) = playground(MockAnalyzer::new(no_bugs));
        pg.set_language("Go");
        pg.analyze("package main");
        pg.set_language("Python");

        let id = pg.history()[0].id;
        assert_eq!(pg.load_history_entry(id).as_deref(), Some("package main"));
        assert_eq!(pg.language(), "Go");
        assert_eq!(pg.load_history_entry(id + 1), None);
    }

    #[test]
    fn test_export_report_uses_shown_complexity() {
        let (_temp, mut pg) = playground(MockAnalyzer::new(two_bugs));
        let before = pg.export_report("x");
        assert_eq!(before.complexity.time, "");

        pg.analyze("x");
        let after = pg.export_report("x");
        assert_eq!(after.complexity.time, "O(n)");
        assert_eq!(after.complexity.space, "O(1)");
        assert_eq!(after.language, "Python");
    }

    #[test]
    fn test_toggle_theme_twice() {
        let (_temp, mut pg) = playground(MockAnalyzer::new(no_bugs));
        let original = pg.settings().theme;
        pg.toggle_theme().unwrap();
        pg.toggle_theme().unwrap();
        assert_eq!(pg.settings().theme, original);
        assert_eq!(storage::load_settings(pg.store()).theme, original);
    }
}
