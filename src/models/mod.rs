//! Data models for the debug playground.
//!
//! This module defines the data structures used throughout the application:
//!
//! - [`AnalysisRequest`] / [`AnalysisResult`] - The `/api/debug` request and response
//! - [`HistoryEntry`] - A retained record of a past analysis request
//! - [`Settings`] - Flat user preferences, each key defaulted independently
//!
//! Response fields coming from the remote analyzer are all optional and use the
//! lenient deserializers in `parsers::deserializers`.

pub mod analysis;
pub mod history;
pub mod settings;

pub use analysis::{AnalysisRequest, AnalysisResult, Bug, Complexity, HealthStatus, TestCase};
pub use history::HistoryEntry;
pub use settings::{
    DEFAULT_LANGUAGE, SUPPORTED_LANGUAGES, Settings, Theme, canonical_language, next_language,
};
