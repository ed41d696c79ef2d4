//! AI Debug Playground - submit code to a remote analyzer and review the findings
//!
//! A terminal client for a code-analysis service. Code and a language go out
//! in one `POST {base_url}/api/debug`; the structured answer comes back as
//! bugs, an explanation, fixed and optimized code, complexity estimates and
//! generated tests. The crate provides:
//!
//! - An HTTP client behind the [`client::Analyzer`] trait
//! - The request/render cycle ([`playground::Playground`]) with its view model
//! - A JSON local store for settings, the last edited code and a 20-entry history
//! - Code metrics, a positional diff view and JSON/Markdown export
//! - A scriptable CLI and an interactive TUI
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use ai_debug_playground::client::{ClientConfig, HttpAnalyzer};
//! use ai_debug_playground::playground::{AnalysisOutcome, Playground};
//! use ai_debug_playground::storage::LocalStore;
//!
//! let store = LocalStore::open(std::path::Path::new("/tmp/playground"))?;
//! let analyzer = HttpAnalyzer::new(ClientConfig::default())?;
//! let mut playground = Playground::new(store, Arc::new(analyzer));
//!
//! if playground.analyze("def f(x): return x +") == AnalysisOutcome::Completed {
//!     println!("{} bugs", playground.view().map(|v| v.bug_count()).unwrap_or(0));
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod client;
pub mod clipboard;
pub mod models;
pub mod parsers;
pub mod playground;
pub mod storage;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use client::{AnalyzeError, Analyzer, ClientConfig, HttpAnalyzer};
pub use models::{AnalysisRequest, AnalysisResult, HistoryEntry, Settings, Theme};
pub use playground::{AnalysisOutcome, Playground};
pub use storage::LocalStore;
