//! Parsers for analyzer responses and locally stored history
//!
//! # Error Handling Strategy
//!
//! - **Analyzer responses**: an empty body, a literal `null`, undecodable JSON
//!   or a non-object is an [`AnalyzeError`](crate::client::AnalyzeError).
//!   Within an object every field is optional and read on its own; a field
//!   with an unexpected shape is dropped or rendered as text.
//!
//! - **Stored history** degrades gracefully: a malformed document is logged and
//!   treated as empty, malformed entries inside a valid array are skipped.

pub mod deserializers;
pub mod history;
pub mod response;

pub use history::parse_history_list;
pub use response::parse_analysis_response;
