//! Client for the external analysis service
//!
//! The analyzer is an external collaborator reachable through one HTTP
//! contract: `POST {base_url}/api/debug` with `{language, code}`. The
//! [`Analyzer`] trait is the seam between the request/render cycle and the
//! transport so the cycle can be exercised without a network.

pub mod config;
pub mod error;
pub mod http;

pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use error::AnalyzeError;
pub use http::HttpAnalyzer;

use crate::models::{AnalysisRequest, AnalysisResult};

/// Something that can analyze code
pub trait Analyzer: Send + Sync {
    fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalyzeError>;
}
