use thiserror::Error;

/// The one failure class of the request/render cycle.
///
/// Any variant means "no result": the response is treated as all-or-nothing.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("Could not reach analyzer: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("No response data received")]
    EmptyBody,

    #[error("Invalid response from analyzer: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Analysis was interrupted")]
    Interrupted,
}
