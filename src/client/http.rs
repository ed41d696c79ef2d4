use reqwest::blocking::Client;

use super::config::ClientConfig;
use super::error::AnalyzeError;
use super::Analyzer;
use crate::models::{AnalysisRequest, AnalysisResult, HealthStatus};
use crate::parsers::parse_analysis_response;

/// Blocking HTTP analyzer.
///
/// Blocking is deliberate: the CLI is sequential and the TUI runs each request
/// on its own worker thread.
#[derive(Debug, Clone)]
pub struct HttpAnalyzer {
    client: Client,
    config: ClientConfig,
}

impl HttpAnalyzer {
    pub fn new(config: ClientConfig) -> Result<Self, AnalyzeError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("ai-debug-playground/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Query the service root for its status line
    pub fn health(&self) -> Result<HealthStatus, AnalyzeError> {
        let url = self.config.health_url();
        log::debug!("GET {}", url);

        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(AnalyzeError::Status(status.as_u16()));
        }

        let body = response.text()?;
        serde_json::from_str(&body).map_err(AnalyzeError::Decode)
    }
}

impl Analyzer for HttpAnalyzer {
    fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalyzeError> {
        let url = self.config.debug_url();
        log::info!("POST {} ({}, {} bytes of code)", url, request.language, request.code.len());

        let response = self.client.post(&url).json(request).send().map_err(|e| {
            log::error!("Analyzer request failed: {}", e);
            AnalyzeError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            log::error!("Analyzer returned status {}", status);
            return Err(AnalyzeError::Status(status.as_u16()));
        }

        let body = response.text()?;
        let result = parse_analysis_response(&body)?;
        log::info!("Analysis complete: {} bugs", result.bug_count());
        Ok(result)
    }
}
