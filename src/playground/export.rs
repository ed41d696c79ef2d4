//! Report export as JSON or Markdown

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    pub fn default_filename(self) -> &'static str {
        match self {
            ExportFormat::Json => "code-analysis.json",
            ExportFormat::Markdown => "code-analysis.md",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Json => "json",
            ExportFormat::Markdown => "markdown",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            other => bail!("Unknown export format '{}' (expected 'json' or 'markdown')", other),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportComplexity {
    pub time: String,
    pub space: String,
}

/// The exported document. Complexity fields hold whatever is currently shown,
/// which is an empty string before any analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReport {
    pub language: String,
    pub code: String,
    pub timestamp: DateTime<Utc>,
    pub complexity: ExportComplexity,
}

impl ExportReport {
    pub fn new(
        language: &str,
        code: &str,
        time: Option<&str>,
        space: Option<&str>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            language: language.to_string(),
            code: code.to_string(),
            timestamp,
            complexity: ExportComplexity {
                time: time.unwrap_or_default().to_string(),
                space: space.unwrap_or_default().to_string(),
            },
        }
    }

    pub fn to_json(&self) -> Result<String> {
        #[derive(Serialize)]
        struct Wire<'a> {
            language: &'a str,
            code: &'a str,
            timestamp: String,
            complexity: &'a ExportComplexity,
        }

        let wire = Wire {
            language: &self.language,
            code: &self.code,
            timestamp: self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            complexity: &self.complexity,
        };
        serde_json::to_string_pretty(&wire).context("Failed to serialize export")
    }

    pub fn to_markdown(&self) -> String {
        let date = self.timestamp.with_timezone(&Local).format("%-m/%-d/%Y, %-I:%M:%S %p");
        format!(
            "# Code Analysis Report\n\
             \n\
             **Language:** {language}\n\
             **Date:** {date}\n\
             \n\
             ## Original Code\n\
             ```{fence}\n\
             {code}\n\
             ```\n\
             \n\
             ## Complexity\n\
             - **Time:** {time}\n\
             - **Space:** {space}\n\
             \n\
             ---\n\
             Generated by AI Code Debug Playground\n",
            language = self.language,
            date = date,
            fence = self.language.to_lowercase(),
            code = self.code,
            time = self.complexity.time,
            space = self.complexity.space,
        )
    }

    pub fn render(&self, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Json => self.to_json(),
            ExportFormat::Markdown => Ok(self.to_markdown()),
        }
    }

    /// Write the report to `path`, or the format's default filename in `dir`
    pub fn write(&self, format: ExportFormat, path: Option<&Path>, dir: &Path) -> Result<PathBuf> {
        let target = match path {
            Some(p) => p.to_path_buf(),
            None => dir.join(format.default_filename()),
        };
        let content = self.render(format)?;
        fs::write(&target, content)
            .with_context(|| format!("Failed to write export: {}", target.display()))?;
        log::info!("Exported {} report to {}", format, target.display());
        Ok(target)
    }
}
