//! Error types for the report generator

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a report run.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("malformed input in {}: {reason}", path.display())]
    MalformedInput { path: PathBuf, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("chart rendering failed: {0}")]
    Render(#[from] minijinja::Error),
}

impl ReportError {
    pub fn malformed(path: &std::path::Path, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

/// Alias for `Result<T, ReportError>`.
pub type ReportResult<T> = Result<T, ReportError>;
