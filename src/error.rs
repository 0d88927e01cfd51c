use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the triage library and CLI.
#[derive(Debug, Error)]
pub enum TriageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid pattern file {path}: {reason}")]
    InvalidPatternFile { path: PathBuf, reason: String },

    #[error("bundle layout error: {0}")]
    BundleLayout(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("prompt error: {0}")]
    Prompt(#[from] inquire::InquireError),
}

/// Result type alias for triage operations.
pub type Result<T> = std::result::Result<T, TriageError>;
