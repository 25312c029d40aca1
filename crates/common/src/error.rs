//! Error types shared across Dawdle crates.

use std::path::PathBuf;

/// Top-level error type for Dawdle operations.
///
/// Analysis skips (too little history, zero-duration baselines) are not
/// errors; see `dawdle_analysis::SkipReason`.
#[derive(Debug, thiserror::Error)]
pub enum DawdleError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Ingest error: {message}")]
    Ingest { message: String },

    #[error("Analysis error: {message}")]
    Analysis { message: String },

    #[error("History store error: {message}")]
    History { message: String },

    #[error("Signal emit error: {message}")]
    Emit { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using DawdleError.
pub type DawdleResult<T> = Result<T, DawdleError>;

impl DawdleError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn ingest(msg: impl Into<String>) -> Self {
        Self::Ingest {
            message: msg.into(),
        }
    }

    pub fn analysis(msg: impl Into<String>) -> Self {
        Self::Analysis {
            message: msg.into(),
        }
    }

    pub fn history(msg: impl Into<String>) -> Self {
        Self::History {
            message: msg.into(),
        }
    }

    pub fn emit(msg: impl Into<String>) -> Self {
        Self::Emit {
            message: msg.into(),
        }
    }
}
