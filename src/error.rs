// src/error.rs

//! Unified error handling for the job board.

use thiserror::Error;

/// Result type alias for job board operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[cfg(feature = "remote")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[cfg(feature = "remote")]
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// No job with the requested id in the current load
    #[error("Job {0} not found")]
    JobNotFound(usize),

    /// Write attempted against a read-only store
    #[error("Storage at {0} is read-only")]
    ReadOnly(String),

    /// One or more sources lost too many records since the last write
    #[error("Sources shrank by more than {threshold_percent}%: {}", .sources.join(", "))]
    SourcesShrank {
        threshold_percent: u8,
        sources: Vec<String>,
    },

    /// Ingest produced no records while the store has some
    #[error("Ingest produced no records; refusing to replace {0} existing records")]
    EmptyIngest(usize),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether this error means "nothing there" rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::JobNotFound(_))
    }
}
