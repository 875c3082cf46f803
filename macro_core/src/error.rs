//! Error types for the macro_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for macro_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required input was missing, non-numeric or not positive
    #[error("{0}")]
    Validation(String),

    /// Deletion of a log position that does not exist
    #[error("No log entry at position {index} (log has {len} entries)")]
    Index { index: usize, len: usize },

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Build a validation error from anything printable
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }
}
