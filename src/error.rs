//! Custom error types for paperscout.
//!
//! All fallible operations return `Result<T, ScoutError>`; remote-call
//! failures are converted into result values at the component boundary and
//! never bubble out as panics.

use thiserror::Error;

/// Main error type for paperscout operations.
#[derive(Debug, Error)]
pub enum ScoutError {
    /// Network/HTTP request error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// External API returned a non-success status
    #[error("API error: {code} - {message}")]
    Api {
        /// HTTP status code from the API
        code: u16,
        /// Error message from the API
        message: String,
    },

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// LLM judge reply was not valid JSON
    #[error("Judge reply was not valid JSON: {message}")]
    JudgeParse {
        /// Decode failure description
        message: String,
        /// Raw reply text, kept for inspection
        raw: String,
    },

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using `ScoutError`
pub type Result<T> = std::result::Result<T, ScoutError>;
