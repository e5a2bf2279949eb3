//! Error types for qrange

use thiserror::Error;

/// Main error type for qrange operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid range: minimum value must be less than maximum value (got min={min}, max={max})")]
    InvalidRange { min: i64, max: i64 },

    #[error("Bit source unavailable: {0}")]
    EntropySource(String),

    #[error("No value accepted after {attempts} draws")]
    RetryLimitExceeded { attempts: u64 },

    #[error("Circuit error: {0}")]
    Circuit(String),

    #[error("Rendering error: {0}")]
    Rendering(String),

    #[error("Plotting error: {0}")]
    Plotting(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for qrange operations
pub type Result<T> = std::result::Result<T, Error>;
