// src/error.rs

//! Unified error handling for the tracker.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for tracker operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client could not be built
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// The tracking page could not be fetched
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
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
}

/// Failure reported by a [`Fetcher`](crate::fetcher::Fetcher).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// No response within the configured timeout
    #[error("timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The aggregator answered with a non-success status
    #[error("unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    /// Connection, TLS or body read failure
    #[error("network error: {0}")]
    Network(String),

    /// Headless browser session failure
    #[error("browser error: {0}")]
    Browser(String),
}

impl FetchError {
    /// Whether this failure is a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}
