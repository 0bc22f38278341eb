//! Error handling for the endpoint tester
//!
//! Request-level failures never surface here: the HTTP client folds them
//! into an [`ApiResponse`](crate::client::ApiResponse). This type covers what
//! can actually stop a run: bad configuration, failure to write output files
//! and, in strict mode, failed requests.

use thiserror::Error;

/// Custom error types for the endpoint tester
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network connectivity errors
    #[error("Network error: {0}")]
    Network(String),

    /// I/O errors (writing response files, etc.)
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Requests that failed during a strict run
    #[error("{failed} of {total} requests failed")]
    RunFailures { failed: usize, total: usize },
}

impl AppError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io(message.into())
    }

    /// Create a new serialization error
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        Self::Serialization(message.into())
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG",
            Self::Network(_) => "NETWORK",
            Self::Io(_) => "IO",
            Self::Serialization(_) => "SERIALIZATION",
            Self::RunFailures { .. } => "RUN",
        }
    }

    /// Get exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 1,  // Invalid configuration/usage
            Self::RunFailures { .. } | Self::Network(_) => 2,  // Failed requests
            Self::Io(_) | Self::Serialization(_) => 5,  // Output could not be written
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(error: url::ParseError) -> Self {
        Self::Config(format!("Invalid URL: {}", error))
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
