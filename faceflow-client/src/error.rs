//! Error types for faceflow-client
//!
//! Every backend failure collapses into `FetchError`. Controllers never
//! surface these details to the user; they log them and show a fixed message.

use thiserror::Error;

/// HTTP boundary error
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request could not be sent or the connection failed (includes timeouts)
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-success status
    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Base URL cannot carry request paths
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Backend status code, if the failure came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for HTTP boundary operations
pub type FetchResult<T> = Result<T, FetchError>;
