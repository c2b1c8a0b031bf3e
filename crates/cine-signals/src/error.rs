//! Signal producer error types.

use thiserror::Error;

/// Result type for signal producer operations.
pub type SignalResult<T> = Result<T, SignalError>;

/// Errors that can occur calling an analysis service.
#[derive(Debug, Error)]
pub enum SignalError {
    #[error("Failed to configure signal client: {0}")]
    ConfigError(String),

    #[error("Invalid image payload: {0}")]
    InvalidImage(String),

    #[error("{service} returned {status}: {body}")]
    Api {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("Malformed {0} response: {1}")]
    MalformedResponse(&'static str, String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl SignalError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn invalid_image(msg: impl Into<String>) -> Self {
        Self::InvalidImage(msg.into())
    }

    pub fn api(service: &'static str, status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            service,
            status,
            body: body.into(),
        }
    }

    pub fn malformed(service: &'static str, msg: impl Into<String>) -> Self {
        Self::MalformedResponse(service, msg.into())
    }
}
