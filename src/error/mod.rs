//! Error types for the Apple Maps client.

pub mod api;

pub use api::{ApiError, ErrorResponse, ErrorResponseBody};

use thiserror::Error;

use crate::auth::StoreError;

/// Primary error type for all client operations.
#[derive(Error, Debug)]
pub enum MapsError {
    /// A request failed local validation; nothing was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error(transparent)]
    Api(Box<ApiError>),

    /// A success body did not match the expected shape.
    #[error("Decode error: {message}")]
    Decode {
        message: String,
        body: Option<String>,
    },

    #[error("Token store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<ApiError> for MapsError {
    fn from(error: ApiError) -> Self {
        Self::Api(Box::new(error))
    }
}

impl MapsError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Build a decode error, keeping at most 500 characters of the body.
    pub(crate) fn decode(error: &serde_json::Error, body: &[u8]) -> Self {
        let body = String::from_utf8_lossy(body);
        Self::Decode {
            message: error.to_string(),
            body: Some(body.chars().take(500).collect()),
        }
    }

    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(api) => Some(api.status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The service rejected the access token.
    ///
    /// A request may race a refresh and go out with a token that expired in
    /// flight. Callers seeing this can refresh and resend.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Whether resending the same request later could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Api(api) => api.status == 429 || (500..=599).contains(&api.status),
            _ => false,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, MapsError>;
