//! Errors reported by the Maps service itself.

use std::fmt;

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Error payload returned by the service on non-success responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorResponseBody,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponseBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Vec<String>,
}

/// A non-success HTTP response.
///
/// The structured payload is only present when the body decoded as an
/// [`ErrorResponse`]; otherwise the raw body is all there is.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: u16,
    pub headers: HeaderMap,
    pub raw_body: Vec<u8>,
    pub response: Option<ErrorResponse>,
}

impl ApiError {
    /// Build from a response, decoding the payload when possible.
    pub fn new(status: u16, headers: HeaderMap, raw_body: Vec<u8>) -> Self {
        let response = serde_json::from_slice::<ErrorResponse>(&raw_body).ok();
        Self {
            status,
            headers,
            raw_body,
            response,
        }
    }

    /// Structured message, if the payload decoded.
    pub fn message(&self) -> Option<&str> {
        self.response.as_ref().map(|r| r.error.message.as_str())
    }

    pub fn details(&self) -> &[String] {
        self.response
            .as_ref()
            .map(|r| r.error.details.as_slice())
            .unwrap_or_default()
    }

    pub fn raw_body_text(&self) -> String {
        String::from_utf8_lossy(&self.raw_body).into_owned()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = StatusCode::from_u16(self.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown");
        write!(f, "API error (status {} {reason})", self.status)?;
        match &self.response {
            None => write!(f, " with raw body `{}`", self.raw_body_text()),
            Some(resp) if resp.error.details.is_empty() => write!(f, ": {}", resp.error.message),
            Some(resp) => write!(
                f,
                ": {}; details: {}",
                resp.error.message,
                resp.error.details.join(", ")
            ),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_payload_is_decoded() {
        let err = ApiError::new(
            403,
            HeaderMap::new(),
            br#"{"error":{"message":"bad token","details":[]}}"#.to_vec(),
        );
        assert_eq!(err.message(), Some("bad token"));
        assert!(err.details().is_empty());
        assert_eq!(err.to_string(), "API error (status 403 Forbidden): bad token");
    }

    #[test]
    fn details_are_joined() {
        let err = ApiError::new(
            400,
            HeaderMap::new(),
            br#"{"error":{"message":"bad request","details":["q missing","lang invalid"]}}"#
                .to_vec(),
        );
        assert_eq!(
            err.to_string(),
            "API error (status 400 Bad Request): bad request; details: q missing, lang invalid"
        );
    }

    #[test]
    fn undecodable_body_degrades_to_raw() {
        let err = ApiError::new(502, HeaderMap::new(), b"<html>gateway</html>".to_vec());
        assert!(err.response.is_none());
        assert_eq!(err.message(), None);
        assert_eq!(
            err.to_string(),
            "API error (status 502 Bad Gateway) with raw body `<html>gateway</html>`"
        );
    }

    #[test]
    fn empty_body_degrades_to_raw() {
        let err = ApiError::new(500, HeaderMap::new(), Vec::new());
        assert!(err.response.is_none());
        assert!(err.to_string().contains("500"));
    }
}
