//! Request dispatch: one authenticated GET, decoded into the expected type.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ApiError, MapsError, Result};
use crate::types::QueryParams;

/// Build headers for a bearer-authenticated call.
pub fn bearer_headers(token: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|_| MapsError::Configuration("token is not a valid header value".into()))?;
    value.set_sensitive(true);
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

/// Perform a GET against `url` and decode a success body as `T`.
///
/// Non-success statuses become [`MapsError::Api`]; a success body that
/// fails to parse becomes [`MapsError::Decode`]. Transport failures pass
/// through as [`MapsError::Network`].
pub async fn execute<T: DeserializeOwned>(
    http: &reqwest::Client,
    url: &str,
    token: &str,
    params: Option<&QueryParams>,
) -> Result<T> {
    let mut request = http.get(url).headers(bearer_headers(token)?);
    if let Some(params) = params.filter(|p| !p.is_empty()) {
        request = request.query(params);
    }

    let response = request.send().await?;
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.bytes().await?;

    debug!(url, status = status.as_u16(), "Apple Maps response");

    if !status.is_success() {
        return Err(ApiError::new(status.as_u16(), headers, body.to_vec()).into());
    }

    serde_json::from_slice(&body).map_err(|e| MapsError::decode(&e, &body))
}
