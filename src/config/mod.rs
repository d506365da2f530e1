//! Client configuration (code > env).

use std::fmt;

use crate::error::{MapsError, Result};

/// Production Apple Maps Server API host.
pub const DEFAULT_BASE_URL: &str = "https://maps-api.apple.com";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_AUTH_TOKEN: &str = "APPLE_MAPS_AUTH_TOKEN";
const ENV_BASE_URL: &str = "APPLE_MAPS_BASE_URL";
const ENV_TIMEOUT_SECS: &str = "APPLE_MAPS_TIMEOUT_SECS";

/// Configuration for [`MapsClient`](crate::client::MapsClient).
#[derive(Clone)]
pub struct MapsConfig {
    /// Long-lived credential, only ever sent to the token endpoint.
    pub credential: String,
    /// Base URL without trailing slash (defaults to production)
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl fmt::Debug for MapsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapsConfig")
            .field("credential", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl MapsConfig {
    /// Create a config with the given credential.
    pub fn new(credential: impl Into<String>) -> Self {
        Self {
            credential: credential.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Load from environment variables, reading `.env` if present.
    ///
    /// `APPLE_MAPS_AUTH_TOKEN` is required; `APPLE_MAPS_BASE_URL` and
    /// `APPLE_MAPS_TIMEOUT_SECS` override the defaults.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let credential = lookup(ENV_AUTH_TOKEN)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| MapsError::Configuration(format!("{ENV_AUTH_TOKEN} is not set")))?;
        let mut config = Self::new(credential.trim());

        if let Some(url) = lookup(ENV_BASE_URL) {
            config = config.with_base_url(url);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw.trim().parse().map_err(|_| {
                MapsError::Configuration(format!("{ENV_TIMEOUT_SECS} must be an integer, got {raw:?}"))
            })?;
            config = config.with_timeout(secs);
        }
        Ok(config)
    }
}
