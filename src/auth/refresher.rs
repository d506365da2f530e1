use std::fmt;

use async_trait::async_trait;

use crate::client::http::execute;
use crate::client::Endpoint;
use crate::error::Result;

use super::token::{AccessToken, AccessTokenResponse};

/// Exchanges the long-lived credential for a fresh access token.
///
/// One request per call, no retries.
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    async fn fetch_new_token(&self) -> Result<AccessToken>;
}

/// Calls `GET /v1/token` with the credential as bearer.
#[derive(Clone)]
pub struct HttpTokenRefresher {
    http: reqwest::Client,
    token_url: String,
    credential: String,
}

impl HttpTokenRefresher {
    pub fn new(http: reqwest::Client, base_url: &str, credential: impl Into<String>) -> Self {
        Self {
            http,
            token_url: Endpoint::Token.url(base_url),
            credential: credential.into(),
        }
    }
}

impl fmt::Debug for HttpTokenRefresher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTokenRefresher")
            .field("token_url", &self.token_url)
            .field("credential", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl TokenRefresher for HttpTokenRefresher {
    async fn fetch_new_token(&self) -> Result<AccessToken> {
        let resp: AccessTokenResponse =
            execute(&self.http, &self.token_url, &self.credential, None).await?;
        Ok(resp.into_token())
    }
}
