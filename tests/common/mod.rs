//! Shared test helpers: scripted refreshers and token stores.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use applemaps::auth::{AccessToken, StoreError, TokenRefresher, TokenStore};
use applemaps::error::{ApiError, MapsError};
use applemaps::MapsConfig;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::HeaderMap;
use wiremock::MockServer;

pub const CREDENTIAL: &str = "long-lived-credential";

pub fn now() -> i64 {
    Utc::now().timestamp()
}

/// Token expiring `secs` from now.
pub fn token_expiring_in(value: &str, secs: i64) -> AccessToken {
    AccessToken::new(value, now() + secs)
}

pub fn config_for(server: &MockServer) -> MapsConfig {
    MapsConfig::new(CREDENTIAL).with_base_url(server.uri())
}

/// Refresher that counts calls and answers after an optional delay.
pub struct CountingRefresher {
    calls: AtomicUsize,
    delay: Duration,
    outcome: Option<AccessToken>,
}

impl CountingRefresher {
    pub fn succeeding(token: AccessToken) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
            outcome: Some(token),
        }
    }

    /// Every call fails with a 500 from the token endpoint.
    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
            outcome: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenRefresher for CountingRefresher {
    async fn fetch_new_token(&self) -> Result<AccessToken, MapsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.outcome {
            Some(token) => Ok(token.clone()),
            None => Err(ApiError::new(500, HeaderMap::new(), b"token service down".to_vec()).into()),
        }
    }
}

/// Store whose reads or writes can be made to fail.
#[derive(Default)]
pub struct ScriptedStore {
    token: Mutex<Option<AccessToken>>,
    fail_load: bool,
    fail_save: bool,
    saves: AtomicUsize,
}

impl ScriptedStore {
    pub fn with_token(token: AccessToken) -> Self {
        Self {
            token: Mutex::new(Some(token)),
            ..Self::default()
        }
    }

    pub fn failing_load(mut self) -> Self {
        self.fail_load = true;
        self
    }

    pub fn failing_save(mut self) -> Self {
        self.fail_save = true;
        self
    }

    pub fn current(&self) -> Option<AccessToken> {
        self.token.lock().expect("store lock poisoned").clone()
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenStore for ScriptedStore {
    async fn load(&self) -> Result<Option<AccessToken>, StoreError> {
        if self.fail_load {
            return Err(StoreError::Backend("redis unavailable".to_string()));
        }
        Ok(self.current())
    }

    async fn save(&self, token: &AccessToken) -> Result<(), StoreError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_save {
            return Err(StoreError::Backend("redis read-only".to_string()));
        }
        *self.token.lock().expect("store lock poisoned") = Some(token.clone());
        Ok(())
    }
}
