//! Lazy, single-flight access-token refresh.
//!
//! Refresh happens on the request path that notices the token is close to
//! expiry. At most one refresh runs per [`SingleFlightRefresh`]; callers that
//! arrive while it is in flight get the cached token instead of waiting.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::error::Result;

use super::refresher::TokenRefresher;
use super::store::TokenStore;
use super::token::AccessToken;

/// Tokens with more than this many seconds left are used as-is.
pub const FRESHNESS_THRESHOLD_SECS: i64 = 60;

/// Produces a token for the next request, refreshing when needed.
///
/// Implementations are shared by every concurrent request on a client and
/// must be safe to call in parallel.
#[async_trait]
pub trait AutoRefresh: Send + Sync {
    async fn ensure_fresh_token(
        &self,
        store: &dyn TokenStore,
        refresher: &dyn TokenRefresher,
    ) -> Result<AccessToken>;
}

/// Default [`AutoRefresh`]: try-lock refresh with stale-read fallback.
#[derive(Debug, Default)]
pub struct SingleFlightRefresh {
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when dropped, including when the owning
/// future is cancelled mid-refresh.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SingleFlightRefresh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a refresh is running right now.
    pub fn is_refreshing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn try_begin(&self) -> Option<InFlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| InFlightGuard(&self.in_flight))
    }
}

#[async_trait]
impl AutoRefresh for SingleFlightRefresh {
    async fn ensure_fresh_token(
        &self,
        store: &dyn TokenStore,
        refresher: &dyn TokenRefresher,
    ) -> Result<AccessToken> {
        let cached = store.load().await?.unwrap_or_default();

        let Some(_guard) = self.try_begin() else {
            debug!("access token refresh already in flight; using cached token");
            return Ok(cached);
        };

        let remaining = cached.remaining_secs(Utc::now().timestamp());
        if remaining > FRESHNESS_THRESHOLD_SECS {
            return Ok(cached);
        }

        debug!(remaining_secs = remaining, "access token near expiry; refreshing");
        let token = refresher.fetch_new_token().await?;
        store.save(&token).await?;
        debug!(expires_at = token.expires_at, "access token refreshed");
        Ok(token)
    }
}
