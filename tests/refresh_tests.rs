//! Tests for the single-flight access-token refresh.

mod common;

use std::sync::Arc;
use std::time::Duration;

use applemaps::auth::{
    AccessToken, AutoRefresh, MemoryTokenStore, SingleFlightRefresh, TokenStore,
    FRESHNESS_THRESHOLD_SECS,
};
use applemaps::error::MapsError;
use futures::future::join_all;

use common::{token_expiring_in, CountingRefresher, ScriptedStore};

#[tokio::test]
async fn fresh_token_is_returned_without_refresh() {
    let cached = token_expiring_in("cached", 3600);
    let store = MemoryTokenStore::with_token(cached.clone());
    let refresher = CountingRefresher::succeeding(token_expiring_in("new", 1800));
    let auto = SingleFlightRefresh::new();

    let token = auto.ensure_fresh_token(&store, &refresher).await.unwrap();

    assert_eq!(token, cached);
    assert_eq!(refresher.calls(), 0);
    assert_eq!(store.load().await.unwrap(), Some(cached));
}

#[tokio::test]
async fn near_expiry_token_is_refreshed_and_stored() {
    let store = MemoryTokenStore::with_token(token_expiring_in("stale", 30));
    let fresh = token_expiring_in("new", 1800);
    let refresher = CountingRefresher::succeeding(fresh.clone());
    let auto = SingleFlightRefresh::new();

    let token = auto.ensure_fresh_token(&store, &refresher).await.unwrap();

    assert_eq!(token, fresh);
    assert_eq!(refresher.calls(), 1);
    assert_eq!(store.load().await.unwrap(), Some(fresh));
    assert!(!auto.is_refreshing());
}

#[tokio::test]
async fn token_at_threshold_is_refreshed() {
    let store = MemoryTokenStore::with_token(token_expiring_in("edge", FRESHNESS_THRESHOLD_SECS));
    let refresher = CountingRefresher::succeeding(token_expiring_in("new", 1800));

    SingleFlightRefresh::new()
        .ensure_fresh_token(&store, &refresher)
        .await
        .unwrap();

    assert_eq!(refresher.calls(), 1);
}

#[tokio::test]
async fn empty_store_triggers_refresh() {
    let store = MemoryTokenStore::new();
    let fresh = token_expiring_in("first", 1800);
    let refresher = CountingRefresher::succeeding(fresh.clone());

    let token = SingleFlightRefresh::new()
        .ensure_fresh_token(&store, &refresher)
        .await
        .unwrap();

    assert_eq!(token, fresh);
    assert_eq!(refresher.calls(), 1);
}

#[tokio::test]
async fn refresher_failure_leaves_store_untouched() {
    let stale = token_expiring_in("stale", 10);
    let store = ScriptedStore::with_token(stale.clone());
    let refresher = CountingRefresher::failing();
    let auto = SingleFlightRefresh::new();

    let err = auto.ensure_fresh_token(&store, &refresher).await.unwrap_err();

    assert!(matches!(err, MapsError::Api(_)));
    assert_eq!(store.current(), Some(stale));
    assert_eq!(store.saves(), 0);
    assert!(!auto.is_refreshing(), "failed refresh must release the guard");
}

#[tokio::test]
async fn store_read_failure_propagates_without_refresh() {
    let store = ScriptedStore::default().failing_load();
    let refresher = CountingRefresher::succeeding(token_expiring_in("new", 1800));

    let err = SingleFlightRefresh::new()
        .ensure_fresh_token(&store, &refresher)
        .await
        .unwrap_err();

    assert!(matches!(err, MapsError::Store(_)));
    assert_eq!(refresher.calls(), 0);
}

#[tokio::test]
async fn store_write_failure_propagates() {
    let store = ScriptedStore::with_token(token_expiring_in("stale", 5)).failing_save();
    let refresher = CountingRefresher::succeeding(token_expiring_in("new", 1800));
    let auto = SingleFlightRefresh::new();

    let err = auto.ensure_fresh_token(&store, &refresher).await.unwrap_err();

    assert!(matches!(err, MapsError::Store(_)));
    assert_eq!(refresher.calls(), 1);
    assert_eq!(store.current().unwrap().value, "stale");
    assert!(!auto.is_refreshing());
}

#[tokio::test]
async fn concurrent_callers_share_one_refresh() {
    let stale = token_expiring_in("stale", 20);
    let fresh = token_expiring_in("new", 1800);
    let store = MemoryTokenStore::with_token(stale.clone());
    let refresher =
        CountingRefresher::succeeding(fresh.clone()).with_delay(Duration::from_millis(50));
    let auto = SingleFlightRefresh::new();

    let results = join_all((0..16).map(|_| auto.ensure_fresh_token(&store, &refresher))).await;
    let tokens: Vec<AccessToken> = results.into_iter().map(Result::unwrap).collect();

    assert_eq!(refresher.calls(), 1);
    assert_eq!(tokens.iter().filter(|t| **t == fresh).count(), 1);
    assert_eq!(tokens.iter().filter(|t| **t == stale).count(), 15);
    assert_eq!(store.load().await.unwrap(), Some(fresh));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_tasks_across_threads_share_one_refresh() {
    let store: Arc<dyn TokenStore> =
        Arc::new(MemoryTokenStore::with_token(token_expiring_in("stale", 20)));
    let refresher = Arc::new(
        CountingRefresher::succeeding(token_expiring_in("new", 1800))
            .with_delay(Duration::from_millis(100)),
    );
    let auto = Arc::new(SingleFlightRefresh::new());

    let handles: Vec<_> = (0..32)
        .map(|_| {
            let store = store.clone();
            let refresher = refresher.clone();
            let auto = auto.clone();
            tokio::spawn(async move {
                auto.ensure_fresh_token(store.as_ref(), refresher.as_ref())
                    .await
            })
        })
        .collect();

    for handle in handles {
        let token = handle.await.unwrap().unwrap();
        assert!(token.value == "stale" || token.value == "new");
    }

    assert_eq!(refresher.calls(), 1);
}

#[tokio::test]
async fn busy_refresh_with_empty_store_returns_empty_token() {
    let store = MemoryTokenStore::new();
    let refresher = CountingRefresher::succeeding(token_expiring_in("new", 1800))
        .with_delay(Duration::from_millis(20));
    let auto = SingleFlightRefresh::new();

    let (first, second) = tokio::join!(
        auto.ensure_fresh_token(&store, &refresher),
        auto.ensure_fresh_token(&store, &refresher),
    );

    assert_eq!(first.unwrap().value, "new");
    assert_eq!(second.unwrap(), AccessToken::default());
    assert_eq!(refresher.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn cancelled_refresh_releases_guard() {
    let store = MemoryTokenStore::with_token(token_expiring_in("stale", 0));
    let hanging = CountingRefresher::succeeding(token_expiring_in("never", 1800))
        .with_delay(Duration::from_secs(3600));
    let auto = SingleFlightRefresh::new();

    let outcome = tokio::time::timeout(
        Duration::from_millis(10),
        auto.ensure_fresh_token(&store, &hanging),
    )
    .await;
    assert!(outcome.is_err(), "refresh should have been cut off");
    assert_eq!(hanging.calls(), 1);
    assert!(!auto.is_refreshing());

    let working = CountingRefresher::succeeding(token_expiring_in("recovered", 1800));
    let token = auto.ensure_fresh_token(&store, &working).await.unwrap();
    assert_eq!(token.value, "recovered");
    assert_eq!(working.calls(), 1);
}

#[tokio::test]
async fn extreme_stored_expiries_are_handled() {
    let ancient = MemoryTokenStore::with_token(AccessToken::new("ancient", i64::MIN));
    let refresher = CountingRefresher::succeeding(token_expiring_in("new", 1800));
    let auto = SingleFlightRefresh::new();

    let token = auto.ensure_fresh_token(&ancient, &refresher).await.unwrap();
    assert_eq!(token.value, "new");
    assert_eq!(refresher.calls(), 1);

    let forever = MemoryTokenStore::with_token(AccessToken::new("forever", i64::MAX));
    let token = auto.ensure_fresh_token(&forever, &refresher).await.unwrap();
    assert_eq!(token.value, "forever");
    assert_eq!(refresher.calls(), 1);
}
