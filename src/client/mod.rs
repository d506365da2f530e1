//! Apple Maps Server API client.
//!
//! Every resource call follows the same path: validate the request, obtain
//! a token (through the configured [`AutoRefresh`], or straight from the
//! store when auto-refresh is disabled), then dispatch one GET.

pub mod http;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use strum::Display;
use tracing::debug;

use crate::auth::{
    AccessToken, AutoRefresh, HttpTokenRefresher, MemoryTokenStore, SingleFlightRefresh,
    TokenRefresher, TokenStore,
};
use crate::config::MapsConfig;
use crate::error::Result;
use crate::types::{
    DirectionsRequest, DirectionsResponse, EtaRequest, EtaResponse, GeocodeRequest, PlaceResults,
    Query, ReverseGeocodeRequest, SearchAutocompleteRequest, SearchAutocompleteResponse,
    SearchRequest, SearchResponse,
};

/// Versioned service endpoints, displayed as their path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "camelCase")]
pub enum Endpoint {
    Token,
    Geocode,
    ReverseGeocode,
    Search,
    SearchAutocomplete,
    Directions,
    Etas,
}

impl Endpoint {
    /// Full URL of this endpoint under `base_url`.
    pub fn url(self, base_url: &str) -> String {
        format!("{}/v1/{self}", base_url.trim_end_matches('/'))
    }
}

/// Client for the Maps resource endpoints.
///
/// Cheap to clone; clones share the token store and the refresh guard.
///
/// # Example
/// ```no_run
/// use applemaps::{MapsClient, MapsConfig};
/// use applemaps::types::GeocodeRequest;
///
/// # async fn run() -> applemaps::Result<()> {
/// let client = MapsClient::new(MapsConfig::new("your_auth_token"))?;
/// let places = client
///     .geocode(&GeocodeRequest::builder().query("1 Apple Park Way").build())
///     .await?;
/// println!("{:?}", places.results.first().map(|p| &p.name));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct MapsClient {
    http: reqwest::Client,
    base_url: String,
    credential: String,
    token_store: Arc<dyn TokenStore>,
    refresher: Arc<dyn TokenRefresher>,
    /// False once a caller supplied its own refresher.
    default_refresher: bool,
    auto_refresh: Option<Arc<dyn AutoRefresh>>,
}

impl fmt::Debug for MapsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapsClient")
            .field("base_url", &self.base_url)
            .field("auto_refresh", &self.auto_refresh.is_some())
            .finish_non_exhaustive()
    }
}

impl MapsClient {
    /// Build a client with an in-memory token store and single-flight
    /// auto-refresh.
    pub fn new(config: MapsConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let refresher = HttpTokenRefresher::new(http.clone(), &config.base_url, &config.credential);
        Ok(Self {
            http,
            base_url: config.base_url,
            credential: config.credential,
            token_store: Arc::new(MemoryTokenStore::new()),
            refresher: Arc::new(refresher),
            default_refresher: true,
            auto_refresh: Some(Arc::new(SingleFlightRefresh::new())),
        })
    }

    /// Use a caller-supplied HTTP client for resource calls, and for token
    /// calls unless a refresher was set with
    /// [`with_token_refresher`](Self::with_token_refresher). Order of the two
    /// calls does not matter.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        if self.default_refresher {
            self.refresher = Arc::new(HttpTokenRefresher::new(
                http.clone(),
                &self.base_url,
                &self.credential,
            ));
        }
        self.http = http;
        self
    }

    /// Persist tokens somewhere other than process memory.
    pub fn with_token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.token_store = store;
        self
    }

    /// Replace the refresh policy, or pass `None` to disable it. Without
    /// auto-refresh, tokens must be refreshed through
    /// [`refresh_access_token`](Self::refresh_access_token) or
    /// [`set_access_token`](Self::set_access_token).
    pub fn with_auto_refresh(mut self, auto_refresh: Option<Arc<dyn AutoRefresh>>) -> Self {
        self.auto_refresh = auto_refresh;
        self
    }

    /// Replace the token source. Survives a later
    /// [`with_http_client`](Self::with_http_client).
    pub fn with_token_refresher(mut self, refresher: Arc<dyn TokenRefresher>) -> Self {
        self.refresher = refresher;
        self.default_refresher = false;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Currently stored token, if any.
    pub async fn access_token(&self) -> Result<Option<AccessToken>> {
        Ok(self.token_store.load().await?)
    }

    pub async fn set_access_token(&self, token: &AccessToken) -> Result<()> {
        Ok(self.token_store.save(token).await?)
    }

    /// Fetch a new token from the token endpoint without storing it.
    pub async fn new_access_token(&self) -> Result<AccessToken> {
        self.refresher.fetch_new_token().await
    }

    /// Fetch a new token and store it.
    pub async fn refresh_access_token(&self) -> Result<AccessToken> {
        let token = self.refresher.fetch_new_token().await?;
        self.token_store.save(&token).await?;
        Ok(token)
    }

    /// Token to use for the next request.
    ///
    /// With auto-refresh this may refresh first; while another caller is
    /// refreshing it returns the cached token even if nearly expired.
    pub async fn ensure_fresh_token(&self) -> Result<AccessToken> {
        match &self.auto_refresh {
            Some(auto) => {
                auto.ensure_fresh_token(self.token_store.as_ref(), self.refresher.as_ref())
                    .await
            }
            None => Ok(self.token_store.load().await?.unwrap_or_default()),
        }
    }

    pub async fn geocode(&self, req: &GeocodeRequest) -> Result<PlaceResults> {
        self.call(Endpoint::Geocode, req).await
    }

    pub async fn reverse_geocode(&self, req: &ReverseGeocodeRequest) -> Result<PlaceResults> {
        self.call(Endpoint::ReverseGeocode, req).await
    }

    pub async fn search(&self, req: &SearchRequest) -> Result<SearchResponse> {
        self.call(Endpoint::Search, req).await
    }

    pub async fn search_autocomplete(
        &self,
        req: &SearchAutocompleteRequest,
    ) -> Result<SearchAutocompleteResponse> {
        self.call(Endpoint::SearchAutocomplete, req).await
    }

    pub async fn directions(&self, req: &DirectionsRequest) -> Result<DirectionsResponse> {
        self.call(Endpoint::Directions, req).await
    }

    pub async fn eta(&self, req: &EtaRequest) -> Result<EtaResponse> {
        self.call(Endpoint::Etas, req).await
    }

    async fn call<T: DeserializeOwned>(&self, endpoint: Endpoint, req: &impl Query) -> Result<T> {
        let params = req.query_pairs()?;
        let token = self.ensure_fresh_token().await?;
        debug!(%endpoint, params = params.len(), "Apple Maps request");
        http::execute(&self.http, &endpoint.url(&self.base_url), &token.value, Some(&params)).await
    }
}
