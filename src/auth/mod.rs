//! Access-token lifecycle: storage, issuing, and automatic refresh.

pub mod error;
pub mod refresh;
pub mod refresher;
pub mod store;
pub mod token;

pub use error::StoreError;
pub use refresh::{AutoRefresh, SingleFlightRefresh, FRESHNESS_THRESHOLD_SECS};
pub use refresher::{HttpTokenRefresher, TokenRefresher};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore, TokenStoreConfig};
pub use token::{AccessToken, AccessTokenResponse};
