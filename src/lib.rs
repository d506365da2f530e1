//! Typed client for the Apple Maps Server API.
//!
//! Builds bearer-authenticated requests for geocoding, reverse geocoding,
//! place search, autocomplete, directions, and ETAs, and decodes the JSON
//! responses. The long-lived credential is exchanged for short-lived access
//! tokens, which are cached in a pluggable [`auth::TokenStore`] and
//! refreshed lazily on the request path.
//!
//! # Quick Start
//!
//! ```no_run
//! use applemaps::prelude::*;
//!
//! # async fn example() -> applemaps::Result<()> {
//! let client = MapsClient::new(MapsConfig::from_env()?)?;
//! let req = SearchRequest::builder().query("eiffel tower").lang("en-US").build();
//! let resp = client.search(&req).await?;
//! for place in resp.results {
//!     println!("{} ({})", place.name, place.coordinate);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod prelude;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;

pub use client::MapsClient;
pub use config::MapsConfig;
pub use error::{MapsError, Result};
