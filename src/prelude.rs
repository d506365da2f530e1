//! Convenience re-exports for common use.

pub use crate::auth::{AccessToken, AutoRefresh, MemoryTokenStore, TokenStore};
pub use crate::client::MapsClient;
pub use crate::config::MapsConfig;
pub use crate::error::{ApiError, MapsError, Result};
pub use crate::types::{
    CountryCode, DirectionsRequest, EtaRequest, GeocodeRequest, Location, Query, Region,
    ReverseGeocodeRequest, SearchAutocompleteRequest, SearchRequest, TransportType, Waypoint,
};
