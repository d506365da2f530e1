//! Request and response types for the Maps endpoints.

pub mod country;
pub mod enums;
pub mod geo;
pub mod request;
pub mod response;

pub use country::CountryCode;
pub use enums::{DirectionsAvoid, PoiCategory, ResultType, TransportType};
pub use geo::{Location, Region, Waypoint};
pub use request::{
    format_timestamp, DirectionsRequest, EtaRequest, GeocodeRequest, Query, QueryParams,
    ReverseGeocodeRequest, SearchAutocompleteRequest, SearchRequest, MAX_ETA_DESTINATIONS,
};
pub use response::{
    AutocompleteResult, DirectionsResponse, Eta, EtaResponse, Place, PlaceResults, Route,
    SearchAutocompleteResponse, SearchResponse, Step, StructuredAddress,
};
