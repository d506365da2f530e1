//! Response payloads. Fields the service omits fall back to defaults.

use serde::{Deserialize, Serialize};

use super::enums::TransportType;
use super::geo::{Location, Region};

/// Detailed address components of a place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructuredAddress {
    /// State or province.
    pub administrative_area: String,
    pub administrative_area_code: String,
    pub areas_of_interest: Vec<String>,
    /// Neighborhood names.
    pub dependent_localities: Vec<String>,
    /// Thoroughfare plus sub-thoroughfare.
    pub full_thoroughfare: String,
    /// City.
    pub locality: String,
    pub post_code: String,
    pub sub_locality: String,
    /// House number.
    pub sub_thoroughfare: String,
    /// Street name.
    pub thoroughfare: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Place {
    pub country: String,
    pub country_code: String,
    pub display_map_region: Region,
    pub formatted_address_lines: Vec<String>,
    pub name: String,
    pub coordinate: Location,
    pub structured_address: StructuredAddress,
}

/// Result of geocode and reverse geocode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceResults {
    pub results: Vec<Place>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResponse {
    pub display_map_region: Region,
    pub results: Vec<Place>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutocompleteResult {
    /// Relative search URL for fetching the full result.
    pub completion_url: String,
    pub display_lines: Vec<String>,
    pub location: Location,
    pub structured_address: StructuredAddress,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchAutocompleteResponse {
    pub results: Vec<AutocompleteResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Route {
    pub distance_meters: i64,
    /// Includes traffic when a departure or arrival date was given.
    pub duration_seconds: i64,
    pub has_tolls: bool,
    pub name: String,
    /// Indexes into [`DirectionsResponse::steps`].
    pub step_indexes: Vec<usize>,
    pub transport_type: Option<TransportType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Step {
    pub distance_meters: i64,
    pub duration_seconds: i64,
    pub instructions: String,
    /// Index into [`DirectionsResponse::step_paths`].
    pub step_path_index: usize,
    /// Set only when it differs from the route's transport type.
    pub transport_type: Option<TransportType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DirectionsResponse {
    pub destination: Place,
    pub origin: Place,
    pub routes: Vec<Route>,
    /// Polylines, one per step. Consecutive paths share their joining point.
    pub step_paths: Vec<Vec<Location>>,
    pub steps: Vec<Step>,
}

impl DirectionsResponse {
    /// Steps of `route` in order, skipping indexes the service did not send.
    pub fn route_steps<'a>(&'a self, route: &'a Route) -> impl Iterator<Item = &'a Step> + 'a {
        route.step_indexes.iter().filter_map(|&i| self.steps.get(i))
    }

    pub fn step_path(&self, step: &Step) -> Option<&[Location]> {
        self.step_paths.get(step.step_path_index).map(Vec::as_slice)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Eta {
    pub destination: Location,
    pub distance_meters: i64,
    /// Travel time including traffic.
    pub expected_travel_time_seconds: i64,
    /// Travel time without traffic.
    pub static_travel_time_seconds: i64,
    pub transport_type: Option<TransportType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EtaResponse {
    pub etas: Vec<Eta>,
}
