//! Request objects for the six resource endpoints.
//!
//! Each request validates itself and then encodes to query parameters.
//! Validation never touches the network.

use std::fmt::Display;

use bon::Builder;
use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{MapsError, Result};

use super::country::CountryCode;
use super::enums::{join_comma, DirectionsAvoid, PoiCategory, ResultType, TransportType};
use super::geo::{Location, Region, Waypoint};

/// Encoded query parameters, in encoding order.
pub type QueryParams = Vec<(&'static str, String)>;

/// Upper bound on destinations in one ETA request.
pub const MAX_ETA_DESTINATIONS: usize = 10;

/// A request that can be turned into endpoint query parameters.
pub trait Query {
    /// Check required fields and value ranges.
    fn validate(&self) -> Result<()>;

    /// Validate, then encode. Fails without producing parameters when
    /// validation fails.
    fn query_pairs(&self) -> Result<QueryParams>;
}

#[derive(Default)]
struct Params(QueryParams);

impl Params {
    fn set(&mut self, key: &'static str, value: impl Display) {
        self.0.push((key, value.to_string()));
    }

    fn opt(&mut self, key: &'static str, value: Option<impl Display>) {
        if let Some(value) = value {
            self.set(key, value);
        }
    }

    fn list<T: Display>(&mut self, key: &'static str, values: &[T]) {
        if !values.is_empty() {
            self.set(key, join_comma(values));
        }
    }

    fn date(&mut self, key: &'static str, value: Option<&DateTime<Utc>>) {
        self.opt(key, value.map(format_timestamp));
    }

    fn flag(&mut self, key: &'static str, value: bool) {
        if value {
            self.set(key, "true");
        }
    }
}

/// UTC RFC 3339 with whole seconds, e.g. `2023-10-05T05:47:39Z`.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn require_query(query: &str) -> Result<()> {
    if query.trim().is_empty() {
        return Err(MapsError::validation("q is required"));
    }
    Ok(())
}

fn check_lang(lang: Option<&String>) -> Result<()> {
    match lang {
        Some(tag) if tag.trim().is_empty() => Err(MapsError::validation("lang must not be empty")),
        _ => Ok(()),
    }
}

fn check_hints(
    search_location: Option<&Location>,
    search_region: Option<&Region>,
    user_location: Option<&Location>,
) -> Result<()> {
    search_location.map(Location::validate).transpose()?;
    search_region.map(Region::validate).transpose()?;
    user_location.map(Location::validate).transpose()?;
    Ok(())
}

/// Geocode an address.
///
/// # Example
/// ```
/// use applemaps::types::{GeocodeRequest, Query};
///
/// let req = GeocodeRequest::builder().query("1 Apple Park, Cupertino, CA").build();
/// let params = req.query_pairs()?;
/// assert_eq!(params, vec![("q", "1 Apple Park, Cupertino, CA".to_string())]);
/// # Ok::<(), applemaps::MapsError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct GeocodeRequest {
    /// Address to geocode (required).
    #[builder(into)]
    pub query: String,
    #[builder(default)]
    pub limit_to_countries: Vec<CountryCode>,
    /// BCP 47 language tag, e.g. `en-US`.
    #[builder(into)]
    pub lang: Option<String>,
    pub search_location: Option<Location>,
    pub search_region: Option<Region>,
    pub user_location: Option<Location>,
}

impl Query for GeocodeRequest {
    fn validate(&self) -> Result<()> {
        require_query(&self.query)?;
        check_lang(self.lang.as_ref())?;
        check_hints(
            self.search_location.as_ref(),
            self.search_region.as_ref(),
            self.user_location.as_ref(),
        )
    }

    fn query_pairs(&self) -> Result<QueryParams> {
        self.validate()?;
        let mut p = Params::default();
        p.set("q", &self.query);
        p.list("limitToCountries", &self.limit_to_countries);
        p.opt("lang", self.lang.as_ref());
        p.opt("searchLocation", self.search_location);
        p.opt("searchRegion", self.search_region);
        p.opt("userLocation", self.user_location);
        Ok(p.0)
    }
}

/// Reverse geocode a coordinate.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct ReverseGeocodeRequest {
    pub location: Location,
    #[builder(into)]
    pub lang: Option<String>,
}

impl Query for ReverseGeocodeRequest {
    fn validate(&self) -> Result<()> {
        self.location.validate()?;
        check_lang(self.lang.as_ref())
    }

    fn query_pairs(&self) -> Result<QueryParams> {
        self.validate()?;
        let mut p = Params::default();
        p.set("loc", self.location);
        p.opt("lang", self.lang.as_ref());
        Ok(p.0)
    }
}

/// Search for places matching a query.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct SearchRequest {
    /// Place to search for (required).
    #[builder(into)]
    pub query: String,
    #[builder(default)]
    pub exclude_poi_categories: Vec<PoiCategory>,
    #[builder(default)]
    pub include_poi_categories: Vec<PoiCategory>,
    #[builder(default)]
    pub limit_to_countries: Vec<CountryCode>,
    /// `Poi` and/or `Address`.
    #[builder(default)]
    pub result_type_filter: Vec<ResultType>,
    #[builder(into)]
    pub lang: Option<String>,
    pub search_location: Option<Location>,
    pub search_region: Option<Region>,
    /// Used by the service as a fallback for `search_location`.
    pub user_location: Option<Location>,
}

impl Query for SearchRequest {
    fn validate(&self) -> Result<()> {
        require_query(&self.query)?;
        if self.result_type_filter.contains(&ResultType::Query) {
            return Err(MapsError::validation(
                "resultTypeFilter=Query is only valid for autocomplete",
            ));
        }
        check_lang(self.lang.as_ref())?;
        check_hints(
            self.search_location.as_ref(),
            self.search_region.as_ref(),
            self.user_location.as_ref(),
        )
    }

    fn query_pairs(&self) -> Result<QueryParams> {
        self.validate()?;
        let mut p = Params::default();
        p.set("q", &self.query);
        p.list("excludePoiCategories", &self.exclude_poi_categories);
        p.list("includePoiCategories", &self.include_poi_categories);
        p.list("limitToCountries", &self.limit_to_countries);
        p.list("resultTypeFilter", &self.result_type_filter);
        p.opt("lang", self.lang.as_ref());
        p.opt("searchLocation", self.search_location);
        p.opt("searchRegion", self.search_region);
        p.opt("userLocation", self.user_location);
        Ok(p.0)
    }
}

/// Autocomplete a partial place search. Accepts the same parameters as
/// [`SearchRequest`], plus `ResultType::Query` in the result filter.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct SearchAutocompleteRequest {
    #[builder(into)]
    pub query: String,
    #[builder(default)]
    pub exclude_poi_categories: Vec<PoiCategory>,
    #[builder(default)]
    pub include_poi_categories: Vec<PoiCategory>,
    #[builder(default)]
    pub limit_to_countries: Vec<CountryCode>,
    #[builder(default)]
    pub result_type_filter: Vec<ResultType>,
    #[builder(into)]
    pub lang: Option<String>,
    pub search_location: Option<Location>,
    pub search_region: Option<Region>,
    pub user_location: Option<Location>,
}

impl Query for SearchAutocompleteRequest {
    fn validate(&self) -> Result<()> {
        require_query(&self.query)?;
        check_lang(self.lang.as_ref())?;
        check_hints(
            self.search_location.as_ref(),
            self.search_region.as_ref(),
            self.user_location.as_ref(),
        )
    }

    fn query_pairs(&self) -> Result<QueryParams> {
        self.validate()?;
        let mut p = Params::default();
        p.set("q", &self.query);
        p.list("excludePoiCategories", &self.exclude_poi_categories);
        p.list("includePoiCategories", &self.include_poi_categories);
        p.list("limitToCountries", &self.limit_to_countries);
        p.list("resultTypeFilter", &self.result_type_filter);
        p.opt("lang", self.lang.as_ref());
        p.opt("searchLocation", self.search_location);
        p.opt("searchRegion", self.search_region);
        p.opt("userLocation", self.user_location);
        Ok(p.0)
    }
}

/// Directions and travel time between two places.
///
/// # Example
/// ```
/// use applemaps::types::{DirectionsRequest, Location, Query, Waypoint};
///
/// let req = DirectionsRequest::builder()
///     .origin(Location::new(37.331871, -122.029626))
///     .destination(Waypoint::address("1 Infinite Loop, Cupertino, CA 95014"))
///     .requests_alternate_routes(true)
///     .build();
/// let params = req.query_pairs()?;
/// assert_eq!(params[0], ("origin", "37.331871,-122.029626".to_string()));
/// # Ok::<(), applemaps::MapsError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct DirectionsRequest {
    #[builder(into)]
    pub origin: Waypoint,
    #[builder(into)]
    pub destination: Waypoint,
    pub arrival_date: Option<DateTime<Utc>>,
    #[builder(default)]
    pub avoid: Vec<DirectionsAvoid>,
    /// Defaults to now on the server when neither date is set.
    pub departure_date: Option<DateTime<Utc>>,
    #[builder(into)]
    pub lang: Option<String>,
    #[builder(default)]
    pub requests_alternate_routes: bool,
    pub search_location: Option<Location>,
    pub search_region: Option<Region>,
    /// `Automobile` (server default) or `Walking`.
    pub transport_type: Option<TransportType>,
    pub user_location: Option<Location>,
}

impl Query for DirectionsRequest {
    fn validate(&self) -> Result<()> {
        self.origin.validate("origin")?;
        self.destination.validate("destination")?;
        if self.transport_type == Some(TransportType::Transit) {
            return Err(MapsError::validation(
                "transportType=Transit is not supported for directions",
            ));
        }
        check_lang(self.lang.as_ref())?;
        check_hints(
            self.search_location.as_ref(),
            self.search_region.as_ref(),
            self.user_location.as_ref(),
        )
    }

    fn query_pairs(&self) -> Result<QueryParams> {
        self.validate()?;
        let mut p = Params::default();
        p.set("origin", &self.origin);
        p.set("destination", &self.destination);
        p.date("arrivalDate", self.arrival_date.as_ref());
        p.list("avoid", &self.avoid);
        p.date("departureDate", self.departure_date.as_ref());
        p.opt("lang", self.lang.as_ref());
        p.flag("requestsAlternateRoutes", self.requests_alternate_routes);
        p.opt("searchLocation", self.search_location);
        p.opt("searchRegion", self.search_region);
        p.opt("transportType", self.transport_type);
        p.opt("userLocation", self.user_location);
        Ok(p.0)
    }
}

/// Estimated arrival times from one origin to up to ten destinations.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct EtaRequest {
    pub origin: Location,
    /// Between 1 and [`MAX_ETA_DESTINATIONS`] coordinates.
    pub destinations: Vec<Location>,
    pub transport_type: Option<TransportType>,
    pub departure_date: Option<DateTime<Utc>>,
    pub arrival_date: Option<DateTime<Utc>>,
}

impl Query for EtaRequest {
    fn validate(&self) -> Result<()> {
        self.origin.validate()?;
        match self.destinations.len() {
            0 => return Err(MapsError::validation("destinations is required")),
            n if n > MAX_ETA_DESTINATIONS => {
                return Err(MapsError::validation(format!(
                    "at most {MAX_ETA_DESTINATIONS} destinations are allowed, got {n}"
                )))
            }
            _ => {}
        }
        self.destinations.iter().try_for_each(Location::validate)
    }

    fn query_pairs(&self) -> Result<QueryParams> {
        self.validate()?;
        let destinations = self
            .destinations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("|");
        let mut p = Params::default();
        p.set("origin", self.origin);
        p.set("destinations", destinations);
        p.opt("transportType", self.transport_type);
        p.date("departureDate", self.departure_date.as_ref());
        p.date("arrivalDate", self.arrival_date.as_ref());
        Ok(p.0)
    }
}
