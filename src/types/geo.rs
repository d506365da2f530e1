//! Coordinates, regions, and route endpoints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MapsError, Result};

/// A latitude/longitude pair in degrees.
///
/// Serialized in queries as `"{lat},{lon}"` using the shortest decimal form
/// that round-trips (`37.78,-122.42`, never `37.780000`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check latitude is within [-90, 90] and longitude within [-180, 180].
    pub fn validate(&self) -> Result<()> {
        check_latitude(self.latitude)?;
        check_longitude(self.longitude)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl FromStr for Location {
    type Err = MapsError;

    fn from_str(s: &str) -> Result<Self> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| MapsError::validation(format!("expected \"lat,lon\", got {s:?}")))?;
        let location = Self::new(parse_degrees(lat)?, parse_degrees(lon)?);
        location.validate()?;
        Ok(location)
    }
}

/// A bounding box, serialized as `"{north},{east},{south},{west}"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub north_latitude: f64,
    pub east_longitude: f64,
    pub south_latitude: f64,
    pub west_longitude: f64,
}

impl Region {
    pub const fn new(north: f64, east: f64, south: f64, west: f64) -> Self {
        Self {
            north_latitude: north,
            east_longitude: east,
            south_latitude: south,
            west_longitude: west,
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_latitude(self.north_latitude)?;
        check_latitude(self.south_latitude)?;
        check_longitude(self.east_longitude)?;
        check_longitude(self.west_longitude)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.north_latitude, self.east_longitude, self.south_latitude, self.west_longitude
        )
    }
}

/// Start or end of a route: a free-form address or a coordinate.
#[derive(Debug, Clone, PartialEq)]
pub enum Waypoint {
    Address(String),
    Location(Location),
}

impl Waypoint {
    pub fn address(address: impl Into<String>) -> Self {
        Self::Address(address.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Address(a) if a.trim().is_empty())
    }

    pub(crate) fn validate(&self, field: &str) -> Result<()> {
        match self {
            Self::Address(_) if self.is_empty() => {
                Err(MapsError::validation(format!("{field} is required")))
            }
            Self::Address(_) => Ok(()),
            Self::Location(loc) => loc.validate(),
        }
    }
}

impl From<Location> for Waypoint {
    fn from(location: Location) -> Self {
        Self::Location(location)
    }
}

impl From<&str> for Waypoint {
    fn from(address: &str) -> Self {
        Self::Address(address.to_string())
    }
}

impl From<String> for Waypoint {
    fn from(address: String) -> Self {
        Self::Address(address)
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(a) => f.write_str(a),
            Self::Location(l) => l.fmt(f),
        }
    }
}

/// Parses coordinates when the text looks like `lat,lon`, otherwise keeps
/// it as an address.
impl FromStr for Waypoint {
    type Err = MapsError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(s.parse::<Location>()
            .map(Self::Location)
            .unwrap_or_else(|_| Self::Address(s.to_string())))
    }
}

fn parse_degrees(raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| MapsError::validation(format!("invalid coordinate {raw:?}")))
}

fn check_latitude(value: f64) -> Result<()> {
    if (-90.0..=90.0).contains(&value) {
        Ok(())
    } else {
        Err(MapsError::validation(format!(
            "latitude {value} is outside [-90, 90]"
        )))
    }
}

fn check_longitude(value: f64) -> Result<()> {
    if (-180.0..=180.0).contains(&value) {
        Ok(())
    } else {
        Err(MapsError::validation(format!(
            "longitude {value} is outside [-180, 180]"
        )))
    }
}
