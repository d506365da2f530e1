//! Enumerations used in request parameters and responses.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Point-of-interest category accepted by search and autocomplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum PoiCategory {
    /// An airport.
    Airport,
    /// A specific gate at an airport.
    AirportGate,
    /// A specific named terminal at an airport.
    AirportTerminal,
    /// An amusement park.
    AmusementPark,
    /// An automated teller machine.
    #[serde(rename = "ATM")]
    #[strum(serialize = "ATM")]
    Atm,
    /// An aquarium.
    Aquarium,
    /// A bakery.
    Bakery,
    /// A bank.
    Bank,
    /// A beach.
    Beach,
    /// A brewery.
    Brewery,
    /// A cafe.
    Cafe,
    /// A campground.
    Campground,
    /// A car rental location.
    CarRental,
    /// An electric vehicle charger.
    #[serde(rename = "EVCharger")]
    #[strum(serialize = "EVCharger")]
    EvCharger,
    /// A fire station.
    FireStation,
    /// A fitness center.
    FitnessCenter,
    /// A food market.
    FoodMarket,
    /// A gas station.
    GasStation,
    /// A hospital.
    Hospital,
    /// A hotel.
    Hotel,
    /// A laundry.
    Laundry,
    /// A library.
    Library,
    /// A marina.
    Marina,
    /// A movie theater.
    MovieTheater,
    /// A museum.
    Museum,
    /// A national park.
    NationalPark,
    /// A night life venue.
    Nightlife,
    /// A park.
    Park,
    /// A parking location for an automobile.
    Parking,
    /// A pharmacy.
    Pharmacy,
    /// A playground.
    Playground,
    /// A police station.
    Police,
    /// A post office.
    PostOffice,
    /// A public transportation station.
    PublicTransport,
    /// A religious site.
    ReligiousSite,
    /// A restaurant.
    Restaurant,
    /// A restroom.
    Restroom,
    /// A school.
    School,
    /// A stadium.
    Stadium,
    /// A store.
    Store,
    /// A theater.
    Theater,
    /// A university.
    University,
    /// A winery.
    Winery,
    /// A zoo.
    Zoo,
}

/// Road features directions can try to avoid.
///
/// Avoidance is a preference: a returned route may still use tolls when no
/// reasonable alternative exists. Check `Route::has_tolls`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum DirectionsAvoid {
    Tolls,
}

/// Mode of transportation.
///
/// Directions accept `Automobile` and `Walking`; ETAs also accept `Transit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum TransportType {
    #[serde(alias = "AUTOMOBILE")]
    Automobile,
    #[serde(alias = "WALKING")]
    Walking,
    #[serde(alias = "TRANSIT")]
    Transit,
}

/// Kind of result search and autocomplete should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum ResultType {
    Poi,
    Address,
    /// Autocomplete only.
    Query,
}

/// Comma-join any displayable values.
pub(crate) fn join_comma<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
