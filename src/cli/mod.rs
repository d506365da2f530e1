//! CLI entry point for applemaps.

pub mod commands;

use clap::{Parser, Subcommand};

use crate::types::{Location, TransportType, Waypoint};

/// Apple Maps Server API CLI
#[derive(Parser, Debug)]
#[command(name = "applemaps", version, about = "Query the Apple Maps Server API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a new access token and store it
    Token,
    /// Geocode an address
    Geocode(GeocodeArgs),
    /// Reverse geocode a "lat,lon" coordinate
    Reverse(ReverseArgs),
    /// Search for places
    Search(SearchArgs),
    /// Autocomplete a partial search
    Autocomplete(SearchArgs),
    /// Directions between two places
    Directions(DirectionsArgs),
    /// Estimated arrival times to one or more destinations
    Eta(EtaArgs),
}

#[derive(Parser, Debug)]
pub struct GeocodeArgs {
    pub query: String,

    /// Limit to ISO 3166-1 alpha-2 countries (repeatable)
    #[arg(long = "country")]
    pub countries: Vec<String>,

    /// BCP 47 language tag, e.g. en-US
    #[arg(long)]
    pub lang: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ReverseArgs {
    #[arg(allow_hyphen_values = true)]
    pub location: Location,

    #[arg(long)]
    pub lang: Option<String>,
}

#[derive(Parser, Debug)]
pub struct SearchArgs {
    pub query: String,

    #[arg(long = "country")]
    pub countries: Vec<String>,

    #[arg(long)]
    pub lang: Option<String>,

    /// Hint location as "lat,lon"
    #[arg(long, allow_hyphen_values = true)]
    pub near: Option<Location>,
}

#[derive(Parser, Debug)]
pub struct DirectionsArgs {
    /// Address or "lat,lon"
    #[arg(long, allow_hyphen_values = true)]
    pub origin: Waypoint,

    /// Address or "lat,lon"
    #[arg(long, allow_hyphen_values = true)]
    pub destination: Waypoint,

    #[arg(long)]
    pub transport: Option<TransportType>,

    #[arg(long)]
    pub avoid_tolls: bool,

    #[arg(long)]
    pub alternates: bool,

    #[arg(long)]
    pub lang: Option<String>,
}

#[derive(Parser, Debug)]
pub struct EtaArgs {
    /// Origin as "lat,lon"
    #[arg(long, allow_hyphen_values = true)]
    pub origin: Location,

    /// Destination as "lat,lon" (repeatable, up to 10)
    #[arg(long = "destination", required = true, allow_hyphen_values = true)]
    pub destinations: Vec<Location>,

    #[arg(long)]
    pub transport: Option<TransportType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_geocode_with_countries() {
        let cli = Cli::try_parse_from([
            "applemaps", "geocode", "KyoAni", "--country", "JP", "--lang", "en-US",
        ])
        .unwrap();
        match cli.command {
            Commands::Geocode(args) => {
                assert_eq!(args.query, "KyoAni");
                assert_eq!(args.countries, vec!["JP".to_string()]);
                assert_eq!(args.lang.as_deref(), Some("en-US"));
            }
            other => panic!("expected Geocode, got {other:?}"),
        }
    }

    #[test]
    fn parse_reverse_negative_longitude() {
        let cli = Cli::try_parse_from(["applemaps", "reverse", "37.33182,-122.03118"]).unwrap();
        match cli.command {
            Commands::Reverse(args) => {
                assert_eq!(args.location, Location::new(37.33182, -122.03118))
            }
            other => panic!("expected Reverse, got {other:?}"),
        }
    }

    #[test]
    fn parse_directions_mixed_waypoints() {
        let cli = Cli::try_parse_from([
            "applemaps",
            "directions",
            "--origin",
            "37.331871,-122.029626",
            "--destination",
            "1 Infinite Loop, Cupertino, CA 95014",
            "--transport",
            "Walking",
            "--avoid-tolls",
        ])
        .unwrap();
        match cli.command {
            Commands::Directions(args) => {
                assert_eq!(
                    args.origin,
                    Waypoint::Location(Location::new(37.331871, -122.029626))
                );
                assert_eq!(
                    args.destination,
                    Waypoint::address("1 Infinite Loop, Cupertino, CA 95014")
                );
                assert_eq!(args.transport, Some(TransportType::Walking));
                assert!(args.avoid_tolls);
                assert!(!args.alternates);
            }
            other => panic!("expected Directions, got {other:?}"),
        }
    }

    #[test]
    fn eta_requires_destination() {
        assert!(Cli::try_parse_from(["applemaps", "eta", "--origin", "1,2"]).is_err());
    }

    #[test]
    fn parse_token() {
        let cli = Cli::try_parse_from(["applemaps", "token"]).unwrap();
        assert!(matches!(cli.command, Commands::Token));
    }
}
