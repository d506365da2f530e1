//! CLI command handlers. Each prints its response as pretty JSON.

use std::sync::Arc;

use serde::Serialize;

use crate::auth::FileTokenStore;
use crate::client::MapsClient;
use crate::config::MapsConfig;
use crate::types::{
    CountryCode, DirectionsAvoid, DirectionsRequest, EtaRequest, GeocodeRequest,
    ReverseGeocodeRequest, SearchAutocompleteRequest, SearchRequest,
};

use super::{Commands, DirectionsArgs, EtaArgs, GeocodeArgs, ReverseArgs, SearchArgs};

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Client configured from the environment, persisting tokens on disk so
/// successive invocations reuse them.
pub fn client_from_env() -> Result<MapsClient, crate::MapsError> {
    let client = MapsClient::new(MapsConfig::from_env()?)?;
    Ok(client.with_token_store(Arc::new(FileTokenStore::new_default())))
}

pub async fn run(command: Commands) -> CliResult {
    let client = client_from_env()?;
    match command {
        Commands::Token => handle_token(&client).await,
        Commands::Geocode(args) => handle_geocode(&client, args).await,
        Commands::Reverse(args) => handle_reverse(&client, args).await,
        Commands::Search(args) => handle_search(&client, args).await,
        Commands::Autocomplete(args) => handle_autocomplete(&client, args).await,
        Commands::Directions(args) => handle_directions(&client, args).await,
        Commands::Eta(args) => handle_eta(&client, args).await,
    }
}

fn print_json(value: &impl Serialize) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_countries(raw: &[String]) -> Result<Vec<CountryCode>, crate::MapsError> {
    raw.iter().map(|c| c.parse()).collect()
}

async fn handle_token(client: &MapsClient) -> CliResult {
    let token = client.refresh_access_token().await?;
    let expires = chrono::DateTime::from_timestamp(token.expires_at, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| token.expires_at.to_string());
    println!("Access token stored; expires at {expires}");
    Ok(())
}

async fn handle_geocode(client: &MapsClient, args: GeocodeArgs) -> CliResult {
    let req = GeocodeRequest::builder()
        .query(args.query)
        .limit_to_countries(parse_countries(&args.countries)?)
        .maybe_lang(args.lang)
        .build();
    print_json(&client.geocode(&req).await?)
}

async fn handle_reverse(client: &MapsClient, args: ReverseArgs) -> CliResult {
    let req = ReverseGeocodeRequest::builder()
        .location(args.location)
        .maybe_lang(args.lang)
        .build();
    print_json(&client.reverse_geocode(&req).await?)
}

async fn handle_search(client: &MapsClient, args: SearchArgs) -> CliResult {
    let req = SearchRequest::builder()
        .query(args.query)
        .limit_to_countries(parse_countries(&args.countries)?)
        .maybe_lang(args.lang)
        .maybe_search_location(args.near)
        .build();
    print_json(&client.search(&req).await?)
}

async fn handle_autocomplete(client: &MapsClient, args: SearchArgs) -> CliResult {
    let req = SearchAutocompleteRequest::builder()
        .query(args.query)
        .limit_to_countries(parse_countries(&args.countries)?)
        .maybe_lang(args.lang)
        .maybe_search_location(args.near)
        .build();
    print_json(&client.search_autocomplete(&req).await?)
}

async fn handle_directions(client: &MapsClient, args: DirectionsArgs) -> CliResult {
    let avoid = if args.avoid_tolls {
        vec![DirectionsAvoid::Tolls]
    } else {
        Vec::new()
    };
    let req = DirectionsRequest::builder()
        .origin(args.origin)
        .destination(args.destination)
        .avoid(avoid)
        .requests_alternate_routes(args.alternates)
        .maybe_transport_type(args.transport)
        .maybe_lang(args.lang)
        .build();
    print_json(&client.directions(&req).await?)
}

async fn handle_eta(client: &MapsClient, args: EtaArgs) -> CliResult {
    let req = EtaRequest::builder()
        .origin(args.origin)
        .destinations(args.destinations)
        .maybe_transport_type(args.transport)
        .build();
    print_json(&client.eta(&req).await?)
}
