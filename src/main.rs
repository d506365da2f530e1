//! applemaps CLI binary entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use applemaps::cli::Cli;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = applemaps::cli::commands::run(cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
