mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "dopc-cli")]
#[command(about = "Delivery order price calculator command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Price one order against the venue data service
    Quote {
        /// Venue identifier (e.g., home-assignment-venue-helsinki)
        #[arg(long)]
        venue_slug: String,
        /// Cart value in cents
        #[arg(long)]
        cart_value: i64,
        /// Customer latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Customer longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = dopc_core::load_app_config()?;

    // Logs go to stderr so stdout stays pipeable JSON.
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Quote {
            venue_slug,
            cart_value,
            lat,
            lon,
        } => commands::run_quote(&config, &venue_slug, cart_value, lat, lon).await?,
        Commands::Config => println!("{}", commands::render_config(&config)),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
