//! Tracker CLI
//!
//! Local lookups and offline extraction. For the HTTP endpoint, use
//! `tracker-server`.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracker::{
    error::Result,
    fetcher,
    models::{Config, StatusCategory, TrackingQuery},
    services::{SnapshotAssembler, TrackingService},
};

/// tracker - Shipment Tracking Extractor
#[derive(Parser, Debug)]
#[command(
    name = "tracker",
    version,
    about = "Extract shipment tracking records from aggregator pages"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "tracker.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch and extract one or more tracking numbers
    Track {
        /// Tracking numbers to look up
        #[arg(required = true)]
        numbers: Vec<String>,
    },

    /// Extract a snapshot from a saved HTML page
    Extract {
        /// Path to the saved page
        #[arg(long)]
        html: PathBuf,

        /// Tracking number the page belongs to
        #[arg(long)]
        number: String,
    },

    /// Print the display category of a status text
    Classify {
        /// Status text, e.g. "En cours de livraison"
        status: String,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool, default_level: &str) {
    let level = if verbose { "debug" } else { default_level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_or_default(&cli.config);
    config.apply_env(|key| std::env::var(key).ok());
    init_logging(cli.verbose, &config.logging.level);

    match cli.command {
        Command::Track { numbers } => {
            config.validate()?;
            let fetcher = fetcher::from_config(&config)?;
            let service = TrackingService::new(
                Arc::clone(&fetcher),
                config.locale.clone(),
                config.fetcher.max_concurrent,
            );

            log::info!(
                "Tracking {} number(s) via {} fetcher",
                numbers.len(),
                fetcher.name()
            );
            let snapshots = service.track_many(&numbers).await;
            fetcher.shutdown().await;

            let failures = snapshots.iter().filter(|s| s.is_failed()).count();
            println!("{}", serde_json::to_string_pretty(&snapshots)?);
            if failures > 0 {
                log::warn!("{} of {} lookup(s) failed", failures, snapshots.len());
            }
        }

        Command::Extract { html, number } => {
            let query = TrackingQuery::parse(&number)?;
            let page = tokio::fs::read_to_string(&html).await?;
            log::info!("Extracting {} from {}", query, html.display());

            let assembler = SnapshotAssembler::new(&config.locale.placeholders);
            let snapshot = assembler.snapshot_from_html(&query, &page);
            log::info!(
                "Status '{}' classified as {}",
                snapshot.status,
                snapshot.status_category().as_str()
            );
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }

        Command::Classify { status } => {
            println!("{}", StatusCategory::classify(&status).as_str());
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!(
                "✓ Config OK ({} fetcher, {}s timeout, source {})",
                config.fetcher.kind.as_str(),
                config.fetcher.timeout_secs,
                config.source.url_template
            );
        }
    }

    Ok(())
}
