mod config;
mod models;
mod output;
mod scrapers;

use config::Config;
use scrapers::{PropertyCentreScraper, Scraper};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();
    info!("🏠 Property Scout - {}", config.base_url);
    info!("Searching: {} in {}", config.criteria.listing_type, config.criteria.location);

    // A browser that fails to start still yields a well-formed, header-only
    // output file.
    let listings = match PropertyCentreScraper::launch(config.clone()) {
        Ok(scraper) => scraper.scrape().await?,
        Err(err) => {
            error!("Failed to initialize browser session: {err}");
            Vec::new()
        }
    };

    let csv = output::to_csv(&listings)?;
    tokio::fs::write(&config.output_path, csv).await?;
    info!("💾 Saved {} listings to {}", listings.len(), config.output_path);

    println!(
        "Scraped {} listings and saved to {}",
        listings.len(),
        config.output_path
    );

    Ok(())
}
