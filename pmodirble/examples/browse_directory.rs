//! Example: Browse the Dirble directory
//!
//! Run with: DIRBLE_TOKEN=... cargo run -p pmodirble --example browse_directory -- "jazz"

use pmodirble::{DirbleClient, DirbleConfig, Pagination};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let query = std::env::args().nth(1).unwrap_or_else(|| "jazz".to_string());

    let config = DirbleConfig::from_env()?;
    let client = DirbleClient::builder().with_config(&config).build()?;

    println!("=== Primary categories ===");
    for category in client.primary_categories().await? {
        println!("  {} ({})", category.title, category.slug);
    }

    println!("\n=== Latest stations ===");
    for station in client.list_stations(Pagination::new().per_page(10)).await? {
        println!("  [{}] {} - {}", station.id, station.name, station.country);
    }

    println!("\n=== Search: {} ===", query);
    for station in client.search(&query, None).await? {
        match station.best_stream() {
            Some(stream) => println!(
                "  {} -> {} ({} kbps)",
                station.name, stream.stream, stream.bitrate
            ),
            None => println!("  {} (no live stream)", station.name),
        }
    }

    Ok(())
}
