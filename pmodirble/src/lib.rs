//! Dirble client library for PMOMusic
//!
//! This crate provides a Rust client for the Dirble internet radio directory
//! API (v2): stations, categories, countries, continents and search.
//!
//! # Features
//!
//! - **One method per endpoint**: every call builds its URL, attaches the API
//!   token, performs a GET and decodes the JSON answer into typed models
//! - **Injectable transport**: requests go through the [`Transport`] trait,
//!   backed by `reqwest` by default
//! - **Faithful models**: wire names are preserved, nullable fields decode to
//!   `Option`, number-or-string fields decode to [`FlexibleValue`]
//! - **Configuration**: YAML file and `DIRBLE_*` environment variables
//!
//! # Example
//!
//! ```no_run
//! use pmodirble::{DirbleClient, Pagination};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DirbleClient::builder().token("my-api-token").build()?;
//!
//!     // Full station record, with streams and recent songs
//!     let station = client.station(42).await?;
//!     if let Some(stream) = station.best_stream() {
//!         println!("{}: {} ({} kbps)", station.name, stream.stream, stream.bitrate);
//!     }
//!
//!     // Swedish stations, second page
//!     let stations = client
//!         .country_stations("se", false, Pagination::new().page(2))
//!         .await?;
//!     println!("{} stations", stations.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Every endpoint either returns a fully decoded value or an [`Error`]:
//! a transport failure, a non-200 status ([`Error::Status`]) or a JSON
//! decoding failure ([`Error::Json`]). Nothing is retried or cached.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod transport;

// Re-exports
pub use client::{ClientBuilder, DirbleClient, Pagination, DEFAULT_API_BASE, VERSION};
pub use config::DirbleConfig;
pub use error::{Error, Result};
pub use models::{
    Categories, Category, CategoryStations, CategoryTree, Continent, Continents, Countries,
    Country, CountryStations, FlexibleValue, Image, SearchResults, Station, StationSong, StationSongs,
    StationSummary, Stations, Stream, Thumb, Timestamps,
};
pub use transport::{HttpResponse, ReqwestTransport, Transport};
