//! HTTP client for the Dirble API
//!
//! Every endpoint follows the same shape: build the URL from the API base,
//! the endpoint path and the query parameters, attach the token, GET it
//! through the [`Transport`], and decode the JSON body.
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
//!     let stations = client
//!         .list_stations(Pagination::new().page(1).per_page(20))
//!         .await?;
//!     for station in &stations {
//!         println!("{} ({})", station.name, station.country);
//!     }
//!
//!     let results = client.search("jazz fm", None).await?;
//!     println!("{} stations match", results.len());
//!     Ok(())
//! }
//! ```

use crate::error::{Error, Result};
use crate::models::{
    Categories, CategoryStations, CategoryTree, Continents, Countries, CountryStations,
    SearchResults, Station, StationSongs, Stations,
};
use crate::transport::{ReqwestTransport, Transport};
use bytes::Bytes;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default Dirble API base URL
pub const DEFAULT_API_BASE: &str = "http://api.dirble.com/v2/";

/// Default timeout for HTTP requests (30 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent
pub const DEFAULT_USER_AGENT: &str = concat!("pmodirble/", env!("CARGO_PKG_VERSION"));

/// Characters kept verbatim in a path segment (RFC 3986 unreserved)
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode one path segment
///
/// `.` and `..` are refused: URL normalization would drop them (even in
/// their `%2E` form) and silently change the target resource.
fn encode_segment(segment: &str) -> Result<String> {
    if segment == "." || segment == ".." {
        return Err(Error::InvalidSegment(segment.to_string()));
    }
    Ok(utf8_percent_encode(segment, PATH_SEGMENT).to_string())
}

/// Optional paging parameters of the list endpoints
///
/// Unset fields are left out of the request entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub offset: Option<u32>,
}

impl Pagination {
    /// No paging parameter at all
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page number
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the number of items per page
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Set the number of items to skip
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Query pairs in wire order (`page`, `per_page`, `offset`)
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        [
            ("page", self.page),
            ("per_page", self.per_page),
            ("offset", self.offset),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v.to_string())))
        .collect()
    }
}

/// Dirble API client
///
/// The client holds only its token, base URL and a shared transport, so it
/// is cheap to clone and can be used from several tasks at once. It does not
/// cache, retry or rate-limit anything.
#[derive(Clone)]
pub struct DirbleClient {
    transport: Arc<dyn Transport>,
    token: String,
    base_url: String,
}

impl std::fmt::Debug for DirbleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirbleClient")
            .field("transport", &self.transport)
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl DirbleClient {
    /// Create a client on top of an injected transport
    pub fn new(transport: impl Transport + 'static, token: impl Into<String>) -> Self {
        Self {
            transport: Arc::new(transport),
            token: token.into(),
            base_url: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Create a client with a custom reqwest::Client
    ///
    /// Useful for sharing HTTP connection pools or custom proxy settings
    pub fn with_client(client: Client, token: impl Into<String>) -> Self {
        Self::new(ReqwestTransport::new(client), token)
    }

    /// Create a builder for configuring the client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the API token
    pub fn token(&self) -> &str {
        &self.token
    }

    // ========================================================================
    // Stations
    // ========================================================================

    /// List stations (`stations`)
    pub async fn list_stations(&self, pagination: Pagination) -> Result<Stations> {
        self.get_json(&["stations"], false, pagination).await
    }

    /// Get a station with its streams, categories and songs (`station/{id}`)
    pub async fn station(&self, id: u64) -> Result<Station> {
        let id = id.to_string();
        self.get_json(&["station", id.as_str()], false, Pagination::default())
            .await
    }

    /// Songs recently played on a station (`stations/{id}/song_history`)
    pub async fn station_song_history(&self, id: u64) -> Result<StationSongs> {
        let id = id.to_string();
        self.get_json(&["stations", id.as_str(), "song_history"], false, Pagination::default())
            .await
    }

    /// Stations similar to the given one (`stations/{id}/similar`)
    pub async fn similar_stations(&self, id: u64) -> Result<Stations> {
        let id = id.to_string();
        self.get_json(&["stations", id.as_str(), "similar"], false, Pagination::default())
            .await
    }

    // ========================================================================
    // Categories
    // ========================================================================

    /// All categories (`categories`)
    pub async fn categories(&self) -> Result<Categories> {
        self.get_json(&["categories"], false, Pagination::default())
            .await
    }

    /// Top level categories (`categories/primary`)
    pub async fn primary_categories(&self) -> Result<Categories> {
        self.get_json(&["categories", "primary"], false, Pagination::default())
            .await
    }

    /// Category tree (`categories/tree`)
    pub async fn category_tree(&self) -> Result<CategoryTree> {
        self.get_json(&["categories", "tree"], false, Pagination::default())
            .await
    }

    /// Stations of a category (`category/{id}/stations`)
    ///
    /// `all` asks the API for the unfiltered listing; how the server
    /// combines it with paging is up to the server.
    pub async fn category_stations(
        &self,
        id: u64,
        all: bool,
        pagination: Pagination,
    ) -> Result<CategoryStations> {
        let id = id.to_string();
        self.get_json(&["category", id.as_str(), "stations"], all, pagination)
            .await
    }

    /// Direct children of a category (`category/{id}/childs`)
    pub async fn category_children(&self, id: u64) -> Result<Categories> {
        let id = id.to_string();
        self.get_json(&["category", id.as_str(), "childs"], false, Pagination::default())
            .await
    }

    // ========================================================================
    // Countries & continents
    // ========================================================================

    /// All countries (`countries`)
    pub async fn countries(&self) -> Result<Countries> {
        self.get_json(&["countries"], false, Pagination::default())
            .await
    }

    /// Stations of a country (`countries/{code}/stations`)
    pub async fn country_stations(
        &self,
        code: &str,
        all: bool,
        pagination: Pagination,
    ) -> Result<CountryStations> {
        self.get_json(&["countries", code, "stations"], all, pagination)
            .await
    }

    /// All continents (`continents`)
    pub async fn continents(&self) -> Result<Continents> {
        self.get_json(&["continents"], false, Pagination::default())
            .await
    }

    /// Countries of a continent (`continents/{id}/countries`)
    pub async fn continent_countries(&self, continent_id: u64) -> Result<Countries> {
        let id = continent_id.to_string();
        self.get_json(&["continents", id.as_str(), "countries"], false, Pagination::default())
            .await
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Full text search (`search/{query}`)
    ///
    /// The query is sent as a path segment and percent-encoded
    /// (`jazz fm` becomes `search/jazz%20fm`).
    pub async fn search(&self, query: &str, page: Option<u32>) -> Result<SearchResults> {
        let pagination = Pagination {
            page,
            ..Pagination::default()
        };
        self.get_json(&["search", query], false, pagination).await
    }

    // ========================================================================
    // Request plumbing
    // ========================================================================

    /// Build the URL of an endpoint
    ///
    /// Query order is `token`, `all`, `page`, `per_page`, `offset`.
    pub(crate) fn endpoint_url(
        &self,
        segments: &[&str],
        all: bool,
        pagination: Pagination,
    ) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        if url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "Base URL cannot carry a path: {}",
                self.base_url
            )));
        }

        let mut path = url.path().trim_end_matches('/').to_string();
        for segment in segments {
            path.push('/');
            path.push_str(&encode_segment(segment)?);
        }
        url.set_path(&path);

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("token", &self.token);
            if all {
                query.append_pair("all", "1");
            }
            for (key, value) in pagination.query_pairs() {
                query.append_pair(key, &value);
            }
        }

        Ok(url)
    }

    /// GET an URL and return the body of a 200 answer
    async fn fetch(&self, url: Url) -> Result<Bytes> {
        // The query carries the token, only the path is logged.
        let path = url.path().to_string();
        debug!("GET {}", path);

        let response = self.transport.get(url).await.map_err(|e| {
            warn!("Request to {} failed: {}", path, e);
            e
        })?;

        if !response.is_ok() {
            warn!("Dirble API error ({}) on {}", response.status, path);
            return Err(Error::Status(response.status));
        }

        debug!("Received {} bytes from {}", response.body.len(), path);
        Ok(response.body)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        all: bool,
        pagination: Pagination,
    ) -> Result<T> {
        let url = self.endpoint_url(segments, all, pagination)?;
        let path = url.path().to_string();
        let body = self.fetch(url).await?;

        serde_json::from_slice(&body).map_err(|e| {
            warn!("Failed to parse response from {}: {}", path, e);
            Error::Json(e)
        })
    }
}

/// Builder for configuring a DirbleClient
pub struct ClientBuilder {
    token: Option<String>,
    base_url: String,
    timeout: Duration,
    user_agent: String,
    proxy: Option<String>,
    client: Option<Client>,
    transport: Option<Arc<dyn Transport>>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            token: None,
            base_url: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            proxy: None,
            client: None,
            transport: None,
        }
    }
}

impl std::fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("proxy", &self.proxy)
            .field("client", &self.client)
            .field("transport", &self.transport)
            .finish()
    }
}

impl ClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API token (required)
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the API base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a proxy URL
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Set a custom HTTP client
    ///
    /// Timeout, User-Agent and proxy settings are then ignored.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Use a custom transport instead of reqwest
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Take token, base URL, timeout, User-Agent and proxy from a configuration
    pub fn with_config(mut self, config: &crate::config::DirbleConfig) -> Self {
        if let Some(token) = &config.token {
            self.token = Some(token.clone());
        }
        self.base_url = config.base_url.clone();
        self.timeout = config.timeout();
        self.user_agent = config.user_agent.clone();
        self.proxy = config.proxy.clone();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<DirbleClient> {
        let token = self
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::config("Missing Dirble API token"))?;

        let base = Url::parse(&self.base_url)?;
        if base.cannot_be_a_base() {
            return Err(Error::config(format!(
                "Base URL cannot carry a path: {}",
                self.base_url
            )));
        }

        let transport: Arc<dyn Transport> = match (self.transport, self.client) {
            (Some(transport), _) => transport,
            (None, Some(client)) => Arc::new(ReqwestTransport::new(client)),
            (None, None) => {
                let mut builder = Client::builder()
                    .user_agent(&self.user_agent)
                    .timeout(self.timeout);

                if let Some(proxy_url) = &self.proxy {
                    let proxy = reqwest::Proxy::all(proxy_url)
                        .map_err(|e| Error::config(format!("Invalid proxy: {}", e)))?;
                    builder = builder.proxy(proxy);
                }

                Arc::new(ReqwestTransport::new(builder.build()?))
            }
        };

        debug!("Dirble client ready on {}", self.base_url);

        Ok(DirbleClient {
            transport,
            token,
            base_url: self.base_url,
        })
    }
}
