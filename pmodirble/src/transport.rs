//! HTTP transport used by [`DirbleClient`](crate::DirbleClient)
//!
//! The client never talks to the network itself: it hands a fully built URL
//! to a [`Transport`] and gets back the status, headers and body. The default
//! implementation, [`ReqwestTransport`], wraps a `reqwest::Client` and owns
//! connection pooling, TLS, proxies and timeouts. Tests and embedders can
//! plug their own implementation.

use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::Client;
use url::Url;

/// Raw answer of a GET request
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Complete response body
    pub body: Bytes,
}

impl HttpResponse {
    /// Create a response with no headers
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// True for a 200 answer, the only status the API uses for success
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Something able to perform an HTTP GET
///
/// Implementations must be safe to share between tasks: the client keeps a
/// single transport behind an `Arc` and may be cloned freely.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Perform a GET request and read the whole body
    ///
    /// Failures to obtain a response at all (DNS, connection refused,
    /// timeout, ...) are reported as errors; any HTTP status, including
    /// error statuses, is a successful `HttpResponse`.
    async fn get(&self, url: Url) -> Result<HttpResponse>;
}

/// [`Transport`] backed by `reqwest`
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Wrap an existing reqwest client
    ///
    /// Useful for sharing HTTP connection pools or custom proxy settings
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Get the internal HTTP client
    pub fn http_client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: Url) -> Result<HttpResponse> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn get(&self, url: Url) -> Result<HttpResponse> {
        (**self).get(url).await
    }
}
