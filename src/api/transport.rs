//! The HTTP seam between request construction and the network.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, instrument};

use super::error::Result;
use super::request::RequestSpec;
use super::response::HttpResponse;
use crate::config::{self, ConfigError};

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Executes a fully formed request and returns the read response.
///
/// Implementations must read the whole body before returning, so the
/// underlying connection is released once per request.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &RequestSpec) -> Result<HttpResponse>;
}

/// [`Transport`] backed by a blocking `reqwest` client.
///
/// The client keeps a connection pool, so one instance should be shared
/// across requests.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with the given request timeout.
    pub fn new(timeout: Duration) -> config::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ConfigError::HttpClient)?;
        Ok(Self { client })
    }

    /// Wrap an existing `reqwest` client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    #[instrument(skip_all, fields(method = %request.method, path = %request.url.path()))]
    fn execute(&self, request: &RequestSpec) -> Result<HttpResponse> {
        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers.clone());
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send()?;
        let status = response.status();
        let body = response.text()?;

        debug!(status = %status, bytes = body.len(), "Response received");
        Ok(HttpResponse { status, body })
    }
}
