//! HTTP transport for signed API requests.

use crate::config::Config;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};
use wreq::Client;

/// Fetches the raw body of a signed request URL - enables mocking for tests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs a GET and returns the response body.
    ///
    /// Fails on network errors and on any non-success status.
    async fn get(&self, url: &str) -> Result<Vec<u8>>;
}

/// HTTP transport backed by a pooled client with a fixed request deadline.
pub struct HttpTransport {
    client: Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Creates a transport from the configured deadline and proxy.
    pub fn new(config: &Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);

        let mut builder = Client::builder()
            .gzip(true)
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10).min(timeout));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url)
                .map_err(|e| Error::Config(format!("invalid proxy {}: {}", proxy_url, e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|e| Error::Transport(e.to_string()))?;

        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/xml, text/xml;q=0.9")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout(self.timeout)
                } else {
                    Error::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        debug!("Response status: {}", status);

        if status == 503 {
            warn!("Request throttled (503). Slow down the request rate.");
        }

        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| Error::Transport(e.to_string()))?;
        Ok(body.to_vec())
    }
}
