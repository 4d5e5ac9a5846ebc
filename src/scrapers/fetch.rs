//! Page fetching.
//!
//! [`Fetch`] is the seam between the collection loop and the network: the
//! real implementation is [`HttpFetcher`], tests substitute an in-memory map.
//! A fetch never retries; any failure is returned as a [`FetchError`] and
//! the caller skips the URL.

use crate::config::HttpConfig;
use crate::error::FetchError;
use reqwest::{Client, ClientBuilder};
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Download the HTML of a page.
pub trait Fetch {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// `reqwest`-backed fetcher with a fixed User-Agent and timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(http: &HttpConfig) -> Result<Self, FetchError> {
        let client = Self::builder(http).build()?;
        Ok(Self { client })
    }

    fn builder(http: &HttpConfig) -> ClientBuilder {
        Client::builder()
            .user_agent(http.user_agent.clone())
            .timeout(Duration::from_secs(http.timeout_secs))
    }

    /// Same client settings, but never routed through an environment proxy.
    #[cfg(test)]
    fn direct(http: &HttpConfig) -> Result<Self, FetchError> {
        let client = Self::builder(http).no_proxy().build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed = url::Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        let t0 = Instant::now();
        let response = self.client.get(parsed).send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!(%status, "Non-success status");
            return Err(FetchError::Status(status));
        }
        let body = response.text().await?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(body)
    }
}
