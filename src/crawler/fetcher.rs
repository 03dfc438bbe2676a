//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper, including:
//! - Building an HTTP client with a browser user agent and a request timeout
//! - GET requests to fetch listing page content
//! - Error classification into `FetchErrorKind`
//!
//! There is no retry logic: a page that fails is reported and skipped.

use crate::config::Config;
use crate::{FetchError, FetchErrorKind};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Source of raw listing page HTML
///
/// The coordinator only talks to this trait, so tests can substitute a
/// scripted fetcher for the network.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches one page and returns its body as text
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The `User-Agent` header sent with every request
/// * `timeout` - Total time allowed for one request
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// `PageFetcher` backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(user_agent, timeout)?,
        })
    }

    /// Builds a fetcher from the `[user-agent]` and `[scraper]` sections
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(
            &config.user_agent.value,
            Duration::from_secs(config.scraper.request_timeout_secs),
        )
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    /// Fetches a URL with a single GET request
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | 2xx | body text |
    /// | non-2xx status | `Status(code)` |
    /// | timeout | `Timeout` |
    /// | DNS / connection refused / TLS | `Connect` |
    /// | unreadable body | `Body` |
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::new(url.as_str(), classify_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                url.as_str(),
                FetchErrorKind::Status(status.as_u16()),
            ));
        }

        response.text().await.map_err(|e| {
            let cause = if e.is_timeout() {
                FetchErrorKind::Timeout
            } else {
                FetchErrorKind::Body(e.to_string())
            };
            FetchError::new(url.as_str(), cause)
        })
    }
}

fn classify_error(e: &reqwest::Error) -> FetchErrorKind {
    if e.is_timeout() {
        FetchErrorKind::Timeout
    } else if e.is_connect() {
        FetchErrorKind::Connect(e.to_string())
    } else {
        FetchErrorKind::Other(e.to_string())
    }
}
