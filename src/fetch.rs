//! Page fetching.
//!
//! Every network read in the crate goes through [`PageFetcher`], so extraction can be
//! driven by fixture documents in tests and by `reqwest` in production.

#[cfg(test)]
use std::collections::HashMap;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tracing::debug;

use crate::constants::SCRAPER_USER_AGENT;
use crate::error::{Result, ScrapeError};

/// Capability to GET a page and return its body as text.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return the response body.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Fetch`] on transport failure or a non-success status.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// [`PageFetcher`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(SCRAPER_USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!(url = %url, "Fetching page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScrapeError::fetch(url, e))?;

        if !response.status().is_success() {
            return Err(ScrapeError::fetch(
                url,
                format!("HTTP request failed with status {}", response.status()),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| ScrapeError::fetch(url, format!("failed to read body: {e}")))
    }
}

/// In-memory [`PageFetcher`] serving fixed documents keyed by URL.
///
/// Unknown URLs fail with a 404-style [`ScrapeError::Fetch`].
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
}

#[cfg(test)]
impl StaticFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`.
    #[must_use]
    pub fn with_page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), body.into());
        self
    }
}

#[cfg(test)]
#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ScrapeError::fetch(url, "HTTP request failed with status 404 Not Found"))
    }
}
