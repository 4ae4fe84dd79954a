//! Playlist feed fetching
//!
//! The feed is a JSON document listing playlist entries and their thumbnail
//! variants. Fetch failures are not fatal: they are logged and reported as an
//! empty [`Feed`], which callers treat as "nothing to process".

use crate::config::FeedConfig;
use crate::error::{Error, Result};
use crate::types::Feed;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use tracing::{debug, warn};

/// Fetches and parses playlist feeds
#[derive(Clone, Debug)]
pub struct FeedFetcher {
    /// HTTP client carrying the browser-like headers and the feed timeout
    http_client: reqwest::Client,
}

impl FeedFetcher {
    /// Create a fetcher from feed settings
    ///
    /// # Errors
    /// Returns error if a header value is invalid or the HTTP client cannot be built
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let accept = HeaderValue::from_str(&config.accept)
            .map_err(|e| Error::config(format!("invalid Accept header: {}", e), "feed.accept"))?;
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, accept);

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        Ok(Self { http_client })
    }

    /// Fetch a feed, logging any failure and returning an empty feed instead
    pub async fn fetch(&self, feed_url: &str) -> Feed {
        match self.try_fetch(feed_url).await {
            Ok(feed) => feed,
            Err(e) => {
                warn!(url = feed_url, error = %e, "Error loading JSON feed");
                Feed::default()
            }
        }
    }

    /// Fetch a feed, reporting failures as errors
    ///
    /// # Errors
    /// Returns error if:
    /// - the request fails or times out
    /// - the server answers with a non-success status
    /// - the body is not a JSON object of the expected shape
    pub async fn try_fetch(&self, feed_url: &str) -> Result<Feed> {
        debug!("Fetching feed: {}", feed_url);

        let response = self.http_client.get(feed_url).send().await?;

        // Check HTTP status before trying to parse the response body
        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                url: feed_url.to_string(),
            });
        }

        let body = response.bytes().await?;
        let feed: Feed = serde_json::from_slice(&body)?;

        debug!(
            entries = feed.entries().len(),
            "Successfully parsed feed from {}", feed_url
        );
        Ok(feed)
    }
}
