//! Thumbnail downloading split into focused submodules.
//!
//! [`ThumbnailDownloader`] ties the pipeline together:
//! - [`FeedFetcher`](crate::feed::FeedFetcher) loads the playlist feed
//! - [`PlaylistSelector`](crate::selector::PlaylistSelector) orders entries and resolves URLs
//! - [`transfer`] fetches each URL and writes it to the output directory

mod transfer;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

pub use transfer::Downloader;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::feed::FeedFetcher;
use crate::resolver::UrlResolver;
use crate::selector::{PlaylistSelector, available_sizes};
use crate::size_codes::SizeCodeTable;
use crate::types::{DownloadPlan, DownloadSummary, RunSummary};
use tracing::{debug, info};

/// Fetches a playlist feed and downloads its thumbnails at a target size
#[derive(Clone, Debug)]
pub struct ThumbnailDownloader {
    /// Configuration the downloader was built from
    config: Config,
    /// Feed client
    fetcher: FeedFetcher,
    /// Entry ordering and URL resolution
    selector: PlaylistSelector,
    /// Thumbnail client and file writer
    downloader: Downloader,
}

impl ThumbnailDownloader {
    /// Create a new ThumbnailDownloader instance
    ///
    /// This validates the configuration, builds both HTTP clients and makes
    /// sure the output directory exists.
    pub async fn new(config: Config) -> Result<Self> {
        config.validate()?;

        tokio::fs::create_dir_all(&config.download.output_dir)
            .await
            .map_err(|e| {
                Error::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create output directory '{}': {}",
                        config.download.output_dir.display(),
                        e
                    ),
                ))
            })?;

        let fetcher = FeedFetcher::new(&config.feed)?;
        let downloader = Downloader::new(&config.download)?;

        Ok(Self {
            config,
            fetcher,
            selector: PlaylistSelector::default(),
            downloader,
        })
    }

    /// Resolve URLs against a custom size code table
    pub fn with_size_codes(mut self, table: SizeCodeTable) -> Self {
        self.selector = PlaylistSelector::new(UrlResolver::new(table));
        self
    }

    /// Configuration in effect
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The thumbnail downloader used by [`execute`](Self::execute)
    pub fn downloader(&self) -> &Downloader {
        &self.downloader
    }

    /// Fetch the feed and decide what to download
    ///
    /// Returns `None` when the feed is empty or could not be loaded.
    pub async fn plan(&self, feed_url: &str) -> Option<DownloadPlan> {
        let mut feed = self.fetcher.fetch(feed_url).await;
        if feed.is_empty() {
            debug!(url = feed_url, "Feed is empty");
            return None;
        }

        let first_thumbnails = feed
            .entries()
            .first()
            .map(|entry| entry.thumbnails.as_slice())
            .unwrap_or_default();
        let first_entry_has_thumbnails = !first_thumbnails.is_empty();
        let sample_sizes = available_sizes(first_thumbnails);
        let total_available = feed.entries().len();

        let target = self.config.selection.target();
        let urls = self
            .selector
            .select(&mut feed, target, self.config.selection.limit);

        info!(
            %target,
            selected = urls.len(),
            total_available,
            "Planned thumbnail downloads"
        );

        Some(DownloadPlan {
            target,
            first_entry_has_thumbnails,
            sample_sizes,
            urls,
            total_available,
        })
    }

    /// Download every URL of a plan, in order
    pub async fn execute(&self, plan: &DownloadPlan) -> DownloadSummary {
        let summary = self.downloader.download_all(&plan.urls).await;
        info!(
            saved = summary.saved.len(),
            failed = summary.failed.len(),
            "Finished downloading thumbnails"
        );
        summary
    }

    /// Plan and execute in one go
    pub async fn run(&self, feed_url: &str) -> RunSummary {
        match self.plan(feed_url).await {
            Some(plan) => {
                let downloads = self.execute(&plan).await;
                RunSummary::Completed { plan, downloads }
            }
            None => RunSummary::NoData,
        }
    }
}
