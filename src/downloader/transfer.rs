//! Thumbnail transfer: fetch image bytes and write them to disk.

use crate::config::{DownloadConfig, FileCollisionAction};
use crate::error::{Error, Result};
use crate::types::{DownloadSummary, FailedDownload};
use crate::utils::{filename_from_url, resolve_collision};
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Downloads thumbnails one at a time into an output directory
#[derive(Clone, Debug)]
pub struct Downloader {
    /// Plain HTTP client; only carries a timeout when one is configured
    http_client: reqwest::Client,
    /// Directory files are written to
    output_dir: PathBuf,
    /// Policy for existing files
    file_collision: FileCollisionAction,
}

impl Downloader {
    /// Create a downloader from download settings
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: &DownloadConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(Self {
            http_client,
            output_dir: config.output_dir.clone(),
            file_collision: config.file_collision,
        })
    }

    /// Directory files are written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Fetch the body of `url`
    ///
    /// # Errors
    /// Returns error on transport failure or a non-success status
    pub async fn download(&self, url: &str) -> Result<Bytes> {
        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        debug!(url, bytes = bytes.len(), "Fetched thumbnail");
        Ok(bytes)
    }

    /// Write `bytes` to `filename` inside the output directory
    ///
    /// An existing file is truncated unless the collision policy says
    /// otherwise. Returns the path actually written.
    pub async fn save(&self, bytes: &[u8], filename: &str) -> Result<PathBuf> {
        let path = resolve_collision(&self.output_dir.join(filename), self.file_collision)?;
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }

    /// Download `url` and save it under the last segment of its path
    pub async fn download_to_file(&self, url: &str) -> Result<PathBuf> {
        let filename = filename_from_url(url)?;
        let bytes = self.download(url).await?;
        let path = self.save(&bytes, filename).await?;
        info!("Downloaded {} to {}", url, path.display());
        Ok(path)
    }

    /// Download every URL in order
    ///
    /// A failed download is logged and recorded; the remaining URLs are still
    /// attempted.
    pub async fn download_all<I, S>(&self, urls: I) -> DownloadSummary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut summary = DownloadSummary::default();
        for url in urls {
            let url = url.as_ref();
            match self.download_to_file(url).await {
                Ok(path) => summary.saved.push(path),
                Err(e) => {
                    warn!("Error downloading {}: {}", url, e);
                    summary.failed.push(FailedDownload {
                        url: url.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        summary
    }
}
