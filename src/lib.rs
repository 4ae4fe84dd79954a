//! # thumbnail-dl
//!
//! Download playlist thumbnails at a chosen resolution.
//!
//! A playlist feed lists entries with a few thumbnail variants each. When the
//! wanted size is not among them, the URL of another variant is rewritten by
//! swapping the size code embedded in it (see [`size_codes`]).
//!
//! ## Quick Start
//!
//! ```no_run
//! use thumbnail_dl::{Config, RunSummary, ThumbnailDownloader};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = Config::default();
//!     config.selection.width = 640;
//!     config.selection.height = 360;
//!
//!     let downloader = ThumbnailDownloader::new(config).await?;
//!     match downloader.run("https://example.com/playlist.json").await {
//!         RunSummary::NoData => println!("No data to process."),
//!         RunSummary::Completed { downloads, .. } => {
//!             println!("Saved {} thumbnails", downloads.saved.len());
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Feed download and thumbnail transfer
pub mod downloader;
/// Error types
pub mod error;
/// Playlist feed fetching
pub mod feed;
/// Thumbnail URL resolution
pub mod resolver;
/// Entry ordering and selection
pub mod selector;
/// Size code table
pub mod size_codes;
/// Core data types
pub mod types;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use config::{Config, FileCollisionAction};
pub use downloader::{Downloader, ThumbnailDownloader};
pub use error::{Error, Result};
pub use feed::FeedFetcher;
pub use resolver::UrlResolver;
pub use selector::PlaylistSelector;
pub use size_codes::{AspectCategory, SizeCode, SizeCodeTable};
pub use types::{
    Dimensions, DownloadLimit, DownloadPlan, DownloadSummary, Feed, FeedEntry, RunSummary,
    Thumbnail,
};
