//! Configuration types for thumbnail-dl
//!
//! Every field has a default, so an empty TOML file (or no file at all) yields
//! a working configuration. Durations are written as whole seconds.

use crate::error::{Error, Result};
use crate::types::{Dimensions, DownloadLimit};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Browser User-Agent sent with feed requests
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/90.0.4430.212 Safari/537.36";

/// Accept header sent with feed requests
pub const DEFAULT_FEED_ACCEPT: &str = "application/json, text/javascript, */*; q=0.01";

/// Feed request settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// User-Agent header for the feed request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Accept header for the feed request
    #[serde(default = "default_feed_accept")]
    pub accept: String,

    /// Request timeout (default: 10 seconds)
    #[serde(default = "default_feed_timeout", with = "seconds")]
    pub timeout: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            accept: default_feed_accept(),
            timeout: default_feed_timeout(),
        }
    }
}

/// Thumbnail download settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Directory files are written to (default: current directory)
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Per-download timeout (None = wait indefinitely)
    #[serde(default, with = "seconds::option")]
    pub timeout: Option<Duration>,

    /// What to do when the target file already exists
    #[serde(default)]
    pub file_collision: FileCollisionAction,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            timeout: None,
            file_collision: FileCollisionAction::default(),
        }
    }
}

/// Which thumbnails to pick
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Target width (default: 1280)
    #[serde(default = "default_width")]
    pub width: u32,

    /// Target height (default: 720)
    #[serde(default = "default_height")]
    pub height: u32,

    /// Maximum number of thumbnails (default: 20)
    #[serde(default)]
    pub limit: DownloadLimit,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            limit: DownloadLimit::default(),
        }
    }
}

impl SelectionConfig {
    /// Target size as a pair
    pub fn target(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }
}

/// File collision handling
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCollisionAction {
    /// Truncate and replace the existing file (default)
    #[default]
    Overwrite,
    /// Keep the existing file and report the download as failed
    Skip,
    /// Write next to it as "name (1).ext", "name (2).ext", ...
    Rename,
}

/// Main configuration
///
/// ```toml
/// [feed]
/// timeout = 10
///
/// [download]
/// output_dir = "thumbs"
/// file_collision = "rename"
///
/// [selection]
/// width = 640
/// height = 360
/// limit = "all"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Feed request settings
    #[serde(default)]
    pub feed: FeedConfig,

    /// Download settings
    #[serde(default)]
    pub download: DownloadConfig,

    /// Selection settings
    #[serde(default)]
    pub selection: SelectionConfig,
}

impl Config {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Read and parse a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Check values that would make a run pointless or impossible
    pub fn validate(&self) -> Result<()> {
        if self.selection.width == 0 {
            return Err(Error::config(
                "width must be greater than zero",
                "selection.width",
            ));
        }
        if self.selection.height == 0 {
            return Err(Error::config(
                "height must be greater than zero",
                "selection.height",
            ));
        }
        if self.feed.timeout.is_zero() {
            return Err(Error::config(
                "feed timeout must be greater than zero",
                "feed.timeout",
            ));
        }
        if self.download.timeout.is_some_and(|t| t.is_zero()) {
            return Err(Error::config(
                "download timeout must be greater than zero when set",
                "download.timeout",
            ));
        }
        if self.feed.user_agent.trim().is_empty() {
            return Err(Error::config("user agent must not be empty", "feed.user_agent"));
        }
        Ok(())
    }
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_feed_accept() -> String {
    DEFAULT_FEED_ACCEPT.to_string()
}

fn default_feed_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    720
}

// Durations as whole seconds
mod seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }

    // Same, for settings where absence means "no limit"
    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            duration: &Option<Duration>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            duration.map(|d| d.as_secs()).serialize(serializer)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Duration>, D::Error> {
            Option::<u64>::deserialize(deserializer).map(|secs| secs.map(Duration::from_secs))
        }
    }
}
