//! Core types for thumbnail-dl

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::error::Error;

/// A (width, height) pair in pixels
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Dimensions {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Dimensions {
    /// Create a new pair
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height (0.0 for a zero height)
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        f64::from(self.width) / f64::from(self.height)
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}×{}", self.width, self.height)
    }
}

/// One thumbnail variant of a feed entry
///
/// Every field is optional: feeds are loosely structured and a missing
/// dimension simply never matches.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    /// Width in pixels
    #[serde(default, deserialize_with = "lenient::pixels")]
    pub w: Option<u32>,
    /// Height in pixels
    #[serde(default, deserialize_with = "lenient::pixels")]
    pub h: Option<u32>,
    /// Image URL
    #[serde(default, deserialize_with = "lenient::text")]
    pub url: Option<String>,
}

impl Thumbnail {
    /// Dimensions of this variant, if both are present
    pub fn dimensions(&self) -> Option<Dimensions> {
        match (self.w, self.h) {
            (Some(w), Some(h)) => Some(Dimensions::new(w, h)),
            _ => None,
        }
    }

    /// Non-empty URL of this variant
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }
}

/// One playlist item
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    /// Upload timestamp, lexically sortable
    #[serde(
        rename = "uploadDate",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub upload_date: Option<String>,

    /// Thumbnail variants, in feed order
    #[serde(default, deserialize_with = "lenient::list")]
    pub thumbnails: Vec<Thumbnail>,
}

impl FeedEntry {
    /// Upload date, with a missing value read as the empty string
    pub fn upload_date(&self) -> &str {
        self.upload_date.as_deref().unwrap_or("")
    }
}

// Feed field readers that map values of the wrong type to "absent"
mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Integral numbers (whole floats included) that fit in a `u32`
    pub fn pixels<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Value::Number(n) = Value::deserialize(deserializer)? else {
            return Ok(None);
        };
        let whole = n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        });
        Ok(whole.and_then(|v| u32::try_from(v).ok()))
    }

    /// Strings only
    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(Some(s)),
            _ => Ok(None),
        }
    }

    /// Arrays, dropping elements that do not parse; anything else is empty
    pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        match Value::deserialize(deserializer)? {
            Value::Array(items) => Ok(items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect()),
            _ => Ok(Vec::new()),
        }
    }
}

/// Parsed feed document
///
/// Keys other than `results` are kept in `extra` so that a feed carrying
/// only unrelated data is still distinguishable from an empty one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Feed {
    /// Playlist entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<FeedEntry>>,

    /// Any other top-level keys
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Feed {
    /// Build a feed from a list of entries
    pub fn from_entries(entries: Vec<FeedEntry>) -> Self {
        Self {
            results: Some(entries),
            extra: serde_json::Map::new(),
        }
    }

    /// True when the document carried nothing at all
    pub fn is_empty(&self) -> bool {
        self.results.is_none() && self.extra.is_empty()
    }

    /// Entries (empty slice when `results` is absent)
    pub fn entries(&self) -> &[FeedEntry] {
        self.results.as_deref().unwrap_or(&[])
    }

    /// Mutable entries (empty when `results` is absent)
    pub fn entries_mut(&mut self) -> &mut [FeedEntry] {
        self.results.as_deref_mut().unwrap_or(&mut [])
    }
}

/// Maximum number of thumbnails to select
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DownloadLimit {
    /// Select every resolvable entry
    All,
    /// Select at most this many
    Count(NonZeroUsize),
}

impl DownloadLimit {
    /// Whether `len` selected items already satisfy the limit
    pub fn is_reached(&self, len: usize) -> bool {
        match self {
            DownloadLimit::All => false,
            DownloadLimit::Count(n) => len >= n.get(),
        }
    }
}

impl Default for DownloadLimit {
    fn default() -> Self {
        DownloadLimit::Count(NonZeroUsize::new(20).unwrap_or(NonZeroUsize::MIN))
    }
}

impl std::fmt::Display for DownloadLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DownloadLimit::All => write!(f, "all"),
            DownloadLimit::Count(n) => write!(f, "{}", n),
        }
    }
}

impl std::str::FromStr for DownloadLimit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(DownloadLimit::All);
        }
        trimmed
            .parse::<usize>()
            .ok()
            .and_then(NonZeroUsize::new)
            .map(DownloadLimit::Count)
            .ok_or_else(|| Error::InvalidLimit(s.to_string()))
    }
}

impl Serialize for DownloadLimit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            DownloadLimit::All => serializer.serialize_str("all"),
            DownloadLimit::Count(n) => serializer.serialize_u64(n.get() as u64),
        }
    }
}

impl<'de> Deserialize<'de> for DownloadLimit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => usize::try_from(n)
                .ok()
                .and_then(NonZeroUsize::new)
                .map(DownloadLimit::Count)
                .ok_or_else(|| {
                    serde::de::Error::custom("Limit must be a positive number or 'all'")
                }),
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Result of fetching and selecting, before anything is downloaded
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DownloadPlan {
    /// Requested dimensions
    pub target: Dimensions,
    /// Whether the first feed entry listed any thumbnails at all
    pub first_entry_has_thumbnails: bool,
    /// Sizes offered inline by the first feed entry
    pub sample_sizes: BTreeSet<Dimensions>,
    /// Resolved thumbnail URLs, newest first
    pub urls: Vec<String>,
    /// Number of entries in the feed
    pub total_available: usize,
}

/// A single failed download
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailedDownload {
    /// The URL that failed
    pub url: String,
    /// Rendered error
    pub reason: String,
}

/// Outcome of a batch of downloads
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    /// Files written, in download order
    pub saved: Vec<PathBuf>,
    /// Downloads that failed and were skipped
    pub failed: Vec<FailedDownload>,
}

impl DownloadSummary {
    /// Number of URLs attempted
    pub fn attempted(&self) -> usize {
        self.saved.len() + self.failed.len()
    }
}

/// Outcome of a full run
#[derive(Clone, Debug, PartialEq)]
pub enum RunSummary {
    /// Feed was empty or could not be fetched
    NoData,
    /// Feed was processed
    Completed {
        /// What was selected
        plan: DownloadPlan,
        /// What happened when downloading it
        downloads: DownloadSummary,
    },
}
