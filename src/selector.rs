//! Playlist entry selection
//!
//! Orders feed entries newest first and resolves one thumbnail URL per entry
//! until the download limit is reached.

use crate::resolver::UrlResolver;
use crate::types::{Dimensions, DownloadLimit, Feed, FeedEntry, Thumbnail};
use std::collections::BTreeSet;
use tracing::debug;

/// Picks thumbnail URLs from a feed
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaylistSelector {
    resolver: UrlResolver,
}

impl PlaylistSelector {
    /// Create a selector resolving URLs with `resolver`
    pub fn new(resolver: UrlResolver) -> Self {
        Self { resolver }
    }

    /// Select up to `limit` thumbnail URLs at `target`, newest entries first
    ///
    /// The feed's entries are re-sorted in place by upload date. Entries that
    /// cannot be resolved are skipped without error.
    pub fn select(&self, feed: &mut Feed, target: Dimensions, limit: DownloadLimit) -> Vec<String> {
        let entries = feed.entries_mut();
        sort_by_recency(entries);

        let mut urls = Vec::new();
        for entry in entries.iter() {
            if limit.is_reached(urls.len()) {
                break;
            }
            match self.resolver.resolve(&entry.thumbnails, target) {
                Some(url) => urls.push(url),
                None => debug!(
                    upload_date = entry.upload_date(),
                    %target,
                    "Skipping entry without a resolvable thumbnail"
                ),
            }
        }
        urls
    }
}

/// Sort entries by upload date, newest first
///
/// Dates compare as plain strings; a missing date compares as `""` and
/// therefore sorts last. The sort is stable.
pub fn sort_by_recency(entries: &mut [FeedEntry]) {
    entries.sort_by(|a, b| b.upload_date().cmp(a.upload_date()));
}

/// Distinct sizes offered by a list of thumbnail variants
///
/// Variants missing either dimension, or with a zero dimension, are ignored.
pub fn available_sizes(thumbnails: &[Thumbnail]) -> BTreeSet<Dimensions> {
    thumbnails
        .iter()
        .filter_map(Thumbnail::dimensions)
        .filter(|d| d.width > 0 && d.height > 0)
        .collect()
}
