//! Thumbnail URL resolution
//!
//! Finds a URL for a target size among an entry's thumbnail variants, or
//! derives one by rewriting the size code embedded in the first variant's URL.

use crate::size_codes::SizeCodeTable;
use crate::types::{Dimensions, Thumbnail};
use tracing::debug;

/// Maps (thumbnails, target size) to a thumbnail URL
#[derive(Clone, Copy, Debug, Default)]
pub struct UrlResolver {
    table: SizeCodeTable,
}

impl UrlResolver {
    /// Create a resolver over the given size-code table
    pub fn new(table: SizeCodeTable) -> Self {
        Self { table }
    }

    /// The table this resolver rewrites with
    pub fn table(&self) -> &SizeCodeTable {
        &self.table
    }

    /// Resolve a URL for `target`
    ///
    /// Resolution order:
    /// 1. The first variant whose dimensions equal `target` exactly.
    /// 2. The first variant's URL with its size code swapped for the target's.
    ///
    /// Returns `None` if neither step yields a URL, including for an empty list.
    pub fn resolve(&self, thumbnails: &[Thumbnail], target: Dimensions) -> Option<String> {
        if let Some(url) = find_exact(thumbnails, target) {
            debug!(%target, url, "exact thumbnail match");
            return Some(url.to_string());
        }

        let template = thumbnails.first()?.url()?;
        let derived = self.rewrite_size_code(template, target);
        match &derived {
            Some(url) => debug!(%target, template, url = url.as_str(), "derived thumbnail URL"),
            None => debug!(%target, template, "no size code to rewrite"),
        }
        derived
    }

    /// Swap the size code in `url` for the code rendering at `target`
    ///
    /// The code substituted is the first known code (in table order) that
    /// occurs anywhere in `url`, not necessarily the token the CDN actually
    /// reads. All of its occurrences are replaced.
    pub fn rewrite_size_code(&self, url: &str, target: Dimensions) -> Option<String> {
        let target_code = self.table.lookup_code_for_size(target)?;
        let current = self.table.codes().find(|code| url.contains(code))?;
        Some(url.replace(current, target_code))
    }
}

/// URL of the first variant that is exactly `target`
///
/// Only the first variant with matching dimensions is considered; if it has no
/// URL the result is `None` even when a later duplicate has one.
pub fn find_exact(thumbnails: &[Thumbnail], target: Dimensions) -> Option<&str> {
    thumbnails
        .iter()
        .find(|t| t.dimensions() == Some(target))
        .and_then(Thumbnail::url)
}
