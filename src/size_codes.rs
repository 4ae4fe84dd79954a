//! Size-code table
//!
//! The thumbnail CDN encodes the rendered resolution as a short token inside
//! an otherwise stable URL. Swapping one known token for another yields the
//! same image at a different size. This module holds the known tokens.

use crate::types::Dimensions;

/// Ratio at or above which a non-square size counts as landscape/portrait
const WIDE_ASPECT_THRESHOLD: f64 = 1.7;

/// One known size code
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizeCode {
    /// Token as it appears in thumbnail URLs
    pub code: &'static str,
    /// Resolution the token renders at
    pub dimensions: Dimensions,
}

const fn entry(code: &'static str, width: u32, height: u32) -> SizeCode {
    SizeCode {
        code,
        dimensions: Dimensions::new(width, height),
    }
}

/// Built-in codes, in lookup order
pub static BUILTIN_SIZE_CODES: &[SizeCode] = &[
    // Square
    entry("Q_v", 90, 90),
    entry("O-xb", 360, 360),
    // Landscape
    entry("qR4e", 1280, 720),
    entry("uQ4e", 1280, 660),
    entry("OvCc", 640, 360),
    entry("kvCc", 640, 330),
    entry("oq1b", 480, 270),
    entry("4p1b", 480, 248),
    entry("0kob", 320, 180),
    entry("Gkob", 320, 160),
    // Portrait
    entry("aiEB", 720, 1280),
    entry("adyb", 360, 640),
    // Other
    entry("GWF", 130, 80),
    entry("UHP", 170, 94),
    entry("ibH", 135, 240),
    entry("ajN", 160, 320),
    entry("8KP", 170, 300),
    entry("GbS", 180, 320),
    entry("8N6", 240, 124),
    entry("hO6", 240, 135),
    entry("qccb", 270, 480),
    entry("49bb", 270, 200),
    entry("7rjb", 300, 155),
    entry("ksjb", 300, 170),
    entry("axjb", 300, 480),
    entry("Lkob", 320, 165),
    entry("67xb", 360, 186),
    entry("l8xb", 360, 203),
    entry("Sq1b", 480, 300),
    entry("Or1b", 480, 360),
];

/// Aspect-ratio bucket used when listing sizes
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum AspectCategory {
    /// Width equals height
    Square,
    /// Width at least 1.7 times the height
    Landscape,
    /// Height at least 1.7 times the width
    Portrait,
    /// Everything else
    Other,
}

impl AspectCategory {
    /// Classify a size
    pub fn of(dimensions: Dimensions) -> Self {
        let Dimensions { width, height } = dimensions;
        if width == height {
            AspectCategory::Square
        } else if width > height
            && f64::from(width) / f64::from(height) >= WIDE_ASPECT_THRESHOLD
        {
            AspectCategory::Landscape
        } else if height > width
            && f64::from(height) / f64::from(width) >= WIDE_ASPECT_THRESHOLD
        {
            AspectCategory::Portrait
        } else {
            AspectCategory::Other
        }
    }

    /// Heading used in listings
    pub fn label(&self) -> &'static str {
        match self {
            AspectCategory::Square => "Square",
            AspectCategory::Landscape => "Landscape",
            AspectCategory::Portrait => "Portrait",
            AspectCategory::Other => "Other",
        }
    }
}

/// Immutable, ordered mapping from size code to dimensions
#[derive(Clone, Copy, Debug)]
pub struct SizeCodeTable {
    entries: &'static [SizeCode],
}

impl Default for SizeCodeTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SizeCodeTable {
    /// Table backed by [`BUILTIN_SIZE_CODES`]
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_SIZE_CODES,
        }
    }

    /// Table backed by an arbitrary static slice
    pub const fn from_static(entries: &'static [SizeCode]) -> Self {
        Self { entries }
    }

    /// All entries in lookup order
    pub fn entries(&self) -> &'static [SizeCode] {
        self.entries
    }

    /// First code (in table order) rendering exactly at `dimensions`
    pub fn lookup_code_for_size(&self, dimensions: Dimensions) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|e| e.dimensions == dimensions)
            .map(|e| e.code)
    }

    /// Dimensions for a known code
    pub fn dimensions_for_code(&self, code: &str) -> Option<Dimensions> {
        self.entries
            .iter()
            .find(|e| e.code == code)
            .map(|e| e.dimensions)
    }

    /// Every known code, in table order
    pub fn codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.code)
    }

    /// Distinct sizes, sorted, grouped by aspect category
    ///
    /// Groups come out as Square, Landscape, Portrait, Other; empty groups are
    /// left out.
    pub fn sizes_by_aspect(&self) -> Vec<(AspectCategory, Vec<Dimensions>)> {
        let mut sizes: Vec<Dimensions> = self.entries.iter().map(|e| e.dimensions).collect();
        sizes.sort();
        sizes.dedup();

        let mut groups: Vec<(AspectCategory, Vec<Dimensions>)> = Vec::new();
        for category in [
            AspectCategory::Square,
            AspectCategory::Landscape,
            AspectCategory::Portrait,
            AspectCategory::Other,
        ] {
            let members: Vec<Dimensions> = sizes
                .iter()
                .copied()
                .filter(|d| AspectCategory::of(*d) == category)
                .collect();
            if !members.is_empty() {
                groups.push((category, members));
            }
        }
        groups
    }
}
