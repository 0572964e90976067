//! Gallery categories from the `<category>-name` filename convention.
//!
//! The photo store has no metadata files: a photo's gallery category is
//! encoded in the first word of its filename, followed by a dash or an
//! underscore. Matching is case-insensitive.
//!
//! ```text
//! Supercars-001-red.jpg   → supercars
//! classic_002.png         → classic
//! sports-lap.webp         → sports
//! STUDIO_light.avif       → studio
//! random.jpg              → all
//! sports.jpg              → all   (no separator after the prefix)
//! ```
//!
//! Candidates are tested in [`Category::CANDIDATES`] order and the first match
//! wins. The prefixes are disjoint today; the fixed order keeps the result
//! deterministic if that ever changes.

use serde::Serialize;
use std::fmt;

/// Gallery grouping tag. `All` is the fallback for unprefixed filenames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Supercars,
    Classic,
    Sports,
    Studio,
    All,
}

impl Category {
    /// Prefix candidates in match order. `All` is never a candidate.
    pub const CANDIDATES: [Category; 4] = [
        Category::Supercars,
        Category::Classic,
        Category::Sports,
        Category::Studio,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Supercars => "supercars",
            Category::Classic => "classic",
            Category::Sports => "sports",
            Category::Studio => "studio",
            Category::All => "all",
        }
    }

    /// Human label for filter buttons.
    pub fn label(self) -> &'static str {
        match self {
            Category::Supercars => "Supercars",
            Category::Classic => "Classic",
            Category::Sports => "Sports",
            Category::Studio => "Studio",
            Category::All => "All",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Infer the category of a filename. Total: never fails, never empty.
pub fn categorize(filename: &str) -> Category {
    let lower = filename.to_lowercase();
    Category::CANDIDATES
        .into_iter()
        .find(|category| has_category_prefix(&lower, category.as_str()))
        .unwrap_or(Category::All)
}

fn has_category_prefix(lower: &str, prefix: &str) -> bool {
    lower
        .strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with('-') || rest.starts_with('_'))
}
