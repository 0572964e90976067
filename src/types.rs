//! Shared types used across the listing pipeline and the HTTP layer.
//!
//! Nothing here is stored: a [`PhotoEntry`] is rebuilt from the photo store on
//! every request and dropped once the response has been rendered.

use crate::naming::Category;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A device-targeted image set, stored as a subdirectory of the photo root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Desktop,
    Mobile,
}

impl Variant {
    /// Every variant, in display order.
    pub const ALL: [Variant; 2] = [Variant::Desktop, Variant::Mobile];

    /// Lowercase name; also the subdirectory name and the URL segment.
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Desktop => "desktop",
            Variant::Mobile => "mobile",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown variant: {0:?}")]
pub struct UnknownVariant(pub String);

impl FromStr for Variant {
    type Err = UnknownVariant;

    /// Exact, case-sensitive match. `"Desktop"` is not a variant.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "desktop" => Ok(Variant::Desktop),
            "mobile" => Ok(Variant::Mobile),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// A photo found in the store, tagged with its gallery category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoEntry {
    pub filename: String,
    pub variant: Variant,
    pub category: Category,
}
