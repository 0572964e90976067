//! Presentation shapes built from the scan → filter → categorize pipeline.
//!
//! Pages and the JSON API read the store through this module only. Each call
//! re-scans the directory; nothing is cached between requests.

use crate::filter::filter;
use crate::naming::categorize;
use crate::scan::PhotoStore;
use crate::types::{PhotoEntry, Variant};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::Serialize;

/// Bytes escaped in a filename path segment. Everything axum's `Path`
/// extractor would decode differently, or `http::Uri` would reject.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Sorted public filenames for a variant.
pub fn list_photos(store: &PhotoStore, variant: Variant, exclude_about: bool) -> Vec<String> {
    filter(store.scan(variant), exclude_about)
}

/// Sorted public photos for a variant, each tagged with its category.
pub fn list_entries(store: &PhotoStore, variant: Variant, exclude_about: bool) -> Vec<PhotoEntry> {
    list_photos(store, variant, exclude_about)
        .into_iter()
        .map(|filename| PhotoEntry {
            category: categorize(&filename),
            filename,
            variant,
        })
        .collect()
}

/// Landing carousel: mobile photos only, uncategorized.
pub fn landing_photos(store: &PhotoStore) -> Vec<String> {
    list_photos(store, Variant::Mobile, true)
}

/// Both variants, categorized, for the portfolio page.
#[derive(Debug, Clone)]
pub struct Portfolio {
    pub desktop: Vec<PhotoEntry>,
    pub mobile: Vec<PhotoEntry>,
}

pub fn portfolio(store: &PhotoStore) -> Portfolio {
    Portfolio {
        desktop: list_entries(store, Variant::Desktop, true),
        mobile: list_entries(store, Variant::Mobile, true),
    }
}

/// One item of the `/api/photos` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiPhoto {
    pub filename: String,
    pub url: String,
    pub view_url: String,
}

/// Envelope of the `/api/photos` response.
#[derive(Debug, Clone, Serialize)]
pub struct PhotoListing {
    pub variant: Variant,
    pub count: usize,
    pub photos: Vec<ApiPhoto>,
}

pub fn api_listing(store: &PhotoStore, variant: Variant) -> PhotoListing {
    let photos: Vec<ApiPhoto> = list_photos(store, variant, true)
        .into_iter()
        .map(|filename| ApiPhoto {
            url: photo_url(variant, &filename),
            view_url: view_url(variant, &filename),
            filename,
        })
        .collect();
    PhotoListing {
        variant,
        count: photos.len(),
        photos,
    }
}

fn encode_segment(filename: &str) -> String {
    utf8_percent_encode(filename, PATH_SEGMENT).to_string()
}

/// Raw file route for a photo. The filename is percent-encoded.
pub fn photo_url(variant: Variant, filename: &str) -> String {
    format!("/photos/{variant}/{}", encode_segment(filename))
}

/// Detail page route for a photo. The filename is percent-encoded.
pub fn view_url(variant: Variant, filename: &str) -> String {
    format!("/view/{variant}/{}", encode_segment(filename))
}

/// Where the detail page's back link points.
///
/// Parsed leniently from the `from` query parameter: `portfolio` returns to
/// the portfolio, anything else (or nothing) returns home.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnTo {
    Home,
    Portfolio,
}

impl ReturnTo {
    pub fn from_param(from: Option<&str>) -> Self {
        match from {
            Some("portfolio") => ReturnTo::Portfolio,
            _ => ReturnTo::Home,
        }
    }

    pub fn href(self) -> &'static str {
        match self {
            ReturnTo::Home => "/",
            ReturnTo::Portfolio => "/portfolio",
        }
    }

    /// Query suffix that carries this context onto sibling detail links.
    pub fn query(self) -> &'static str {
        match self {
            ReturnTo::Home => "",
            ReturnTo::Portfolio => "?from=portfolio",
        }
    }
}

/// Previous and next photos around `filename` in a sorted listing.
///
/// Both are `None` when the file is not part of the listing; the detail page
/// does not require it to be.
pub fn neighbors<'a>(listing: &'a [String], filename: &str) -> (Option<&'a str>, Option<&'a str>) {
    let Some(idx) = listing.iter().position(|name| name == filename) else {
        return (None, None);
    };
    let prev = idx.checked_sub(1).map(|i| listing[i].as_str());
    let next = listing.get(idx + 1).map(String::as_str);
    (prev, next)
}
