//! Photo store scanning.
//!
//! The photo store is a read-only directory tree with one subdirectory per
//! [`Variant`]:
//!
//! ```text
//! static/                       # Photo root (`static_dir` in config.toml)
//! ├── desktop/
//! │   ├── Supercars-001-red.jpg
//! │   ├── classic_002.png
//! │   └── studio_about_me.jpg   # Author photo, hidden from public listings
//! └── mobile/
//!     ├── sports-lap.webp
//!     └── notes.txt             # Ignored: not an image
//! ```
//!
//! ## Rules
//!
//! - Only regular files whose name ends with an image extension are listed
//!   (see [`IMAGE_EXTENSIONS`]); the check is case-insensitive.
//! - Names that are not valid UTF-8 are skipped.
//! - No recursion: subdirectories of a variant directory are ignored.
//! - A missing variant directory is an empty listing, not an error. Variants
//!   are deployed independently and may not exist yet.
//! - An unreadable directory or entry degrades to "not listed" with a warning.
//! - Symlinks are followed or not according to the platform's `metadata`
//!   behaviour; no guarantee is made either way.
//!
//! The scanner returns names in filesystem order. Callers must go through
//! [`crate::filter`] before exposing them.

use crate::types::Variant;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Recognized image extensions, lowercase, without the dot.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "avif"];

/// Handle on the photo root. Cheap to clone; holds no directory state.
#[derive(Debug, Clone)]
pub struct PhotoStore {
    root: PathBuf,
}

impl PhotoStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding a variant's photos. May not exist.
    pub fn variant_dir(&self, variant: Variant) -> PathBuf {
        self.root.join(variant.as_str())
    }

    /// Path of `filename` inside a variant directory.
    ///
    /// `None` unless `filename` is a single plain path component, so the
    /// result can never point outside the variant directory. Existence is not
    /// checked.
    pub fn file_path(&self, variant: Variant, filename: &str) -> Option<PathBuf> {
        let mut components = Path::new(filename).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) if name == filename => {
                Some(self.variant_dir(variant).join(name))
            }
            _ => None,
        }
    }

    /// Image filenames in a variant directory, unsorted.
    pub fn scan(&self, variant: Variant) -> Vec<String> {
        scan_dir(&self.variant_dir(variant))
    }
}

/// Image filenames directly inside `dir`, in filesystem order.
///
/// Never fails: a missing or unreadable directory yields an empty list.
pub fn scan_dir(dir: &Path) -> Vec<String> {
    match read_image_names(dir) {
        Ok(names) => {
            tracing::debug!(dir = %dir.display(), count = names.len(), "scanned photo directory");
            names
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(dir = %dir.display(), "photo directory absent, listing is empty");
            Vec::new()
        }
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "photo directory unreadable, listing is empty");
            Vec::new()
        }
    }
}

fn read_image_names(dir: &Path) -> io::Result<Vec<String>> {
    let names = fs::read_dir(dir)?
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| is_image_name(name))
        .collect();
    Ok(names)
}

/// Whether a filename ends in `.` plus a recognized image extension, in any
/// case. A bare `.jpg` counts.
pub fn is_image_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| {
        lower
            .strip_suffix(ext)
            .is_some_and(|stem| stem.ends_with('.'))
    })
}
