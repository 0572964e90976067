//! Shared test utilities for the photo-folio test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = photo_store(&[
//!     ("desktop", &["Supercars-001.jpg", "about_me.png"]),
//!     ("mobile", &["classic_1.webp"]),
//! ]);
//! let store = PhotoStore::new(tmp.path());
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::config::SiteConfig;
use crate::types::PhotoEntry;

// =========================================================================
// Fixture setup
// =========================================================================

/// Build a photo root in a temp directory.
///
/// Each `(dir, files)` pair creates `dir/` under the root and writes a small
/// placeholder into every listed file. The scanner only looks at names, so
/// the contents are never decoded.
pub fn photo_store(layout: &[(&str, &[&str])]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (dir, files) in layout {
        let dir_path = tmp.path().join(dir);
        std::fs::create_dir_all(&dir_path).unwrap();
        for file in *files {
            std::fs::write(dir_path.join(file), "fake image").unwrap();
        }
    }
    tmp
}

/// Stock config pointed at `static_dir`.
pub fn test_config(static_dir: &Path) -> SiteConfig {
    SiteConfig {
        static_dir: static_dir.to_string_lossy().to_string(),
        ..SiteConfig::default()
    }
}

// =========================================================================
// Extractors
// =========================================================================

/// Filenames of a listing, in order.
pub fn filenames(entries: &[PhotoEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.filename.as_str()).collect()
}
