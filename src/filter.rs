//! Exclusion and ordering applied to every scan before it reaches a caller.

/// Marker for author portraits. Matched case-insensitively anywhere in a name.
pub const ABOUT_ME_TAG: &str = "about_me";

/// Whether a filename carries the [`ABOUT_ME_TAG`].
pub fn is_about_me(filename: &str) -> bool {
    filename.to_lowercase().contains(ABOUT_ME_TAG)
}

/// Drop tagged names when `exclude_about` is set, then sort ascending.
///
/// Ordering is byte-wise on the filename, so the result never depends on the
/// order the filesystem returned entries in.
pub fn filter(entries: Vec<String>, exclude_about: bool) -> Vec<String> {
    let mut kept: Vec<String> = entries
        .into_iter()
        .filter(|name| !(exclude_about && is_about_me(name)))
        .collect();
    kept.sort();
    kept
}
