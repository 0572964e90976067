//! CLI output for `photo-folio scan`.
//!
//! Shows what the site would list right now, per variant, with each photo's
//! category. Paths are secondary context on indented `Source:` lines.
//!
//! ```text
//! desktop (2 photos)
//!     Source: static/desktop/
//!     001 Supercars-001-red.jpg [supercars]
//!     002 random.jpg [all]
//!     Hidden: studio_about_me.jpg
//! mobile (absent)
//!     Source: static/mobile/
//!
//! Categories
//!     supercars: 1
//!     classic: 0
//!     sports: 0
//!     studio: 0
//!     all: 1
//! ```
//!
//! [`build_report`] touches the filesystem; [`format_scan_output`] is pure and
//! returns lines for testability; [`print_scan_output`] writes them to stdout.

use crate::filter::{filter, is_about_me};
use crate::listing::list_entries;
use crate::naming::Category;
use crate::scan::PhotoStore;
use crate::types::{PhotoEntry, Variant};
use std::path::PathBuf;

/// Snapshot of one variant directory.
#[derive(Debug)]
pub struct VariantReport {
    pub variant: Variant,
    pub dir: PathBuf,
    pub exists: bool,
    pub entries: Vec<PhotoEntry>,
    /// About-me photos left out of `entries`. Empty when they are included.
    pub hidden: Vec<String>,
}

pub fn build_report(store: &PhotoStore, include_about: bool) -> Vec<VariantReport> {
    Variant::ALL
        .into_iter()
        .map(|variant| {
            let dir = store.variant_dir(variant);
            let hidden = if include_about {
                Vec::new()
            } else {
                filter(store.scan(variant), false)
                    .into_iter()
                    .filter(|name| is_about_me(name))
                    .collect()
            };
            VariantReport {
                variant,
                exists: dir.is_dir(),
                dir,
                entries: list_entries(store, variant, !include_about),
                hidden,
            }
        })
        .collect()
}

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn variant_header(report: &VariantReport) -> String {
    if !report.exists {
        return format!("{} (absent)", report.variant);
    }
    match report.entries.len() {
        1 => format!("{} (1 photo)", report.variant),
        n => format!("{} ({} photos)", report.variant, n),
    }
}

pub fn format_scan_output(reports: &[VariantReport]) -> Vec<String> {
    let mut lines = Vec::new();

    for report in reports {
        lines.push(variant_header(report));
        lines.push(format!("    Source: {}/", report.dir.display()));
        for (i, entry) in report.entries.iter().enumerate() {
            lines.push(format!(
                "    {} {} [{}]",
                format_index(i + 1),
                entry.filename,
                entry.category
            ));
        }
        for name in &report.hidden {
            lines.push(format!("    Hidden: {name}"));
        }
    }

    lines.push(String::new());
    lines.push("Categories".to_string());
    let all_entries = || reports.iter().flat_map(|r| r.entries.iter());
    for category in Category::CANDIDATES.into_iter().chain([Category::All]) {
        let count = all_entries().filter(|e| e.category == category).count();
        lines.push(format!("    {category}: {count}"));
    }

    lines
}

pub fn print_scan_output(reports: &[VariantReport]) {
    for line in format_scan_output(reports) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn report_lists_categorized_entries_and_hidden() {
        let tmp = photo_store(&[(
            "desktop",
            &["random.jpg", "Supercars-001-red.jpg", "studio_about_me.jpg"],
        )]);
        let store = PhotoStore::new(tmp.path());

        let reports = build_report(&store, false);
        let lines = format_scan_output(&reports);

        assert_eq!(lines[0], "desktop (2 photos)");
        assert!(lines[1].starts_with("    Source: "));
        assert_eq!(lines[2], "    001 Supercars-001-red.jpg [supercars]");
        assert_eq!(lines[3], "    002 random.jpg [all]");
        assert_eq!(lines[4], "    Hidden: studio_about_me.jpg");
        assert_eq!(lines[5], "mobile (absent)");
    }

    #[test]
    fn include_about_lists_everything() {
        let tmp = photo_store(&[("mobile", &["about_me.jpg"])]);
        let store = PhotoStore::new(tmp.path());

        let reports = build_report(&store, true);
        let mobile = &reports[1];
        assert_eq!(filenames(&mobile.entries), vec!["about_me.jpg"]);
        assert!(mobile.hidden.is_empty());
        assert_eq!(variant_header(mobile), "mobile (1 photo)");
    }

    #[test]
    fn category_totals_span_variants() {
        let tmp = photo_store(&[
            ("desktop", &["classic_1.jpg", "x.jpg"]),
            ("mobile", &["classic_2.jpg"]),
        ]);
        let store = PhotoStore::new(tmp.path());

        let lines = format_scan_output(&build_report(&store, false));
        assert!(lines.contains(&"    classic: 2".to_string()));
        assert!(lines.contains(&"    all: 1".to_string()));
        assert!(lines.contains(&"    studio: 0".to_string()));
    }

    #[test]
    fn empty_store_still_reports_both_variants() {
        let tmp = photo_store(&[("desktop", &[])]);
        let store = PhotoStore::new(tmp.path());

        let lines = format_scan_output(&build_report(&store, false));
        assert_eq!(lines[0], "desktop (0 photos)");
        assert_eq!(lines[2], "mobile (absent)");
    }
}
