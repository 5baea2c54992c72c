use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::config::{ListingKind, ListingRecord, SiteConfig};
use crate::io::{print_info, print_warning};

/// Aggregate manifest kept next to the listings; never a listing itself.
pub const MANIFEST_FILE: &str = "index.json";

/// Lazily walks `root` and yields one record per listing file, in file name
/// order. Symlinks are followed; loops surface as walk errors and are
/// skipped. A missing root yields nothing.
pub fn scan_listings(
    root: &Path,
    kind: ListingKind,
    verbose: bool,
) -> impl Iterator<Item = ListingRecord> {
    if verbose && !root.is_dir() {
        print_info(&format!(
            "Listing directory for {} entries not found: {}",
            kind.label(),
            root.display()
        ));
    }

    let root: PathBuf = root.to_path_buf();

    WalkDir::new(root.clone())
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_hidden_dir(entry))
        .filter_map(move |entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                if verbose && e.depth() > 0 {
                    print_warning(&format!("Skipping unreadable entry: {}", e));
                }
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(move |entry| {
            let record = listing_record(entry.path(), &root, kind);
            if verbose {
                match &record {
                    Some(r) => print_info(&format!(
                        "Found {} {} in category {}",
                        kind.label(),
                        r.id,
                        r.category
                    )),
                    None => print_info(&format!("Ignored: {}", entry.path().display())),
                }
            }
            record
        })
}

/// Properties first, then requests.
pub fn scan_all(config: &SiteConfig, verbose: bool) -> impl Iterator<Item = ListingRecord> + '_ {
    [ListingKind::Property, ListingKind::Request]
        .into_iter()
        .flat_map(move |kind| scan_listings(config.listing_root(kind), kind, verbose))
}

/// Maps a file path under `root` to a listing, or `None` when the file is not
/// a listing: wrong extension, the manifest, or no category directory.
pub fn listing_record(path: &Path, root: &Path, kind: ListingKind) -> Option<ListingRecord> {
    if !path.extension().is_some_and(|ext| ext == "json") {
        return None;
    }
    if path.file_name().is_some_and(|name| name == MANIFEST_FILE) {
        return None;
    }

    let parent = path.parent()?;
    if parent == root {
        return None;
    }

    let id = path.file_stem()?.to_str()?.to_string();
    let category = parent.file_name()?.to_str()?.to_string();

    Some(ListingRecord { kind, id, category })
}

fn is_hidden_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}
