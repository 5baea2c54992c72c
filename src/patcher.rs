use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use roxmltree::Document;
use std::{
    collections::{BTreeMap, HashSet},
    path::Path,
};

use crate::config::{MergeMetadata, SiteConfig, UrlEntry};
use crate::error::{Result, SitemapError};
use crate::io::{print_info, print_warning, read_sitemap, write_sitemap};
use crate::scanner::scan_all;
use crate::urls::{listing_entry, render_url_block, unescape_xml, MERGE_CHANGE_FREQ, MERGE_PRIORITY};

const CLOSING_TAG: &str = "</urlset>";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub existing: usize,
    pub added: usize,
}

/// Every `<loc>` value already in the sitemap, unescaped. Only `loc`
/// elements in the root's namespace count, so `<image:loc>` and friends from
/// sitemap extensions are ignored.
pub fn existing_locations(text: &str, path: &Path) -> HashSet<String> {
    match Document::parse(text) {
        Ok(doc) => {
            let namespace = doc.root_element().tag_name().namespace();
            doc.descendants()
                .filter(|node| {
                    node.is_element()
                        && node.tag_name().name() == "loc"
                        && node.tag_name().namespace() == namespace
                })
                .filter_map(|node| node.text())
                .map(|loc| loc.trim().to_string())
                .collect()
        }
        Err(e) => {
            print_warning(&format!(
                "{} is not well-formed XML ({}); falling back to a text scan for <loc> values",
                path.display(),
                e
            ));
            scan_locations(text)
        }
    }
}

/// Pattern scan over `<loc>...</loc>` for documents the XML parser rejects.
pub fn scan_locations(text: &str) -> HashSet<String> {
    let loc_regex = Regex::new(r"(?s)<loc>\s*(.*?)\s*</loc>").unwrap();
    loc_regex
        .captures_iter(text)
        .map(|caps| unescape_xml(&caps[1]))
        .collect()
}

/// Listing entries whose location is not yet in `existing`, sorted by location.
pub fn missing_entries(config: &SiteConfig, existing: &HashSet<String>, verbose: bool) -> Vec<UrlEntry> {
    let mut to_add = BTreeMap::new();

    for record in scan_all(config, verbose) {
        let mut entry = listing_entry(&config.base_url, &record);
        if existing.contains(&entry.location) {
            continue;
        }
        if config.merge_metadata == MergeMetadata::Fixed {
            entry.change_freq = MERGE_CHANGE_FREQ;
            entry.priority = MERGE_PRIORITY;
        }
        if verbose {
            print_info(&format!("New URL: {}", entry.location));
        }
        to_add.insert(entry.location.clone(), entry);
    }

    to_add.into_values().collect()
}

pub fn marker_comment(added: usize, now: DateTime<Utc>) -> String {
    let stamp = now.to_rfc3339_opts(SecondsFormat::Secs, true);
    if added == 0 {
        format!("  <!-- sitemap merge {}: no new URLs -->\n", stamp)
    } else {
        format!("  <!-- sitemap merge {}: added {} new URLs -->\n", stamp, added)
    }
}

/// Byte offset of the root element's closing `</urlset>`. Documents the XML
/// parser rejects fall back to the last occurrence of the tag in the text.
pub fn closing_tag_offset(text: &str) -> Option<usize> {
    match Document::parse(text) {
        Ok(doc) => {
            let end = doc.root_element().range().end;
            text[..end]
                .ends_with(CLOSING_TAG)
                .then(|| end - CLOSING_TAG.len())
        }
        Err(_) => text.rfind(CLOSING_TAG),
    }
}

/// Splices the rendered entries and a marker comment in front of the root's
/// closing `</urlset>`. Everything else in `text` is kept byte for byte.
/// Returns `None` when there is no closing tag.
pub fn splice_entries(text: &str, entries: &[UrlEntry], now: DateTime<Utc>) -> Option<String> {
    let close = closing_tag_offset(text)?;
    let (head, tail) = text.split_at(close);

    let mut insert = String::new();
    if !head.is_empty() && !head.ends_with('\n') {
        insert.push('\n');
    }
    for entry in entries {
        insert.push_str(&render_url_block(entry));
    }
    insert.push_str(&marker_comment(entries.len(), now));

    let mut patched = String::with_capacity(text.len() + insert.len());
    patched.push_str(head);
    patched.push_str(&insert);
    patched.push_str(tail);
    Some(patched)
}

/// Appends listings missing from the sitemap at `config.output` and rewrites it in place.
pub fn merge_sitemap(config: &SiteConfig, verbose: bool) -> Result<MergeReport> {
    merge_sitemap_at(config, verbose, Utc::now())
}

fn merge_sitemap_at(config: &SiteConfig, verbose: bool, now: DateTime<Utc>) -> Result<MergeReport> {
    let path = &config.output;
    let text = read_sitemap(path, verbose)?;

    let existing = existing_locations(&text, path);
    if verbose {
        print_info(&format!("Found {} existing URLs in {}", existing.len(), path.display()));
    }

    let to_add = missing_entries(config, &existing, verbose);

    let patched = splice_entries(&text, &to_add, now).ok_or_else(|| SitemapError::MalformedSitemap {
        path: path.clone(),
        reason: format!("no closing {} tag", CLOSING_TAG),
    })?;

    write_sitemap(path, &patched, verbose)?;

    Ok(MergeReport {
        existing: existing.len(),
        added: to_add.len(),
    })
}
