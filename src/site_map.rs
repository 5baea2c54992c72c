use std::collections::BTreeMap;

use crate::config::{ListingKind, SiteConfig, UrlEntry, SITEMAP_NAMESPACE};
use crate::error::Result;
use crate::io::{print_info, write_sitemap};
use crate::scanner::scan_all;
use crate::urls::{listing_entry, render_url_block, static_entries};

/// Counts reported after a full generate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateReport {
    pub static_pages: usize,
    pub properties: usize,
    pub requests: usize,
    pub total: usize,
}

/// Static pages plus every listing, keyed by location. Later entries replace
/// earlier ones with the same location.
pub fn collect_entries(config: &SiteConfig, verbose: bool) -> (BTreeMap<String, UrlEntry>, GenerateReport) {
    let mut entries = BTreeMap::new();
    let mut report = GenerateReport::default();

    for entry in static_entries(&config.base_url, &config.static_pages) {
        report.static_pages += 1;
        entries.insert(entry.location.clone(), entry);
    }

    for record in scan_all(config, verbose) {
        match record.kind {
            ListingKind::Property => report.properties += 1,
            ListingKind::Request => report.requests += 1,
        }
        let entry = listing_entry(&config.base_url, &record);
        entries.insert(entry.location.clone(), entry);
    }

    report.total = entries.len();
    (entries, report)
}

/// Serializes entries in iteration order inside the sitemaps.org envelope.
pub fn render_sitemap<'a>(entries: impl IntoIterator<Item = &'a UrlEntry>) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(&format!("<urlset xmlns=\"{}\">\n", SITEMAP_NAMESPACE));
    for entry in entries {
        xml.push_str(&render_url_block(entry));
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Writes a fresh sitemap to `config.output`, replacing whatever was there.
pub fn generate_sitemap(config: &SiteConfig, verbose: bool) -> Result<GenerateReport> {
    let (entries, report) = collect_entries(config, verbose);

    if verbose {
        print_info(&format!(
            "Collected {} unique URLs for {}",
            report.total,
            config.output.display()
        ));
    }

    let xml = render_sitemap(entries.values());
    write_sitemap(&config.output, &xml, verbose)?;

    if verbose {
        print_info(&format!(
            "Successfully generated sitemap.xml at: {}",
            config.output.display()
        ));
    }

    Ok(report)
}
