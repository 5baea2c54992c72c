use crate::config::{ChangeFreq, ListingKind, ListingRecord, UrlEntry};

pub const STATIC_PRIORITY: f32 = 0.8;

/// Metadata given to appended entries by the merge pass unless configured otherwise.
pub const MERGE_CHANGE_FREQ: ChangeFreq = ChangeFreq::Weekly;
pub const MERGE_PRIORITY: f32 = 0.7;

/// `{base_url}/{detail_page}?id={id}&category={category}`. Values are used
/// verbatim; escaping for markup happens at render time.
pub fn listing_location(base_url: &str, record: &ListingRecord) -> String {
    format!(
        "{}/{}?id={}&category={}",
        base_url.trim_end_matches('/'),
        record.kind.detail_page(),
        record.id,
        record.category
    )
}

pub fn listing_entry(base_url: &str, record: &ListingRecord) -> UrlEntry {
    UrlEntry {
        location: listing_location(base_url, record),
        change_freq: ChangeFreq::Monthly,
        priority: record.kind.priority(),
    }
}

pub fn static_entry(base_url: &str, page: &str) -> UrlEntry {
    UrlEntry {
        location: format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            page.trim_start_matches('/')
        ),
        change_freq: ChangeFreq::Weekly,
        priority: STATIC_PRIORITY,
    }
}

pub fn static_entries(base_url: &str, pages: &[String]) -> Vec<UrlEntry> {
    pages.iter().map(|page| static_entry(base_url, page)).collect()
}

pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Reverses `escape_xml`. `&amp;` goes last so `&amp;lt;` stays `&lt;`.
pub fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

pub fn render_url_block(entry: &UrlEntry) -> String {
    format!(
        "  <url>\n    <loc>{}</loc>\n    <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n  </url>\n",
        escape_xml(&entry.location),
        entry.change_freq,
        entry.priority
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: ListingKind, id: &str, category: &str) -> ListingRecord {
        ListingRecord {
            kind,
            id: id.to_string(),
            category: category.to_string(),
        }
    }

    #[test]
    fn test_property_entry() {
        let entry = listing_entry(
            "https://example.test",
            &record(ListingKind::Property, "12", "apartments"),
        );

        assert_eq!(
            entry.location,
            "https://example.test/details.html?id=12&category=apartments"
        );
        assert_eq!(entry.change_freq, ChangeFreq::Monthly);
        assert_eq!(entry.priority, 0.9);
    }

    #[test]
    fn test_request_entry() {
        let entry = listing_entry(
            "https://example.test/",
            &record(ListingKind::Request, "7", "villas"),
        );

        assert_eq!(
            entry.location,
            "https://example.test/request-details.html?id=7&category=villas"
        );
        assert_eq!(entry.priority, 0.7);
    }

    #[test]
    fn test_static_entries() {
        let pages = vec!["".to_string(), "about-us".to_string()];
        let entries = static_entries("https://example.test", &pages);

        assert_eq!(entries[0].location, "https://example.test/");
        assert_eq!(entries[1].location, "https://example.test/about-us");
        assert!(entries
            .iter()
            .all(|e| e.change_freq == ChangeFreq::Weekly && e.priority == STATIC_PRIORITY));
    }

    #[test]
    fn test_no_percent_encoding() {
        let entry = listing_entry(
            "https://example.test",
            &record(ListingKind::Property, "شقة 1", "admin-hq"),
        );
        assert!(entry.location.ends_with("id=شقة 1&category=admin-hq"));
    }

    #[test]
    fn test_render_escapes_ampersand() {
        let entry = listing_entry(
            "https://example.test",
            &record(ListingKind::Property, "12", "apartments"),
        );
        let block = render_url_block(&entry);

        assert!(block.contains(
            "<loc>https://example.test/details.html?id=12&amp;category=apartments</loc>"
        ));
        assert!(block.contains("<changefreq>monthly</changefreq>"));
        assert!(block.contains("<priority>0.9</priority>"));
    }

    #[test]
    fn test_unescape_reverses_escape() {
        let raw = "a&b<c>\"d'&amp;";
        assert_eq!(unescape_xml(&escape_xml(raw)), raw);
    }
}
