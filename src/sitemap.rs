//! Sitemap last-modified index.
//!
//! Some feeds omit per-entry timestamps. For those sources we pull the
//! site's sitemap once per run and build a map from normalized URL to the
//! `<lastmod>` string, used as a last-resort date source. The index is
//! rebuilt fresh every run; it is never cached.

use std::collections::HashMap;
use std::error::Error;

use quick_xml::Reader;
use quick_xml::events::Event;
use reqwest::Client;
use tracing::{error, info};

use crate::utils::normalize_url;

/// Mapping from normalized URL to raw `<lastmod>` string.
pub type SitemapIndex = HashMap<String, String>;

/// Fetch a sitemap and build the lastmod index.
///
/// Any fetch or parse failure is logged and yields an empty mapping
/// ("no fallback available"), never an error to the caller.
pub async fn build(client: &Client, sitemap_url: &str) -> SitemapIndex {
    info!(url = sitemap_url, "Fetching sitemap");

    let xml = match fetch(client, sitemap_url).await {
        Ok(xml) => xml,
        Err(e) => {
            error!(url = sitemap_url, error = %e, "Failed to fetch sitemap");
            return SitemapIndex::new();
        }
    };

    match parse(&xml) {
        Ok(index) => {
            info!(count = index.len(), "Loaded URLs from sitemap");
            index
        }
        Err(e) => {
            error!(url = sitemap_url, error = %e, "Failed to parse sitemap");
            SitemapIndex::new()
        }
    }
}

async fn fetch(client: &Client, url: &str) -> Result<String, Box<dyn Error>> {
    let body = client.get(url).send().await?.error_for_status()?.text().await?;
    Ok(body)
}

/// Which element's text we are currently inside.
enum Field {
    Loc,
    Lastmod,
    Other,
}

/// Parse sitemap XML into the lastmod index.
///
/// Walks `<url>` entries under the standard sitemap namespace; entries
/// missing either `<loc>` or `<lastmod>` are omitted.
fn parse(xml: &str) -> Result<SitemapIndex, Box<dyn Error>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut index = SitemapIndex::new();
    let mut field = Field::Other;
    let mut loc: Option<String> = None;
    let mut lastmod: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"url" => {
                    loc = None;
                    lastmod = None;
                }
                b"loc" => field = Field::Loc,
                b"lastmod" => field = Field::Lastmod,
                _ => field = Field::Other,
            },
            Event::Text(e) => {
                let text = e.xml_content()?.trim().to_string();
                match field {
                    Field::Loc => loc = Some(text),
                    Field::Lastmod => lastmod = Some(text),
                    Field::Other => {}
                }
            }
            Event::End(e) => {
                if e.local_name().as_ref() == b"url" {
                    if let (Some(l), Some(m)) = (loc.take(), lastmod.take()) {
                        index.insert(normalize_url(&l), m);
                    }
                }
                field = Field::Other;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITEMAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
        <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
          <url>
            <loc>https://example.com/blog/first/</loc>
            <lastmod>2025-01-15</lastmod>
          </url>
          <url>
            <loc>https://example.com/blog/second?ref=sitemap</loc>
            <lastmod>2025-02-01T08:00:00+00:00</lastmod>
          </url>
          <url>
            <loc>https://example.com/blog/no-date</loc>
          </url>
          <url>
            <lastmod>2025-03-01</lastmod>
          </url>
        </urlset>"#;

    #[test]
    fn test_parse_indexes_normalized_urls() {
        let index = parse(SITEMAP).unwrap();
        assert_eq!(
            index.get("https://example.com/blog/first").map(String::as_str),
            Some("2025-01-15")
        );
        assert_eq!(
            index.get("https://example.com/blog/second").map(String::as_str),
            Some("2025-02-01T08:00:00+00:00")
        );
    }

    #[test]
    fn test_parse_omits_incomplete_entries() {
        let index = parse(SITEMAP).unwrap();
        assert_eq!(index.len(), 2);
        assert!(!index.contains_key("https://example.com/blog/no-date"));
    }

    #[test]
    fn test_parse_mismatched_tags_is_an_error() {
        assert!(parse("<urlset><url></loc></urlset>").is_err());
    }

    #[test]
    fn test_parse_empty_document() {
        let index = parse(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"/>"#)
            .unwrap();
        assert!(index.is_empty());
    }
}
