//! Syndication-feed strategy.
//!
//! The simplest sources publish an RSS or Atom feed: title and link come
//! straight from each entry, and the date from the entry's native
//! published/updated timestamp. Entries with no timestamp at all fall back
//! to the source's sitemap lastmod index; entries still dateless after
//! that are left for the engine to drop.

use std::error::Error;

use feed_rs::model::Entry;
use reqwest::Client;
use tracing::{debug, info};

use crate::dates;
use crate::models::{Candidate, SourceConfig};
use crate::sitemap::{self, SitemapIndex};
use crate::utils::normalize_url;

/// Fetch and parse a source's feed into raw candidates.
///
/// The sitemap index is built once per source, and only when the source
/// configures a sitemap URL.
pub async fn fetch_candidates(
    client: &Client,
    source: &SourceConfig,
) -> Result<Vec<Candidate>, Box<dyn Error>> {
    let bytes = client
        .get(source.url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    let feed = feed_rs::parser::parse(&bytes[..])?;
    info!(source = source.name, count = feed.entries.len(), "Parsed feed entries");

    let sitemap_index = match source.sitemap_url {
        Some(url) => sitemap::build(client, url).await,
        None => SitemapIndex::new(),
    };

    Ok(candidates_from_entries(feed.entries, &sitemap_index))
}

/// Map feed entries to candidates, applying the sitemap date fallback.
fn candidates_from_entries(entries: Vec<Entry>, sitemap_index: &SitemapIndex) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for entry in entries {
        let Some(link) = entry.links.first() else {
            debug!(entry = %entry.id, "Feed entry has no link; skipping");
            continue;
        };
        let url = normalize_url(&link.href);

        let title = entry
            .title
            .map(|t| t.content.trim().to_string())
            .filter(|t| !t.is_empty());

        let published = entry
            .published
            .or(entry.updated)
            .or_else(|| sitemap_index.get(&url).and_then(|lastmod| dates::resolve(lastmod)));
        if published.is_none() {
            debug!(%url, "No native or sitemap date for feed entry");
        }

        candidates.push(Candidate { title, published, url });
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn parse_entries(xml: &str) -> Vec<Entry> {
        feed_rs::parser::parse(xml.as_bytes()).unwrap().entries
    }

    #[test]
    fn test_native_date_preferred() {
        let entries = parse_entries(
            r#"<?xml version="1.0"?>
            <feed xmlns="http://www.w3.org/2005/Atom">
              <id>urn:feed</id><title>t</title><updated>2025-03-01T00:00:00Z</updated>
              <entry>
                <id>urn:1</id>
                <title>Native dates</title>
                <link href="https://example.com/blog/native/"/>
                <published>2025-03-01T09:00:00Z</published>
                <updated>2025-03-02T09:00:00Z</updated>
              </entry>
            </feed>"#,
        );
        let mut sitemap_index = SitemapIndex::new();
        sitemap_index.insert("https://example.com/blog/native".to_string(), "2020-01-01".to_string());

        let candidates = candidates_from_entries(entries, &sitemap_index);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].title.as_deref(), Some("Native dates"));
        assert_eq!(candidates[0].url, "https://example.com/blog/native");
        assert_eq!(
            candidates[0].published.unwrap().date_naive(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_sitemap_fallback_when_no_native_date() {
        let entries = parse_entries(
            r#"<?xml version="1.0"?>
            <rss version="2.0"><channel>
              <title>t</title><link>https://example.com</link><description>d</description>
              <item>
                <title>Dateless entry</title>
                <link>https://example.com/blog/dateless?utm=feed</link>
              </item>
            </channel></rss>"#,
        );
        let mut sitemap_index = SitemapIndex::new();
        sitemap_index
            .insert("https://example.com/blog/dateless".to_string(), "2025-01-15".to_string());

        let candidates = candidates_from_entries(entries, &sitemap_index);
        assert_eq!(candidates.len(), 1);
        assert_eq!(
            candidates[0].published.unwrap().date_naive(),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
        );
    }

    #[test]
    fn test_entry_without_any_date_stays_unresolved() {
        let entries = parse_entries(
            r#"<?xml version="1.0"?>
            <rss version="2.0"><channel>
              <title>t</title><link>https://example.com</link><description>d</description>
              <item>
                <title>Nothing to date this by</title>
                <link>https://example.com/blog/mystery</link>
              </item>
            </channel></rss>"#,
        );
        let candidates = candidates_from_entries(entries, &SitemapIndex::new());
        assert_eq!(candidates.len(), 1);
        assert!(candidates[0].published.is_none());
    }
}
