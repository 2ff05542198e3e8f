//! Semantic-HTML listing strategy.
//!
//! Works against listing pages that render server-side with stable
//! semantic markup. Instead of chasing CSS class names (which change with
//! every site redesign), the walk relies on structure that survives:
//! `<article>` containers, links into the site's article path, heading
//! elements, and a visible `Month D, YYYY` date in the card text.
//!
//! Cards missing a title or date get exactly one detail-page fetch, which
//! probes the page's `article:published_time` meta tag and a
//! `Published <date>` text pattern. A candidate still incomplete after
//! that is left for the engine to drop.

use std::collections::HashSet;
use std::error::Error;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info, warn};

use crate::dates;
use crate::models::{Candidate, SourceConfig};
use crate::titles;
use crate::utils::{is_listing_link, normalize_url, resolve_link};

static ARTICLE: Lazy<Selector> = Lazy::new(|| Selector::parse("article").unwrap());
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static HEADING: Lazy<Selector> = Lazy::new(|| Selector::parse("h1, h2, h3, h4").unwrap());
static PUBLISHED_TIME_META: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="article:published_time"]"#).unwrap());

/// Visible card dates like `Nov 24, 2025` or `November 24 2025`.
static CARD_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)((?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+\d{1,2},?\s+\d{4})")
        .unwrap()
});

/// `Published Nov 24, 2025` on detail pages.
static PUBLISHED_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)Published\s*((?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+\d{1,2},?\s+\d{4})",
    )
    .unwrap()
});

/// Scrape a listing page into raw candidates, with one detail-page fetch
/// per candidate that the listing alone could not complete.
pub async fn fetch_candidates(
    client: &Client,
    source: &SourceConfig,
) -> Result<Vec<Candidate>, Box<dyn Error>> {
    let body = client
        .get(source.url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let mut candidates = extract_listing(&body, source);
    info!(source = source.name, count = candidates.len(), "Extracted listing candidates");

    for candidate in &mut candidates {
        if candidate.title.is_some() && candidate.published.is_some() {
            continue;
        }
        resolve_from_detail(client, candidate).await;
    }

    Ok(candidates)
}

/// Walk the listing's `<article>` containers and collect article links.
///
/// Links pointing back at the listing page itself are excluded, and a URL
/// seen twice on the same page keeps its first occurrence.
fn extract_listing(body: &str, source: &SourceConfig) -> Vec<Candidate> {
    let document = Html::parse_document(body);
    let listing_url = normalize_url(source.url);
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for container in document.select(&ARTICLE) {
        for link in container.select(&ANCHOR) {
            let Some(href) = link.value().attr("href") else { continue };
            if !href.contains(source.article_path) {
                continue;
            }
            let Some(absolute) = resolve_link(source.base_url, href) else {
                debug!(href, "Could not resolve article link");
                continue;
            };
            let url = normalize_url(&absolute);
            if is_listing_link(&url, &listing_url) {
                continue;
            }
            if !seen.insert(url.clone()) {
                continue;
            }

            let title = link
                .select(&HEADING)
                .next()
                .map(|heading| heading.text().collect::<String>().trim().to_string())
                .filter(|t| !t.is_empty());

            let link_text = link.text().collect::<String>();
            let published = CARD_DATE
                .captures(&link_text)
                .and_then(|c| dates::resolve(c.get(1).map(|m| m.as_str())?));

            candidates.push(Candidate { title, published, url });
        }
    }

    candidates
}

/// Fill in a candidate's missing title and/or date from its detail page.
///
/// One fetch per candidate; a transport failure here drops only this
/// candidate (it stays incomplete and the engine discards it).
async fn resolve_from_detail(client: &Client, candidate: &mut Candidate) {
    debug!(url = %candidate.url, "Fetching detail page for missing title/date");

    let body = match client
        .get(&candidate.url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
    {
        Ok(response) => match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(url = %candidate.url, error = %e, "Failed to read detail page body");
                return;
            }
        },
        Err(e) => {
            warn!(url = %candidate.url, error = %e, "Failed to fetch detail page");
            return;
        }
    };

    let document = Html::parse_document(&body);
    if candidate.title.is_none() {
        candidate.title = titles::resolve(&document);
    }
    if candidate.published.is_none() {
        candidate.published = detail_published(&document);
    }
}

/// Date probe chain for a detail page: structured meta tag first, then the
/// visible `Published <date>` text.
fn detail_published(document: &Html) -> Option<chrono::DateTime<chrono::Utc>> {
    if let Some(content) = document
        .select(&PUBLISHED_TIME_META)
        .next()
        .and_then(|el| el.value().attr("content"))
    {
        if let Some(resolved) = dates::resolve(content) {
            return Some(resolved);
        }
    }

    let text = document.root_element().text().collect::<String>();
    PUBLISHED_TEXT
        .captures(&text)
        .and_then(|c| dates::resolve(c.get(1)?.as_str()))
}
