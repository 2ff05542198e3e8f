//! Best-available title extraction from article pages.
//!
//! Listing markup changes often; the title locations probed here are
//! SEO-critical and rarely do. Probes run in strict stability order:
//!
//! 1. `og:title` meta tag
//! 2. `twitter:title` meta tag
//! 3. First `<h1>` element
//! 4. `<title>` element, with known site-name suffixes stripped
//!
//! A page where every probe fails yields `None`; the caller drops the
//! record instead of substituting a placeholder.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static OG_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:title"]"#).unwrap());
static TWITTER_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[name="twitter:title"]"#).unwrap());
static H1: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
static TITLE_TAG: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());

/// Separators between the page title and a site-name suffix,
/// e.g. `Scaling widgets | Example Blog`.
const SUFFIX_SEPARATORS: &[&str] = &[" | ", " \\ ", " - ", " – "];

/// Resolve the best available title from a parsed page.
pub fn resolve(document: &Html) -> Option<String> {
    for selector in [&*OG_TITLE, &*TWITTER_TITLE] {
        if let Some(content) = document
            .select(selector)
            .next()
            .and_then(|el| el.value().attr("content"))
        {
            let content = content.trim();
            if !content.is_empty() {
                return Some(content.to_string());
            }
        }
    }

    if let Some(h1) = document.select(&H1).next() {
        let text = h1.text().collect::<String>().trim().to_string();
        if !text.is_empty() {
            return Some(text);
        }
    }

    if let Some(title) = document.select(&TITLE_TAG).next() {
        let mut text = title.text().collect::<String>().trim().to_string();
        for separator in SUFFIX_SEPARATORS {
            if let Some((head, _)) = text.split_once(separator) {
                text = head.trim().to_string();
            }
        }
        if !text.is_empty() {
            return Some(text);
        }
    }

    None
}
