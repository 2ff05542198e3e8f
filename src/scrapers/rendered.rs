//! Headless-browser strategy for script-rendered listings.
//!
//! Some blogs ship an empty shell and paint the listing client-side; plain
//! HTTP fetches see nothing. This strategy drives a headless Chromium via
//! CDP: navigate, wait for an article anchor to appear, then walk the
//! anchors the same way the semantic strategy walks static markup. Card
//! dates on these sites omit the year (`6 January / Global`), so they go
//! through the date resolver's year injection.
//!
//! The whole capability is optional. Built without the `browser` feature,
//! [`fetch_candidates`] is a no-op twin that logs a warning and returns no
//! candidates, so a rendered source is skipped rather than failing the
//! run. With the feature on, a browser that fails to launch is a
//! source-level error the engine logs and moves past.

#[cfg(any(feature = "browser", test))]
use once_cell::sync::Lazy;
#[cfg(any(feature = "browser", test))]
use regex::Regex;

/// Card dates in the `<day> <month> / <region>` shape.
#[cfg(any(feature = "browser", test))]
static DAY_MONTH_REGION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(\d{1,2}\s+(?:January|February|March|April|May|June|July|August|September|October|November|December)\s*/\s*\w+)",
    )
    .unwrap()
});

/// Pull the date token out of a card's visible text, if present.
#[cfg(any(feature = "browser", test))]
fn extract_card_date(card_text: &str) -> Option<&str> {
    DAY_MONTH_REGION
        .captures(card_text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

#[cfg(feature = "browser")]
pub use imp::fetch_candidates;

#[cfg(feature = "browser")]
mod imp {
    use std::collections::HashSet;
    use std::error::Error;
    use std::time::Duration;

    use chromiumoxide::Page;
    use chromiumoxide::browser::{Browser, BrowserConfig};
    use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
    use futures::StreamExt;
    use reqwest::Client;
    use tracing::{debug, info};

    use super::extract_card_date;
    use crate::dates;
    use crate::models::{Candidate, SourceConfig};
    use crate::utils::{USER_AGENT, is_listing_link, normalize_url, resolve_link};

    const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);
    const ELEMENT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Render a listing page and collect its article candidates.
    ///
    /// Browser, page, and event-handler task are torn down on every exit
    /// path before the result is returned.
    pub async fn fetch_candidates(
        _client: &Client,
        source: &SourceConfig,
    ) -> Result<Vec<Candidate>, Box<dyn Error>> {
        info!(source = source.name, "Launching headless browser");

        let config = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .build()?;
        let (mut browser, mut handler) = Browser::launch(config).await?;
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let result = scrape_listing(&browser, source).await;

        if let Err(e) = browser.close().await {
            debug!(error = %e, "Error closing browser");
        }
        let _ = browser.wait().await;
        let _ = handler_task.await;

        result
    }

    async fn scrape_listing(
        browser: &Browser,
        source: &SourceConfig,
    ) -> Result<Vec<Candidate>, Box<dyn Error>> {
        let page = browser.new_page("about:blank").await?;
        let result = scrape_page(&page, source).await;
        let _ = page.close().await;
        result
    }

    async fn scrape_page(
        page: &Page,
        source: &SourceConfig,
    ) -> Result<Vec<Candidate>, Box<dyn Error>> {
        page.execute(SetUserAgentOverrideParams::new(USER_AGENT.to_string()))
            .await?;

        tokio::time::timeout(NAVIGATION_TIMEOUT, page.goto(source.url))
            .await
            .map_err(|_| format!("navigation to {} timed out", source.url))??;
        let _ = page.wait_for_navigation().await;

        // The listing exists once the first article anchor is painted.
        let anchor_selector = format!("a[href*=\"{}\"]", source.article_path);
        tokio::time::timeout(ELEMENT_TIMEOUT, page.find_element(anchor_selector.clone()))
            .await
            .map_err(|_| format!("timed out waiting for article links on {}", source.url))??;

        let anchors = page.find_elements(anchor_selector).await?;
        info!(source = source.name, count = anchors.len(), "Found article anchors");

        let listing_url = normalize_url(source.url);
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for anchor in anchors {
            let href = match anchor.attribute("href").await {
                Ok(Some(href)) => href,
                Ok(None) => continue,
                Err(e) => {
                    debug!(error = %e, "Could not read anchor href; skipping card");
                    continue;
                }
            };
            let Some(absolute) = resolve_link(source.base_url, &href) else {
                continue;
            };
            let url = normalize_url(&absolute);
            if is_listing_link(&url, &listing_url) {
                continue;
            }
            if !seen.insert(url.clone()) {
                continue;
            }

            let title = match anchor.find_element("h2, h3").await {
                Ok(heading) => heading
                    .inner_text()
                    .await
                    .ok()
                    .flatten()
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty()),
                Err(_) => None,
            };

            let card_text = anchor.inner_text().await.ok().flatten().unwrap_or_default();
            let published = extract_card_date(&card_text).and_then(dates::resolve);
            if published.is_none() {
                debug!(%url, "No card date found on rendered listing");
            }

            candidates.push(Candidate { title, published, url });
        }

        Ok(candidates)
    }
}

#[cfg(not(feature = "browser"))]
pub use stub::fetch_candidates;

#[cfg(not(feature = "browser"))]
mod stub {
    use std::error::Error;

    use reqwest::Client;
    use tracing::warn;

    use crate::models::{Candidate, SourceConfig};

    /// No-op twin used when the `browser` feature is disabled: the source
    /// is skipped with a warning instead of failing the run.
    pub async fn fetch_candidates(
        _client: &Client,
        source: &SourceConfig,
    ) -> Result<Vec<Candidate>, Box<dyn Error>> {
        warn!(
            source = source.name,
            "Built without the `browser` feature; skipping script-rendered source"
        );
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates;
    use chrono::NaiveDate;

    #[test]
    fn test_extract_card_date_finds_token() {
        let text = "Improving the dispatch pipeline\n6 January / Global\nEngineering";
        assert_eq!(extract_card_date(text), Some("6 January / Global"));
    }

    #[test]
    fn test_extract_card_date_resolves_with_year_injection() {
        let token = extract_card_date("Faster maps\n15 December / EMEA").unwrap();
        let resolved = dates::resolve_with_year(token, 2025).unwrap();
        assert_eq!(resolved.date_naive(), NaiveDate::from_ymd_opt(2025, 12, 15).unwrap());
    }

    #[test]
    fn test_extract_card_date_ignores_plain_text() {
        assert!(extract_card_date("A card with no date at all").is_none());
    }

    #[cfg(not(feature = "browser"))]
    #[tokio::test]
    async fn test_missing_capability_skips_source_without_error() {
        let client = reqwest::Client::new();
        let source = crate::models::SourceConfig {
            name: "Rendered Example",
            kind: crate::models::StrategyKind::RenderedPage,
            url: "https://example.com/en-IN/blog/engineering/",
            base_url: "https://example.com",
            sitemap_url: None,
            article_path: "/blog/",
        };

        let candidates = fetch_candidates(&client, &source).await.unwrap();
        assert!(candidates.is_empty());
    }
}
