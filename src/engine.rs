//! The discovery engine.
//!
//! Orchestrates one full pass over the configured sources: dispatch each
//! source to its strategy, validate the raw candidates, filter them
//! against the lookback cutoff, deduplicate by canonical URL, and merge
//! everything into one ordered list.
//!
//! Sources run sequentially and independently. A strategy that fails
//! outright (transport error, unparseable document) contributes zero
//! articles and is logged; it never aborts the sources after it. The run
//! itself has no fatal state; the worst case is an empty list.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use itertools::Itertools;
use reqwest::Client;
use tracing::{debug, error, info, instrument};

use crate::models::{Article, Candidate, SourceConfig, StrategyKind};
use crate::scrapers;

/// Discover articles published within the lookback window across all
/// configured sources.
///
/// # Arguments
///
/// * `client` - Shared HTTP client carrying the per-request timeout
/// * `sources` - The monitored source list, in report order
/// * `lookback_hours` - Window size; articles dated before
///   `now - lookback_hours` (at calendar-date granularity) are dropped
///
/// # Returns
///
/// Articles in configured-source order, discovery order within a source.
#[instrument(level = "info", skip_all)]
pub async fn discover(
    client: &Client,
    sources: &[SourceConfig],
    lookback_hours: i64,
) -> Vec<Article> {
    let cutoff = cutoff_date(Utc::now(), lookback_hours);
    info!(%cutoff, lookback_hours, "Checking sources for new articles");

    let mut all_articles = Vec::new();

    for source in sources {
        info!(source = source.name, "Checking source");

        let fetched = match source.kind {
            StrategyKind::Feed => scrapers::feed::fetch_candidates(client, source).await,
            StrategyKind::SemanticHtml => {
                scrapers::semantic::fetch_candidates(client, source).await
            }
            StrategyKind::RenderedPage => {
                scrapers::rendered::fetch_candidates(client, source).await
            }
        };

        let candidates = match fetched {
            Ok(candidates) => candidates,
            Err(e) => {
                error!(source = source.name, error = %e, "Source failed; contributing no articles");
                continue;
            }
        };

        let articles = finalize(source.name, candidates, cutoff);
        info!(source = source.name, count = articles.len(), "New articles from source");
        all_articles.extend(articles);
    }

    info!(count = all_articles.len(), "Discovery pass complete");
    all_articles
}

/// The earliest calendar date still considered "new".
///
/// Reduced to date granularity on purpose: several sources only publish a
/// date, and comparing at finer precision would drop same-day articles
/// depending on the hour the watcher runs.
pub fn cutoff_date(now: DateTime<Utc>, lookback_hours: i64) -> NaiveDate {
    (now - Duration::hours(lookback_hours)).date_naive()
}

/// Validate, filter, and deduplicate one source's raw candidates.
///
/// Candidates without a non-empty title or a resolved date are dropped
/// (the strategies already exhausted their fallbacks), then the cutoff is
/// applied, then duplicate canonical URLs keep their first occurrence.
/// Discovery order is preserved throughout.
pub fn finalize(source_name: &str, candidates: Vec<Candidate>, cutoff: NaiveDate) -> Vec<Article> {
    candidates
        .into_iter()
        .filter_map(|candidate| {
            let Candidate { title, published, url } = candidate;
            let Some(title) = title.filter(|t| !t.is_empty()) else {
                debug!(%url, "Dropping candidate without title");
                return None;
            };
            let Some(timestamp) = published else {
                debug!(%url, title, "Dropping candidate without resolvable date");
                return None;
            };
            Some(Article {
                source: source_name.to_string(),
                title,
                date: timestamp.date_naive(),
                url,
                timestamp,
            })
        })
        .filter(|article| {
            let fresh = article.date >= cutoff;
            if !fresh {
                debug!(title = %article.title, date = %article.date, "Skipping old article");
            }
            fresh
        })
        .unique_by(|article| article.url.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn candidate(title: Option<&str>, date: Option<(i32, u32, u32)>, url: &str) -> Candidate {
        Candidate {
            title: title.map(str::to_string),
            published: date.map(|(y, m, d)| Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_cutoff_date_is_calendar_granular() {
        let now = Utc.with_ymd_and_hms(2025, 6, 10, 3, 0, 0).unwrap();
        assert_eq!(cutoff_date(now, 24), NaiveDate::from_ymd_opt(2025, 6, 9).unwrap());
        assert_eq!(cutoff_date(now, 720), NaiveDate::from_ymd_opt(2025, 5, 11).unwrap());
    }

    #[test]
    fn test_finalize_filters_dedups_and_validates() {
        let cutoff = NaiveDate::from_ymd_opt(2025, 6, 9).unwrap();
        let candidates = vec![
            candidate(Some("Fresh"), Some((2025, 6, 10)), "https://a.com/fresh"),
            candidate(Some("Stale"), Some((2025, 6, 1)), "https://a.com/stale"),
            candidate(Some("Fresh duplicate"), Some((2025, 6, 10)), "https://a.com/fresh"),
        ];

        let articles = finalize("Example", candidates, cutoff);
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Fresh");
        assert_eq!(articles[0].source, "Example");
    }

    #[test]
    fn test_finalize_drops_incomplete_candidates() {
        let cutoff = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let candidates = vec![
            candidate(None, Some((2025, 6, 10)), "https://a.com/untitled"),
            candidate(Some(""), Some((2025, 6, 10)), "https://a.com/empty-title"),
            candidate(Some("No date"), None, "https://a.com/undated"),
            candidate(Some("Keeper"), Some((2025, 6, 10)), "https://a.com/keeper"),
        ];

        let articles = finalize("Example", candidates, cutoff);
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].url, "https://a.com/keeper");
    }

    #[test]
    fn test_finalize_emits_nothing_before_cutoff() {
        let cutoff = NaiveDate::from_ymd_opt(2025, 6, 9).unwrap();
        let candidates = vec![
            candidate(Some("A"), Some((2025, 6, 9)), "https://a.com/on-the-line"),
            candidate(Some("B"), Some((2025, 6, 8)), "https://a.com/too-old"),
        ];

        let articles = finalize("Example", candidates, cutoff);
        assert!(articles.iter().all(|a| a.date >= cutoff));
        assert_eq!(articles.len(), 1);
    }

    #[test]
    fn test_finalize_preserves_discovery_order() {
        let cutoff = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let candidates = vec![
            candidate(Some("Second by date"), Some((2025, 6, 2)), "https://a.com/x"),
            candidate(Some("First by date"), Some((2025, 6, 5)), "https://a.com/y"),
        ];

        let articles = finalize("Example", candidates, cutoff);
        let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Second by date", "First by date"]);
    }

    #[test]
    fn test_finalize_full_timestamp_preserved() {
        let cutoff = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let published = Utc.with_ymd_and_hms(2025, 6, 2, 9, 45, 30).unwrap();
        let candidates = vec![Candidate {
            title: Some("Precise".to_string()),
            published: Some(published),
            url: "https://a.com/precise".to_string(),
        }];

        let articles = finalize("Example", candidates, cutoff);
        assert_eq!(articles[0].timestamp, published);
        assert_eq!(articles[0].date, published.date_naive());
    }
}
