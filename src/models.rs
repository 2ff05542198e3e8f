//! Data models for monitored sources and discovered articles.
//!
//! This module defines the core data structures used throughout the application:
//! - [`SourceConfig`]: Static descriptor of one monitored blog
//! - [`StrategyKind`]: Which extraction strategy a source uses
//! - [`Candidate`]: A raw extraction result before validation and filtering
//! - [`Article`]: The canonical output unit reported to the caller
//!
//! Everything here is owned by a single discovery run and discarded at its
//! end; nothing is persisted or compared across runs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Which extraction strategy is used for a source.
///
/// Each monitored blog delivers its listing in one of three ways, and each
/// way gets its own scraper module:
///
/// | Variant | Module | Used for |
/// |---------|--------|----------|
/// | `Feed` | [`crate::scrapers::feed`] | Sites with an RSS/Atom feed |
/// | `SemanticHtml` | [`crate::scrapers::semantic`] | Static listing pages with semantic markup |
/// | `RenderedPage` | [`crate::scrapers::rendered`] | Listings that only exist after script execution |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Feed,
    SemanticHtml,
    RenderedPage,
}

/// Static descriptor of one monitored blog.
///
/// One `SourceConfig` exists per source, defined at compile time in
/// [`crate::sources`]. The fields are the site-specific knowledge each
/// strategy needs: where the listing lives, how to resolve relative links,
/// and which href substring marks an article link on that site.
#[derive(Debug, Clone, Copy)]
pub struct SourceConfig {
    /// Human-readable source name, carried into every emitted [`Article`].
    pub name: &'static str,
    /// The extraction strategy this source requires.
    pub kind: StrategyKind,
    /// The listing page or feed document URL.
    pub url: &'static str,
    /// Base URL used to resolve relative article links.
    pub base_url: &'static str,
    /// Optional sitemap URL, used as a last-resort date source for feed
    /// entries that carry no timestamp of their own.
    pub sitemap_url: Option<&'static str>,
    /// The path substring that marks an article link on this site
    /// (e.g. `/engineering/`).
    pub article_path: &'static str,
}

/// A raw, not-yet-validated extraction result.
///
/// Strategies emit one `Candidate` per discovered article regardless of
/// whether it will pass the cutoff. Title and date may still be missing at
/// this point; the engine drops candidates that end up without either.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Article title, if the strategy could find one.
    pub title: Option<String>,
    /// Resolved publish timestamp, if the strategy could find one.
    pub published: Option<DateTime<Utc>>,
    /// Canonical article URL (absolute, query- and trailing-slash-stripped).
    pub url: String,
}

/// A discovered article that passed validation, cutoff, and deduplication.
///
/// Invariant: `title` is non-empty and `url` is canonical in every emitted
/// `Article`. Records whose publish date could not be determined by any
/// fallback are dropped before this struct is ever constructed.
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    /// Name of the source the article was discovered on.
    pub source: String,
    /// The article title.
    pub title: String,
    /// Publish date at calendar-date granularity, UTC-anchored.
    pub date: NaiveDate,
    /// Canonical article URL, also the deduplication key.
    pub url: String,
    /// Full publish timestamp at whatever precision the source resolved to.
    pub timestamp: DateTime<Utc>,
}
