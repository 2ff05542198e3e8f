//! Publish-date resolution from heterogeneous date strings.
//!
//! Sources hand us dates in whatever shape their markup happens to use:
//! RFC 3339 timestamps in feeds and meta tags, `Nov 24, 2025` card text,
//! `2025-01-15` sitemap lastmod values, and the year-less
//! `6 January / Global` format one blog renders on its cards.
//!
//! [`resolve`] normalizes all of them to a UTC timestamp or returns `None`,
//! never a silently wrong date. Values without an explicit timezone are
//! treated as UTC by convention; no timezone is inferred from the source's
//! locale.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Region tag some sites append after the date, e.g. `6 January / Global`.
/// Only a purely alphabetic suffix is stripped, so numeric dates like
/// `01/15/2024` pass through untouched.
static REGION_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*/\s*[A-Za-z][A-Za-z ]*$").unwrap());

static FOUR_DIGIT_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}").unwrap());

/// Formats tried after the RFC 3339 / RFC 2822 parsers, in order.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%m/%d/%Y",
];

/// Resolve a raw date token to a UTC timestamp.
///
/// Strips known non-date suffixes, injects the current calendar year when
/// the token has none (required for sources whose card format omits it),
/// and tries a permissive chain of parsers. Returns `None` on failure;
/// callers treat that as "no date available" and move to their next
/// fallback rather than aborting the record.
pub fn resolve(raw: &str) -> Option<DateTime<Utc>> {
    resolve_with_year(raw, Utc::now().year())
}

/// [`resolve`] with an explicit reference year for year-less tokens.
pub fn resolve_with_year(raw: &str, reference_year: i32) -> Option<DateTime<Utc>> {
    let stripped = REGION_SUFFIX.replace(raw.trim(), "");
    let token = stripped.trim();
    if token.is_empty() {
        return None;
    }

    let with_year;
    let token = if FOUR_DIGIT_YEAR.is_match(token) {
        token
    } else {
        with_year = format!("{token} {reference_year}");
        &with_year
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(token) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(token) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(token, format) {
            return Some(parsed.and_utc());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(token, format) {
            return parsed.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }

    debug!(raw, "Could not parse date");
    None
}
