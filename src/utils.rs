//! Utility functions for URL normalization and link resolution.
//!
//! Canonical URLs are the deduplication key for the whole pipeline, so the
//! normalization rules live here in one place:
//! - query parameters are stripped
//! - trailing slashes are stripped
//!
//! The helpers also resolve relative hrefs against a source's base URL and
//! detect anchors that merely point back at the listing page itself.

use url::Url;

/// Realistic browser identification sent with every request.
///
/// Some of the monitored sites serve reduced or empty markup to obvious
/// non-browser clients.
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Normalize a URL for comparison and deduplication.
///
/// Removes query parameters and trailing slashes. The result is the
/// canonical form used as the dedup key and for sitemap lookups.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_url("https://a.com/post/?ref=x"), "https://a.com/post");
/// ```
pub fn normalize_url(url: &str) -> String {
    let without_query = url.split('?').next().unwrap_or(url);
    without_query.trim_end_matches('/').to_string()
}

/// Resolve an href against a base URL, returning an absolute URL string.
///
/// Absolute hrefs pass through unchanged; relative ones are joined onto
/// `base_url`. Returns `None` when either part fails to parse.
pub fn resolve_link(base_url: &str, href: &str) -> Option<String> {
    let base = Url::parse(base_url).ok()?;
    let resolved = base.join(href).ok()?;
    Some(resolved.to_string())
}

/// Whether a candidate URL is really the listing page itself.
///
/// Listing pages link to themselves through navigation chrome, sometimes
/// through a locale-free variant of their own URL (`/blog/engineering/`
/// linked from `/en-IN/blog/engineering/`). Both the exact listing URL and
/// a URL whose path is a suffix of the listing URL count as self-links.
/// Expects both arguments already normalized.
pub fn is_listing_link(candidate: &str, listing: &str) -> bool {
    if candidate == listing {
        return true;
    }
    match Url::parse(candidate) {
        Ok(parsed) => {
            let path = parsed.path().trim_end_matches('/');
            !path.is_empty() && listing.ends_with(path)
        }
        Err(_) => false,
    }
}
