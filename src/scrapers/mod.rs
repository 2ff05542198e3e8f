//! Extraction strategies for the monitored blog sources.
//!
//! Each submodule implements one strategy for turning a source's listing
//! into raw [`Candidate`](crate::models::Candidate) records:
//!
//! | Strategy | Module | Method |
//! |----------|--------|--------|
//! | Feed | [`feed`] | RSS/Atom feed, sitemap lastmod as date fallback |
//! | SemanticHtml | [`semantic`] | `<article>` containers + detail-page fallback |
//! | RenderedPage | [`rendered`] | Headless browser (optional `browser` feature) |
//!
//! # Common Contract
//!
//! Each module exports `fetch_candidates(client, source)`, returning one
//! candidate per discovered article regardless of its age; cutoff
//! filtering and deduplication happen once, centrally, in
//! [`crate::engine`]. A malformed entry or card is logged and skipped;
//! it never aborts the rest of the source's batch. A failure that takes
//! down the whole source (transport error, unparseable document, missing
//! browser) surfaces as an `Err` or an empty batch, and the engine moves
//! on to the next source.

pub mod feed;
pub mod rendered;
pub mod semantic;
