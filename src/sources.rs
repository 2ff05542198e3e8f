//! The monitored blog list.
//!
//! This is a deliberately small, fixed set of sources with site-specific
//! knowledge baked into each entry, not a general-purpose crawler
//! configuration. Adding a source means adding one descriptor here and, if
//! none of the existing strategies fits, one strategy module.

use crate::models::{SourceConfig, StrategyKind};

/// Every blog the watcher checks, in report order.
pub static SOURCES: &[SourceConfig] = &[
    SourceConfig {
        name: "Anthropic Engineering",
        kind: StrategyKind::SemanticHtml,
        url: "https://www.anthropic.com/engineering",
        base_url: "https://www.anthropic.com",
        sitemap_url: None,
        article_path: "/engineering/",
    },
    SourceConfig {
        name: "Google Developers (AI)",
        kind: StrategyKind::Feed,
        url: "https://developers.googleblog.com/feeds/posts/default?alt=atom&category=AI",
        base_url: "https://developers.googleblog.com",
        sitemap_url: Some("https://developers.googleblog.com/sitemap.xml"),
        article_path: "/",
    },
    SourceConfig {
        name: "Uber Engineering",
        kind: StrategyKind::RenderedPage,
        url: "https://www.uber.com/en-IN/blog/engineering/",
        base_url: "https://www.uber.com",
        sitemap_url: None,
        article_path: "/blog/",
    },
];
