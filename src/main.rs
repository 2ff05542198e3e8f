//! # Eng Blog Watch
//!
//! A small watcher that discovers newly published articles on a fixed set
//! of engineering blogs and reports the ones published within a
//! configurable lookback window, deduplicated and normalized into a
//! common shape.
//!
//! ## Features
//!
//! - Three extraction strategies: syndication feeds, semantic-HTML listing
//!   pages, and script-rendered pages via headless Chromium (optional
//!   `browser` feature)
//! - Title and date fallback chains per strategy, including detail-page
//!   probes and sitemap lastmod lookups
//! - Cutoff filtering at calendar-date granularity and per-source URL
//!   deduplication
//! - Optional Telegram notification when new articles are found
//!
//! ## Usage
//!
//! ```sh
//! eng_blog_watch --lookback-hours 24
//! ```
//!
//! ## Architecture
//!
//! One discovery run is a single sequential pass:
//! 1. **Dispatch**: each configured source is handed to its strategy
//! 2. **Resolve**: missing titles/dates go through the fallback chains
//! 3. **Filter**: cutoff check and per-source dedup, applied centrally
//! 4. **Report**: stdout summary plus the Telegram collaborator

use std::error::Error;
use std::time::Duration;

use clap::Parser;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod dates;
mod engine;
mod models;
mod notify;
mod scrapers;
mod sitemap;
mod sources;
mod titles;
mod utils;

use cli::Cli;

/// Per-request timeout applied to every fetch the watcher makes.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("eng_blog_watch starting up");

    let args = Cli::parse();
    debug!(?args.lookback_hours, ?args.dry_run, "Parsed CLI arguments");

    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(utils::USER_AGENT)
        .build()?;

    // ---- Discovery ----
    let articles = engine::discover(&client, sources::SOURCES, args.lookback_hours).await;

    println!("Found {} new articles.", articles.len());
    for article in &articles {
        println!("- [{}] {} ({})", article.source, article.title, article.url);
    }

    // ---- Notification ----
    if articles.is_empty() {
        info!("No new articles found; nothing to send");
    } else if args.dry_run {
        info!(count = articles.len(), "Dry run; skipping notification");
    } else {
        match (&args.telegram_bot_token, &args.telegram_chat_id) {
            (Some(bot_token), Some(chat_id)) => {
                let message = notify::format_message(&articles);
                if let Err(e) = notify::send_telegram(&client, bot_token, chat_id, &message).await
                {
                    error!(error = %e, "Failed to send Telegram notification");
                }
            }
            _ => warn!("Telegram credentials not found; skipping notification"),
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        articles = articles.len(),
        "Execution complete"
    );

    Ok(())
}
