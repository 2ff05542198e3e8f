//! Telegram notification collaborator.
//!
//! The discovery engine hands over an ordered article list; this module
//! formats it as a Markdown message and sends it through the Telegram Bot
//! API. It is a thin outbound edge, deliberately kept out of the core:
//! missing credentials or a failed send are logged and never fail the run.

use std::error::Error;

use reqwest::Client;
use tracing::{info, instrument};

use crate::models::Article;

/// Format the discovered articles as the notification message body.
///
/// One Markdown link line per article, matching what the Telegram send
/// uses `parse_mode: Markdown` for.
pub fn format_message(articles: &[Article]) -> String {
    let mut lines = vec![format!("Found {} new engineering blog article(s):", articles.len())];
    for article in articles {
        lines.push(format!(
            "- [{}]({}) ({}, {})",
            article.title, article.url, article.source, article.date
        ));
    }
    lines.join("\n")
}

/// Send a message to a Telegram chat through the Bot API.
///
/// # Arguments
///
/// * `client` - Shared HTTP client carrying the per-request timeout
/// * `bot_token` - Telegram bot token
/// * `chat_id` - Target chat id
/// * `text` - Message body (Markdown)
///
/// # Errors
///
/// Returns the transport or HTTP-status error; the caller logs it and
/// continues; a failed notification never fails the discovery run.
#[instrument(level = "info", skip_all)]
pub async fn send_telegram(
    client: &Client,
    bot_token: &str,
    chat_id: &str,
    text: &str,
) -> Result<(), Box<dyn Error>> {
    let url = format!("https://api.telegram.org/bot{bot_token}/sendMessage");
    let payload = serde_json::json!({
        "chat_id": chat_id,
        "text": text,
        "parse_mode": "Markdown",
    });

    client
        .post(&url)
        .json(&payload)
        .send()
        .await?
        .error_for_status()?;

    info!("Telegram notification sent");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn article(title: &str, url: &str) -> Article {
        Article {
            source: "Example Engineering".to_string(),
            title: title.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            url: url.to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 6, 10, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_format_message_counts_and_links() {
        let articles = vec![
            article("First", "https://a.com/first"),
            article("Second", "https://a.com/second"),
        ];
        let message = format_message(&articles);

        assert!(message.starts_with("Found 2 new engineering blog article(s):"));
        assert!(message.contains("- [First](https://a.com/first) (Example Engineering, 2025-06-10)"));
        assert!(message.contains("- [Second](https://a.com/second)"));
    }

    #[test]
    fn test_format_message_one_line_per_article() {
        let articles = vec![article("Only", "https://a.com/only")];
        assert_eq!(format_message(&articles).lines().count(), 2);
    }
}
