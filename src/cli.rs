//! Command-line interface definitions for the blog watcher.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Credentials can be provided via command-line flags or environment variables.

use clap::Parser;

/// Command-line arguments for the blog watcher.
///
/// # Examples
///
/// ```sh
/// # Default run: last 24 hours, notify if credentials are set
/// eng_blog_watch
///
/// # 30-day backfill without sending anything
/// eng_blog_watch --lookback-hours 720 --dry-run
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// How far back to look for new articles, in hours
    #[arg(short, long, default_value_t = 24)]
    pub lookback_hours: i64,

    /// Discover and print articles without sending the notification
    #[arg(long)]
    pub dry_run: bool,

    /// Telegram bot token used to send the notification
    #[arg(long, env = "TELEGRAM_BOT_TOKEN")]
    pub telegram_bot_token: Option<String>,

    /// Telegram chat id the notification is sent to
    #[arg(long, env = "TELEGRAM_CHAT_ID")]
    pub telegram_chat_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["eng_blog_watch"]);
        assert_eq!(cli.lookback_hours, 24);
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_cli_backfill_flags() {
        let cli = Cli::parse_from(["eng_blog_watch", "--lookback-hours", "720", "--dry-run"]);
        assert_eq!(cli.lookback_hours, 720);
        assert!(cli.dry_run);
    }

    #[test]
    fn test_cli_short_lookback_flag() {
        let cli = Cli::parse_from(["eng_blog_watch", "-l", "48"]);
        assert_eq!(cli.lookback_hours, 48);
    }
}
