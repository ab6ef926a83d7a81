//! Feed views: recent (homepage) and browse (search)
use chrono::{DateTime, Utc};

use crate::commands::cli::{BrowseArgs, RecentArgs};
use iocdrop_core::api as core_api;
use iocdrop_core::config::FeedConfig;

async fn load_entries(
    feed_cfg: &FeedConfig,
    max_chars: usize,
    format: &str,
) -> Result<Vec<core_api::FeedEntry>, core_api::CliError> {
    let fetched = match iocdrop_plugins::factory::build_feed(feed_cfg) {
        Ok(source) => source.fetch().await,
        Err(e) => Err(e),
    };

    let doc = fetched.map_err(|e| {
        tracing::error!(
            target: "iocdrop.feed",
            stage = "feed.fetch.failed",
            source = %feed_cfg.source,
            error = %e
        );
        notice(format, core_api::FEED_ERROR_MESSAGE);
        core_api::CliError::Feed(e.to_string())
    })?;

    let batches = core_api::parse_feed(&doc);
    tracing::debug!(
        target: "iocdrop.feed",
        stage = "feed.parsed",
        batches = batches.len()
    );
    Ok(core_api::flatten(batches, max_chars))
}

fn feed_config(cfg: &core_api::AppConfig, feed: Option<String>) -> FeedConfig {
    let mut feed_cfg = cfg.feed.clone();
    if let Some(src) = feed.filter(|s| !s.trim().is_empty()) {
        feed_cfg.source = src;
    }
    feed_cfg
}

/// Status lines go to stderr under `--format json` so stdout stays parseable.
fn notice(format: &str, message: &str) {
    if format == "json" {
        eprintln!("{message}");
    } else {
        println!("{message}");
    }
}

/// What a feed view prints: an optional status line, then the rendered entries.
#[derive(Debug)]
struct View {
    notice: Option<&'static str>,
    body: String,
}

impl View {
    fn render(
        shown: &[&core_api::FeedEntry],
        notice: Option<&'static str>,
        format: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, core_api::CliError> {
        let body =
            core_api::render_entries(shown, format, now).map_err(core_api::CliError::Command)?;
        // JSON keeps its `[]`; the other formats print nothing for no entries.
        let body = if shown.is_empty() && format != "json" {
            String::new()
        } else {
            body
        };
        Ok(Self { notice, body })
    }

    fn print(&self, format: &str) {
        if let Some(message) = self.notice {
            notice(format, message);
        }
        print!("{}", self.body);
    }
}

fn recent_view(
    entries: Vec<core_api::FeedEntry>,
    limit: usize,
    format: &str,
    now: DateTime<Utc>,
) -> Result<View, core_api::CliError> {
    let empty = entries.is_empty().then_some(core_api::EMPTY_FEED_MESSAGE);
    let latest = core_api::recent(entries, limit);
    let refs: Vec<&core_api::FeedEntry> = latest.iter().collect();
    View::render(&refs, empty, format, now)
}

fn browse_view(
    entries: &[core_api::FeedEntry],
    args: &BrowseArgs,
    limit: usize,
    now: DateTime<Utc>,
) -> Result<View, core_api::CliError> {
    let mut filtered = core_api::search(entries, &args.query, &args.kind);
    let none = filtered.is_empty().then_some(core_api::NO_RESULTS_MESSAGE);
    filtered.truncate(limit);
    View::render(&filtered, none, &args.format, now)
}

/// Handle recent command
pub async fn handle_recent(
    args: RecentArgs,
    cfg: &core_api::AppConfig,
) -> Result<(), core_api::CliError> {
    let feed_cfg = feed_config(cfg, args.feed);
    let entries = load_entries(&feed_cfg, feed_cfg.recent_max_chars, &args.format).await?;
    let limit = args.limit.unwrap_or(feed_cfg.recent_limit);
    recent_view(entries, limit, &args.format, Utc::now())?.print(&args.format);
    Ok(())
}

/// Handle browse command
pub async fn handle_browse(
    args: BrowseArgs,
    cfg: &core_api::AppConfig,
) -> Result<(), core_api::CliError> {
    let feed_cfg = feed_config(cfg, args.feed.clone());
    let entries = load_entries(&feed_cfg, feed_cfg.browse_max_chars, &args.format).await?;
    let limit = args.limit.unwrap_or(feed_cfg.browse_limit);
    browse_view(&entries, &args, limit, Utc::now())?.print(&args.format);
    Ok(())
}
