//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `iocdrop_core::api` instead of reaching into internal modules.

pub use crate::config::{
    load_default, AppConfig, FeedConfig, IngestConfig, LimitsConfig, LoggingConfig,
};
pub use crate::error::{CliError, InputError};
pub use crate::feed::{
    flatten, parse_feed, recent, render_entries, search, FeedBatch, FeedEntry,
    EMPTY_FEED_MESSAGE, FEED_ERROR_MESSAGE, NO_RESULTS_MESSAGE,
};
pub use crate::indicator::{
    build_payload, classify, parse_lines, parse_with_mode, sanitize, IndicatorItem,
    IndicatorKind, ParseMode, SubmissionPayload, truncate_chars,
};
pub use crate::ingest::{FeedSource, IngestPlugin};
pub use crate::input::{collect_items, InputFile};
