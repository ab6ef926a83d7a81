//! Read-only view over the batch feed: parsing, flattening, search and rendering.

pub mod models;
pub mod render;
pub mod view;

pub use models::{parse_feed, parse_timestamp, FeedBatch, FeedItem};
pub use render::{
    escape_html, format_relative_time, render_entries, render_html, render_text,
    EMPTY_FEED_MESSAGE, FEED_ERROR_MESSAGE, NO_RESULTS_MESSAGE,
};
pub use view::{flatten, recent, search, FeedEntry, DEFAULT_KIND_LABEL};
