use serde::{Deserialize, Serialize};

use crate::indicator::ParseMode;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub ingest: IngestConfig,

    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default)]
    pub limits: LimitsConfig,

    #[serde(default)]
    pub parse_mode: ParseMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or ~/.iocdrop/logs if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "warn" or "iocdrop=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}

/// Remote ingestion endpoint that receives `{ "items": [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    15_000
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// `http(s)://` URL or local path of the batch feed.
    #[serde(default = "default_feed_source")]
    pub source: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    #[serde(default = "default_browse_limit")]
    pub browse_limit: usize,

    #[serde(default = "default_recent_max_chars")]
    pub recent_max_chars: usize,

    #[serde(default = "default_browse_max_chars")]
    pub browse_max_chars: usize,
}

fn default_feed_source() -> String {
    "data/ioc.json".to_string()
}

fn default_recent_limit() -> usize {
    6
}

fn default_browse_limit() -> usize {
    120
}

fn default_recent_max_chars() -> usize {
    200
}

fn default_browse_max_chars() -> usize {
    500
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            source: default_feed_source(),
            timeout_ms: default_timeout_ms(),
            recent_limit: default_recent_limit(),
            browse_limit: default_browse_limit(),
            recent_max_chars: default_recent_max_chars(),
            browse_max_chars: default_browse_max_chars(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_max_items")]
    pub max_items: usize,

    #[serde(default = "default_max_value_chars")]
    pub max_value_chars: usize,

    #[serde(default = "default_max_description_chars")]
    pub max_description_chars: usize,
}

fn default_max_items() -> usize {
    500
}

fn default_max_value_chars() -> usize {
    500
}

fn default_max_description_chars() -> usize {
    300
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_items: default_max_items(),
            max_value_chars: default_max_value_chars(),
            max_description_chars: default_max_description_chars(),
        }
    }
}
