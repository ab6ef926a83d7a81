use anyhow::Result;

use iocdrop_core::config::{FeedConfig, IngestConfig};
use iocdrop_core::ingest::{FeedSource, IngestPlugin};

use crate::feed::{FileFeedSource, HttpFeedSource};
use crate::ingest::IngestServicePlugin;

pub fn build_ingest(cfg: &IngestConfig) -> Result<Box<dyn IngestPlugin>> {
    if cfg.url.trim().is_empty() {
        anyhow::bail!("ingest url is not configured (set [ingest].url or IOCDROP_INGEST_URL)");
    }
    Ok(Box::new(IngestServicePlugin::new(
        cfg.url.trim().to_string(),
        cfg.api_key.clone(),
        cfg.timeout_ms,
    )?))
}

pub fn build_feed(cfg: &FeedConfig) -> Result<Box<dyn FeedSource>> {
    let source = cfg.source.trim();
    if is_http(source) {
        Ok(Box::new(HttpFeedSource::new(
            source.to_string(),
            cfg.timeout_ms,
        )?))
    } else {
        Ok(Box::new(FileFeedSource::new(source)))
    }
}

fn is_http(source: &str) -> bool {
    let lower = source.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
