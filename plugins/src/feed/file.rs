use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use iocdrop_core::api as core_api;
use serde_json::Value;

/// Feed stored as a local JSON file.
pub struct FileFeedSource {
    path: PathBuf,
}

impl FileFeedSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl core_api::FeedSource for FileFeedSource {
    fn name(&self) -> &str {
        "file_feed"
    }

    async fn fetch(&self) -> Result<Value> {
        tracing::debug!(
            target: "iocdrop.feed",
            stage = "feed.file.read",
            path = %self.path.display()
        );
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read feed {}", self.path.display()))?;
        let v = serde_json::from_str::<Value>(&raw)
            .with_context(|| format!("invalid feed JSON in {}", self.path.display()))?;
        Ok(v)
    }
}
