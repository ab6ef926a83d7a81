use async_trait::async_trait;
use serde_json::Value;

use crate::indicator::SubmissionPayload;

/// Receiver of submitted indicator batches.
#[async_trait]
pub trait IngestPlugin: Send + Sync {
    fn name(&self) -> &str;
    async fn submit(&self, payload: &SubmissionPayload) -> anyhow::Result<()>;
}

/// Where the batch feed is read from.
#[async_trait]
pub trait FeedSource: Send + Sync {
    fn name(&self) -> &str;
    async fn fetch(&self) -> anyhow::Result<Value>;
}
