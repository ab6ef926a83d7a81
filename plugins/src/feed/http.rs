use anyhow::Result;
use async_trait::async_trait;
use iocdrop_core::api as core_api;
use serde_json::Value;

use crate::http_client::HttpClient;

pub struct HttpFeedSource {
    url: String,
    client: HttpClient,
}

impl HttpFeedSource {
    pub fn new(url: String, timeout_ms: u64) -> Result<Self> {
        // The feed is public; no credentials are sent.
        let client = HttpClient::anonymous(timeout_ms)?;
        Ok(Self { url, client })
    }
}

#[async_trait]
impl core_api::FeedSource for HttpFeedSource {
    fn name(&self) -> &str {
        "http_feed"
    }

    async fn fetch(&self) -> Result<Value> {
        Ok(self.client.fetch_json(&self.url).await?)
    }
}
