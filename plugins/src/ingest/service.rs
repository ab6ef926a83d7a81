use crate::http_client::HttpClient;
use anyhow::Result;
use async_trait::async_trait;
use iocdrop_core::api as core_api;

pub struct IngestServicePlugin {
    url: String,
    client: HttpClient,
}

impl IngestServicePlugin {
    pub fn new(url: String, api_key: String, timeout_ms: u64) -> Result<Self> {
        let client = HttpClient::new(&api_key, timeout_ms)?;
        Ok(Self { url, client })
    }
}

#[async_trait]
impl core_api::IngestPlugin for IngestServicePlugin {
    fn name(&self) -> &str {
        "ingest_service"
    }

    async fn submit(&self, payload: &core_api::SubmissionPayload) -> Result<()> {
        tracing::info!(
            target: "iocdrop.ingest",
            stage = "ingest.plugin.submit.in",
            items = payload.items.len()
        );
        self.client.submit(&self.url, payload).await?;
        tracing::info!(target: "iocdrop.ingest", stage = "ingest.plugin.submit.out");
        Ok(())
    }
}
