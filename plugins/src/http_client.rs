//! HTTP transport shared by the ingest plugin and the hosted feed source.

use iocdrop_core::api as core_api;
use reqwest::{RequestBuilder, StatusCode};
use serde_json::Value;

const SNIPPET_CHARS: usize = 512;

#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered {status}: {snippet}")]
    Status {
        url: String,
        status: StatusCode,
        snippet: String,
    },
    #[error("{url} did not return JSON ({source}): {snippet}")]
    NotJson {
        url: String,
        #[source]
        source: serde_json::Error,
        snippet: String,
    },
}

impl HttpError {
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Status { status, .. } => Some(status.as_u16()),
            HttpError::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            HttpError::NotJson { .. } => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, HttpError::Transport { source, .. } if source.is_timeout())
    }

    fn transport(url: &str) -> impl FnOnce(reqwest::Error) -> Self + '_ {
        move |source| HttpError::Transport {
            url: url.to_string(),
            source,
        }
    }
}

/// Trimmed body capped at [`SNIPPET_CHARS`] characters, for error messages.
fn snippet(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return "(no body)".to_string();
    }
    let mut out = core_api::truncate_chars(body, SNIPPET_CHARS);
    if out.len() < body.len() {
        out.push('…');
    }
    out
}

#[derive(Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    bearer: Option<String>,
}

impl HttpClient {
    /// A blank `api_key` sends no `Authorization` header.
    pub fn new(api_key: &str, timeout_ms: u64) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()?;
        let bearer = Some(api_key.trim())
            .filter(|k| !k.is_empty())
            .map(str::to_string);
        Ok(Self { http, bearer })
    }

    /// Client for public endpoints.
    pub fn anonymous(timeout_ms: u64) -> anyhow::Result<Self> {
        Self::new("", timeout_ms)
    }

    /// Sends the request and returns the body of a 2xx response.
    async fn send(&self, url: &str, req: RequestBuilder) -> Result<String, HttpError> {
        let req = match &self.bearer {
            Some(token) => req.bearer_auth(token),
            None => req,
        };
        let resp = req.send().await.map_err(HttpError::transport(url))?;
        let status = resp.status();
        let body = resp.text().await.map_err(HttpError::transport(url))?;
        if !status.is_success() {
            return Err(HttpError::Status {
                url: url.to_string(),
                status,
                snippet: snippet(&body),
            });
        }
        Ok(body)
    }

    /// POSTs `{ "items": [...] }`; any 2xx is success and the body is ignored.
    pub async fn submit(
        &self,
        url: &str,
        payload: &core_api::SubmissionPayload,
    ) -> Result<(), HttpError> {
        tracing::debug!(
            target: "iocdrop.ingest",
            stage = "ingest.http.submit",
            url = %url,
            items = payload.items.len(),
            described = payload.items.iter().filter(|it| it.description.is_some()).count()
        );
        self.send(url, self.http.post(url).json(payload)).await?;
        Ok(())
    }

    /// GETs a JSON document, bypassing caches with `t=<unix millis>` and `no-store`.
    pub async fn fetch_json(&self, url: &str) -> Result<Value, HttpError> {
        let bust = chrono::Utc::now().timestamp_millis().to_string();
        tracing::debug!(target: "iocdrop.feed", stage = "feed.http.fetch", url = %url);
        let req = self
            .http
            .get(url)
            .query(&[("t", bust.as_str())])
            .header(reqwest::header::CACHE_CONTROL, "no-store");
        let body = self.send(url, req).await?;
        serde_json::from_str(&body).map_err(|source| HttpError::NotJson {
            url: url.to_string(),
            source,
            snippet: snippet(&body),
        })
    }
}
