use super::model::{ApiErrorBody, ApiResponse, ResultSet};
use super::query::{ApiSettings, NewsRequest};
use super::NewsApi;
use crate::error::{FetchError, Result};
use futures_util::StreamExt;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// 5 MB cap on a single response body.
pub const MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

/// reqwest-backed client for the GNews v4 API.
#[derive(Debug, Clone)]
pub struct NewsClient {
    http: Client,
    settings: ApiSettings,
}

impl NewsClient {
    pub fn new(settings: ApiSettings, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("news-browser/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .connect_timeout(Duration::from_secs(5).min(timeout))
            .timeout(timeout)
            .build()?;
        Ok(Self { http, settings })
    }

    pub async fn get(&self, request: &NewsRequest) -> Result<ResultSet> {
        let url = request.to_url(&self.settings)?;
        debug!(endpoint = request.endpoint(), page = request.page, "GET news");

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        let body = read_capped(resp, MAX_BODY_BYTES).await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.message())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ApiResponse = serde_json::from_slice(&body)?;
        Ok(parsed.into())
    }
}

impl NewsApi for NewsClient {
    fn fetch(&self, request: &NewsRequest) -> impl Future<Output = Result<ResultSet>> + Send {
        self.get(request)
    }
}

// Stream the body so an oversized response is cut off instead of buffered.
async fn read_capped(resp: reqwest::Response, limit: usize) -> Result<Vec<u8>> {
    let mut stream = resp.bytes_stream();
    let mut buf: Vec<u8> = Vec::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if buf.len() + chunk.len() > limit {
            return Err(FetchError::TooLarge { limit });
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}
