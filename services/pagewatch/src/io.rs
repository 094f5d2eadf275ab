//! Fetching pages over HTTP

use async_trait::async_trait;

use crate::PagewatchError;

/// A fetched page; non-2xx statuses are still responses
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Fetches pages for the checker
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait HttpClient: Send + Sync {
    /// GET `url` and read the full body. Transport failures are errors.
    async fn get(&self, url: &str) -> crate::Result<HttpResponse>;
}

/// Production HTTP client using reqwest
#[derive(Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Short reason a page could not be fetched, used in `response_failed` events
fn failure_reason(e: &reqwest::Error) -> &'static str {
    if e.is_timeout() {
        "timed out"
    } else if e.is_connect() {
        "connection failed"
    } else if e.is_redirect() {
        "too many redirects"
    } else {
        "request failed"
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str) -> crate::Result<HttpResponse> {
        tracing::debug!("Fetching page {}", url);
        let response = self.client.get(url).send().await.map_err(|e| {
            PagewatchError::Http(format!("{} {}: {}", url, failure_reason(&e), e))
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            PagewatchError::Http(format!("{} body could not be read: {}", url, e))
        })?;

        tracing::debug!("Page {} answered {} with {} bytes", url, status, body.len());
        Ok(HttpResponse { status, body })
    }
}
