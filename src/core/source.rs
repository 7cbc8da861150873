//! Upstream document abstraction

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchFailure {
    #[error("Request error: {source} for URL: {url}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP error: {status} for URL: {url}")]
    Status { url: String, status: StatusCode },
}

/// Anything that can hand back the raw HTML of the price page.
///
/// One call is one upstream request. Implementations keep no state between
/// calls and never retry.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch_document(&self) -> Result<String, FetchFailure>;
}
