use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::{DocumentSource, FetchFailure};

/// Fetches the tgju.org currency page.
pub struct TgjuProvider {
    url: String,
    client: reqwest::Client,
}

impl TgjuProvider {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent("fxrates/0.1")
            .timeout(timeout)
            .build()?;
        Ok(TgjuProvider {
            url: url.to_string(),
            client,
        })
    }
}

#[async_trait]
impl DocumentSource for TgjuProvider {
    #[instrument(name = "TgjuPageFetch", skip(self), fields(url = %self.url))]
    async fn fetch_document(&self) -> Result<String, FetchFailure> {
        debug!("Requesting currency page");

        let request_error = |source| FetchFailure::Request {
            url: self.url.clone(),
            source,
        };

        let response = self
            .client
            .get(&self.url)
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(request_error)?;

        debug!(status = %response.status(), "Received currency page response");

        if !response.status().is_success() {
            return Err(FetchFailure::Status {
                url: self.url.clone(),
                status: response.status(),
            });
        }

        response.text().await.map_err(request_error)
    }
}
