//! Plain HTTP fetcher.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;

use super::{FetchedPage, Fetcher};
use crate::error::{FetchError, Result};
use crate::models::{FetcherConfig, SourceConfig, TrackingQuery};
use crate::utils::http::create_async_client;

/// Fetches tracking pages with a single GET request.
pub struct HttpFetcher {
    client: Client,
    source: SourceConfig,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(config: &FetcherConfig, source: SourceConfig) -> Result<Self> {
        Ok(Self {
            client: create_async_client(config)?,
            source,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    fn classify(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Network(error.to_string())
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, query: &TrackingQuery) -> std::result::Result<FetchedPage, FetchError> {
        let url = self.source.url_for(&query.url_encoded());
        let start = Instant::now();
        log::debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let final_url = response.url().to_string();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: final_url,
            });
        }

        let html = response.text().await.map_err(|e| self.classify(e))?;
        let elapsed = start.elapsed();
        log::debug!(
            "Fetched {} bytes from {} in {}ms",
            html.len(),
            final_url,
            elapsed.as_millis()
        );

        Ok(FetchedPage {
            html,
            url: final_url,
            status: status.as_u16(),
            elapsed,
        })
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
