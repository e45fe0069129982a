//! Page fetchers.
//!
//! A fetcher turns a tracking number into the aggregator's raw HTML:
//! - `HttpFetcher`: plain GET with browser-like headers
//! - `BrowserFetcher`: headless Chromium (`browser` feature)
//!
//! The implementation is chosen by `fetcher.kind` in the configuration.

#[cfg(feature = "browser")]
mod browser;
mod http;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{AppError, FetchError, Result};
use crate::models::{Config, FetcherKind, TrackingQuery};

#[cfg(feature = "browser")]
pub use browser::BrowserFetcher;
pub use http::HttpFetcher;

/// Raw page plus fetch metadata.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Page HTML
    pub html: String,
    /// Final URL after redirects
    pub url: String,
    /// HTTP status of the response
    pub status: u16,
    /// Time spent fetching
    pub elapsed: Duration,
}

/// Source of tracking pages.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the tracking page for one query. No retries.
    async fn fetch(&self, query: &TrackingQuery) -> std::result::Result<FetchedPage, FetchError>;

    /// Release long-lived resources. Later fetches may reacquire them.
    async fn shutdown(&self) {}

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// Build the fetcher selected by the configuration.
pub fn from_config(config: &Config) -> Result<Arc<dyn Fetcher>> {
    match config.fetcher.kind {
        FetcherKind::Http => Ok(Arc::new(HttpFetcher::new(
            &config.fetcher,
            config.source.clone(),
        )?)),
        #[cfg(feature = "browser")]
        FetcherKind::Browser => Ok(Arc::new(BrowserFetcher::new(
            &config.fetcher,
            config.source.clone(),
        ))),
        #[cfg(not(feature = "browser"))]
        FetcherKind::Browser => Err(AppError::config(
            "fetcher.kind = \"browser\" requires the `browser` feature",
        )),
    }
}
