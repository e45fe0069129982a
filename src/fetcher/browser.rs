//! Headless Chromium fetcher.
//!
//! One browser process is shared by every fetch. It is launched on the first
//! fetch and stays alive until [`Fetcher::shutdown`] closes it; a fetch after
//! shutdown launches a new one. A session that dies or cannot open pages is
//! dropped and relaunched by the next fetch. Page creation holds the session
//! lock, page loading does not.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use super::{FetchedPage, Fetcher};
use crate::error::FetchError;
use crate::models::{FetcherConfig, SourceConfig, TrackingQuery};

struct Session {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl Session {
    /// Whether the DevTools event loop is still running.
    fn is_alive(&self) -> bool {
        !self.handler.is_finished()
    }

    /// Tear down without a clean close. Dropping the browser kills its child.
    fn discard(self) {
        self.handler.abort();
        drop(self.browser);
    }
}

/// Store `session` back in `slot` if a page could be opened on it, otherwise
/// hand it back for teardown.
fn reclaim<S, T, E>(slot: &mut Option<S>, session: S, opened: &Result<T, E>) -> Option<S> {
    if opened.is_ok() {
        *slot = Some(session);
        None
    } else {
        Some(session)
    }
}

/// Fetches tracking pages by rendering them in headless Chromium.
pub struct BrowserFetcher {
    session: Mutex<Option<Session>>,
    source: SourceConfig,
    user_agent: String,
    accept_language: String,
    chrome_executable: Option<PathBuf>,
    timeout: Duration,
}

impl BrowserFetcher {
    pub fn new(config: &FetcherConfig, source: SourceConfig) -> Self {
        Self {
            session: Mutex::new(None),
            source,
            user_agent: config.user_agent.clone(),
            accept_language: config.accept_language.clone(),
            chrome_executable: config.chrome_executable.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    async fn launch(&self) -> Result<Session, FetchError> {
        let mut builder = BrowserConfig::builder()
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg(format!("--user-agent={}", self.user_agent))
            .arg(format!("--lang={}", self.accept_language))
            .request_timeout(self.timeout);
        if let Some(path) = &self.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        let config = builder.build().map_err(FetchError::Browser)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| FetchError::Browser(format!("failed to launch Chromium: {e}")))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    log::debug!("Chromium handler event error: {e}");
                }
            }
        });

        log::info!("Launched headless Chromium session");
        Ok(Session { browser, handler })
    }

    /// Open a blank page, launching the browser if needed.
    async fn open_page(&self) -> Result<Page, FetchError> {
        let mut guard = self.session.lock().await;
        let session = match guard.take() {
            Some(session) if session.is_alive() => session,
            Some(stale) => {
                log::warn!("Chromium session ended, relaunching");
                stale.discard();
                self.launch().await?
            }
            None => self.launch().await?,
        };
        let page = session.browser.new_page("about:blank").await;
        if let Some(dead) = reclaim(&mut *guard, session, &page) {
            log::warn!("Dropping Chromium session after page creation failed");
            dead.discard();
        }

        page.map_err(|e| FetchError::Browser(format!("failed to open page: {e}")))
    }

    async fn load(page: &Page, url: &str) -> Result<String, FetchError> {
        page.goto(url)
            .await
            .map_err(|e| FetchError::Network(format!("navigation failed: {e}")))?;
        page.wait_for_navigation()
            .await
            .map_err(|e| FetchError::Network(format!("navigation failed: {e}")))?;
        page.content()
            .await
            .map_err(|e| FetchError::Browser(format!("failed to read page content: {e}")))
    }
}

#[async_trait]
impl Fetcher for BrowserFetcher {
    async fn fetch(&self, query: &TrackingQuery) -> Result<FetchedPage, FetchError> {
        let url = self.source.url_for(&query.url_encoded());
        let start = Instant::now();
        log::debug!("Rendering {url}");

        let page = self.open_page().await?;
        let loaded = tokio::time::timeout(self.timeout, Self::load(&page, &url)).await;
        let final_url = page
            .url()
            .await
            .ok()
            .flatten()
            .unwrap_or_else(|| url.clone());
        if let Err(e) = page.close().await {
            log::debug!("Failed to close page: {e}");
        }

        let html = match loaded {
            Ok(result) => result?,
            Err(_) => return Err(FetchError::Timeout(self.timeout)),
        };

        Ok(FetchedPage {
            html,
            url: final_url,
            // The DevTools page API does not surface the document status.
            status: 200,
            elapsed: start.elapsed(),
        })
    }

    async fn shutdown(&self) {
        let Some(mut session) = self.session.lock().await.take() else {
            return;
        };

        if let Err(e) = session.browser.close().await {
            log::warn!("Failed to close Chromium cleanly: {e}");
        }
        if let Err(e) = session.browser.wait().await {
            log::warn!("Failed to wait for Chromium exit: {e}");
        }
        session.handler.abort();
        log::info!("Headless Chromium session closed");
    }

    fn name(&self) -> &'static str {
        "browser"
    }
}
