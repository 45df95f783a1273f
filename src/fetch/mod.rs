// src/fetch/mod.rs
// =============================================================================
// The network seam.
//
// Two collaborators do the actual I/O:
// - PageFetcher: a plain HTTP GET returning status + body (robots, sitemaps)
// - Renderer: "navigate to this URL and give me the HTML" (pages)
//
// FetchContext bundles both with the run's configuration and is handed by
// reference to every component that needs the network. It enforces the
// per-call timeout and the settle delay, and turns bad statuses and empty
// bodies into FetchError so callers only have one thing to match on.
// =============================================================================

mod http;

pub use http::HttpSession;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::config::DiscoveryConfig;
use crate::error::FetchError;

/// Raw response of a GET.
#[derive(Debug, Clone)]
pub struct FetchedBody {
    pub status: u16,
    pub body: Vec<u8>,
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn get(&self, url: &Url, timeout: Duration) -> Result<FetchedBody, FetchError>;
}

/// Navigates to a page and returns its HTML once loaded. A browser-backed
/// implementation returns the DOM after client-side execution; any HTTP
/// status still yields the served document.
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(&self, url: &Url, timeout: Duration) -> Result<String, FetchError>;
}

pub struct FetchContext {
    fetcher: Arc<dyn PageFetcher>,
    renderer: Arc<dyn Renderer>,
    config: DiscoveryConfig,
}

impl FetchContext {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        renderer: Arc<dyn Renderer>,
        config: DiscoveryConfig,
    ) -> Self {
        Self {
            fetcher,
            renderer,
            config,
        }
    }

    /// One HTTP session serving both roles.
    pub fn from_session(session: HttpSession, config: DiscoveryConfig) -> Self {
        let session = Arc::new(session);
        Self::new(session.clone(), session, config)
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// GETs a URL and returns its body. Anything but a non-empty 200 is an error.
    pub async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let timeout = self.config.request_timeout;
        let response = tokio::time::timeout(timeout, self.fetcher.get(url, timeout))
            .await
            .map_err(|_| FetchError::Timeout(timeout))??;

        if response.status != 200 {
            return Err(FetchError::Status(response.status));
        }
        if response.body.is_empty() {
            return Err(FetchError::EmptyBody);
        }
        Ok(response.body)
    }

    /// Like [`fetch_bytes`](Self::fetch_bytes), decoded as (lossy) UTF-8.
    pub async fn fetch_text(&self, url: &Url) -> Result<String, FetchError> {
        let bytes = self.fetch_bytes(url).await?;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        if text.trim().is_empty() {
            return Err(FetchError::EmptyBody);
        }
        Ok(text)
    }

    /// Renders a page and then waits `settle` so late content can land.
    pub async fn navigate(&self, url: &Url, settle: Duration) -> Result<String, FetchError> {
        let timeout = self.config.request_timeout;
        let html = tokio::time::timeout(timeout, self.renderer.render(url, timeout))
            .await
            .map_err(|_| FetchError::Timeout(timeout))??;

        if !settle.is_zero() {
            tokio::time::sleep(settle).await;
        }
        Ok(html)
    }

    /// Navigation with the regular page settle delay.
    pub async fn navigate_page(&self, url: &Url) -> Result<String, FetchError> {
        self.navigate(url, self.config.settle_delay).await
    }
}
