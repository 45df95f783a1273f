// src/fetch/http.rs
// =============================================================================
// HttpSession: the default PageFetcher + Renderer, backed by reqwest.
//
// One client is shared by every request in the run:
// - a desktop browser User-Agent and Accept/Accept-Language headers
// - a cookie store, so cookies set during the warm-up visit are sent later
// - redirects followed (up to 10)
//
// It does not run JavaScript. The "rendered" HTML is the served document.
// Like a browser download, a response that is not a document (PDF, zip,
// images) fails navigation, and so does a page over `max_page_bytes`.
// =============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::{FetchedBody, PageFetcher, Renderer};
use crate::config::DiscoveryConfig;
use crate::error::{DiscoveryError, FetchError};

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Content types a browser would display as a page.
const DOCUMENT_TYPES: &[&str] = &["text/html", "application/xhtml", "text/plain"];

#[derive(Debug, Clone)]
pub struct HttpSession {
    client: Client,
    max_page_bytes: usize,
}

impl HttpSession {
    pub fn new(config: &DiscoveryConfig) -> Result<Self, DiscoveryError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
        if let Ok(language) = HeaderValue::from_str(&config.accept_language) {
            headers.insert(ACCEPT_LANGUAGE, language);
        }

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(DiscoveryError::Session)?;

        Ok(Self {
            client,
            max_page_bytes: config.max_page_bytes,
        })
    }

    async fn send(&self, url: &Url, timeout: Duration) -> Result<reqwest::Response, FetchError> {
        self.client
            .get(url.as_str())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                let err = FetchError::from(e);
                debug!(url = %url, kind = err.kind(), "request failed");
                err
            })
    }
}

#[async_trait]
impl PageFetcher for HttpSession {
    async fn get(&self, url: &Url, timeout: Duration) -> Result<FetchedBody, FetchError> {
        let response = self.send(url, timeout).await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(FetchedBody { status, body })
    }
}

#[async_trait]
impl Renderer for HttpSession {
    async fn render(&self, url: &Url, timeout: Duration) -> Result<String, FetchError> {
        let response = self.send(url, timeout).await?;
        if !response.status().is_success() {
            debug!(url = %url, status = response.status().as_u16(), "page served with error status");
        }

        // A missing Content-Type is sniffed as HTML, as browsers do
        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
        {
            if !is_document(content_type) {
                return Err(FetchError::NotHtml(content_type.to_string()));
            }
        }

        // Checked before reading so an oversized body is never downloaded
        if let Some(len) = response.content_length() {
            if len > self.max_page_bytes as u64 {
                return Err(FetchError::TooLarge(len as usize));
            }
        }

        let html = response.text().await?;
        if html.len() > self.max_page_bytes {
            return Err(FetchError::TooLarge(html.len()));
        }
        Ok(html)
    }
}

fn is_document(content_type: &str) -> bool {
    let content_type = content_type.to_ascii_lowercase();
    DOCUMENT_TYPES
        .iter()
        .any(|document| content_type.trim_start().starts_with(document))
}
