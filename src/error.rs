// src/error.rs
// =============================================================================
// Error types shared across the crate.
//
// There are two tiers:
// - DiscoveryError: fatal. Bad website input or no usable HTTP session.
//   These stop the run and surface to the user.
// - FetchError: soft. Every network call can fail with one of these, and
//   every caller turns it into "nothing here" and moves on.
// =============================================================================

use std::time::Duration;
use thiserror::Error;

/// Failures of a single fetch or navigation. Never fatal to a run.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("empty response body")]
    EmptyBody,

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("not an HTML page: {0}")]
    NotHtml(String),

    #[error("page too large: {0} bytes")]
    TooLarge(usize),
}

impl FetchError {
    /// Short label for logs, in the spirit of a link checker's status column.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Http(e) if e.is_timeout() => "timeout",
            FetchError::Http(e) if e.is_redirect() => "too_many_redirects",
            FetchError::Http(e) if e.is_connect() => {
                // reqwest has no DNS predicate; a miss only changes the log label
                if e.to_string().contains("dns") {
                    "dns_error"
                } else {
                    "connect_error"
                }
            }
            FetchError::Http(_) => "error",
            FetchError::Status(_) => "bad_status",
            FetchError::EmptyBody => "empty_body",
            FetchError::Timeout(_) => "timeout",
            FetchError::NotHtml(_) => "not_html",
            FetchError::TooLarge(_) => "too_large",
        }
    }
}

/// Failures that abort the whole run.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("invalid website input: {0}")]
    InvalidInput(String),

    #[error("could not create HTTP session: {0}")]
    Session(#[source] reqwest::Error),
}
