// src/config.rs
// =============================================================================
// Tunables for one discovery run.
//
// Defaults reproduce the reference behavior: 30s per request, at most 50
// child sitemaps per index level, a 2000-page crawl cap, 10 sampled pages
// fetched one at a time, and short pacing delays between requests so the
// target site's bot defenses are not triggered.
// =============================================================================

use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                                      (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub const DEFAULT_ACCEPT_LANGUAGE: &str = "nl-NL,nl;q=0.9,en;q=0.8";

#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Timeout applied to every single fetch or navigation
    pub request_timeout: Duration,
    /// How many children of a sitemap index are followed, per level
    pub max_child_sitemaps: usize,
    /// Maximum number of pages the fallback crawler visits
    pub crawl_limit: usize,
    /// How many pages (from the front of the sorted list) are word-counted
    pub sample_size: usize,
    /// How many sample pages may be in flight at once
    pub sample_concurrency: usize,
    /// Pause before each child sitemap fetch
    pub sitemap_child_delay: Duration,
    /// Pause after a navigation so client-side content can settle
    pub settle_delay: Duration,
    /// Pause after the warm-up navigation to the home page
    pub warmup_settle_delay: Duration,
    /// Largest page body a navigation accepts
    pub max_page_bytes: usize,
    pub user_agent: String,
    pub accept_language: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            max_child_sitemaps: 50,
            crawl_limit: 2000,
            sample_size: 10,
            sample_concurrency: 1,
            sitemap_child_delay: Duration::from_millis(200),
            settle_delay: Duration::from_millis(400),
            warmup_settle_delay: Duration::from_secs(1),
            max_page_bytes: 10 * 1024 * 1024,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        }
    }
}

impl DiscoveryConfig {
    /// Same limits, no pacing. Used by tests against local servers.
    #[cfg(test)]
    pub fn without_delays() -> Self {
        Self {
            sitemap_child_delay: Duration::ZERO,
            settle_delay: Duration::ZERO,
            warmup_settle_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}
