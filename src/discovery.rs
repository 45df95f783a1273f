// src/discovery.rs
// =============================================================================
// Runs one site through the whole pipeline:
//
//   normalize input -> warm-up visit -> sitemaps -> (fallback crawl)
//   -> same-host filter -> dedup + sort -> sample word counts -> SiteMetrics
//
// Only an invalid website fails the run. Everything network-related
// degrades to fewer pages or a smaller sample.
// =============================================================================

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, info};

use crate::crawl;
use crate::error::DiscoveryError;
use crate::fetch::FetchContext;
use crate::normalize::{normalize_base, same_host, BaseUrl};
use crate::page::sample_average_words;
use crate::sitemap::discover_via_sitemaps;

/// Final result for one website.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteMetrics {
    pub id: String,
    /// The website exactly as given (trimmed), not the normalized base
    pub website: String,
    pub total_pages: usize,
    /// Rounded to two decimals
    pub average_words: f64,
}

pub async fn discover_site(
    ctx: &FetchContext,
    id: &str,
    website: &str,
) -> Result<SiteMetrics, DiscoveryError> {
    let base = normalize_base(website)?;
    info!(website, base = %base, "discovering site");

    warm_up(ctx, &base).await;

    let urls = discover_pages(ctx, &base).await;
    info!(total_pages = urls.len(), "page discovery finished");

    let config = ctx.config();
    let average = sample_average_words(ctx, &urls, config.sample_size).await;

    Ok(SiteMetrics {
        id: id.trim().to_string(),
        website: website.trim().to_string(),
        total_pages: urls.len(),
        average_words: round2(average),
    })
}

/// Visits the home page once so the session picks up cookies. Failure is fine.
async fn warm_up(ctx: &FetchContext, base: &BaseUrl) {
    let settle = ctx.config().warmup_settle_delay;
    if let Err(e) = ctx.navigate(base.as_url(), settle).await {
        debug!(url = %base, kind = e.kind(), error = %e, "warm-up visit failed");
    }
}

/// Sitemaps first, crawling only if they gave nothing. The result holds
/// same-host URLs only, de-duplicated and sorted.
async fn discover_pages(ctx: &FetchContext, base: &BaseUrl) -> Vec<String> {
    let mut urls = discover_via_sitemaps(ctx, base).await;
    if urls.is_empty() {
        info!("no usable sitemap, falling back to crawling");
        urls = crawl::crawl(ctx, base, ctx.config().crawl_limit).await;
    }

    let unique: BTreeSet<String> = urls
        .into_iter()
        .filter(|url| same_host(url, base.as_str()))
        .collect();
    unique.into_iter().collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
