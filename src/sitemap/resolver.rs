// src/sitemap/resolver.rs
// =============================================================================
// Turns "this site" into "these page URLs" using sitemaps.
//
// How it works:
// 1. Collect candidate sitemap URLs: whatever robots.txt declares, then the
//    well-known paths (/sitemap.xml, /sitemap_index.xml, ...)
// 2. Try candidates in order. The first one that yields any page URL wins
//    and the rest are never fetched.
// 3. A candidate that is a sitemap index is walked depth-first down to its
//    leaf <urlset> documents, following at most `max_child_sitemaps`
//    children per index and pausing briefly before each child fetch.
//
// Every failure along the way (bad status, gzip error, challenge page,
// broken XML) just means "this sitemap had nothing".
// =============================================================================

use std::collections::HashSet;
use std::io::Read;

use flate2::read::MultiGzDecoder;
use indexmap::IndexSet;
use tracing::{debug, info};
use url::Url;

use super::robots::parse_robots_sitemaps;
use super::xml::{parse_sitemap, SitemapNode};
use crate::fetch::FetchContext;
use crate::normalize::BaseUrl;
use crate::page::looks_blocked;

/// Conventional sitemap locations, relative to the site root.
pub const WELL_KNOWN_SITEMAPS: &[&str] = &[
    "/sitemap.xml",
    "/sitemap_index.xml",
    "/sitemap-index.xml",
    "/sitemap.xml.gz",
];

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Sitemap URLs worth trying, robots.txt declarations first, without duplicates.
pub async fn discover_candidates(ctx: &FetchContext, base: &BaseUrl) -> Vec<Url> {
    let mut candidates: IndexSet<Url> = IndexSet::new();

    if let Some(robots_url) = base.join("robots.txt") {
        match ctx.fetch_text(&robots_url).await {
            Ok(text) if looks_blocked(&text) => {
                debug!(url = %robots_url, "robots.txt looks like a challenge page");
            }
            Ok(text) => {
                for declared in parse_robots_sitemaps(&text) {
                    // Relative declarations are resolved against the site root
                    match base.as_url().join(&declared) {
                        Ok(url) => {
                            candidates.insert(url);
                        }
                        Err(e) => debug!(sitemap = %declared, error = %e, "bad sitemap in robots.txt"),
                    }
                }
            }
            Err(e) => debug!(url = %robots_url, kind = e.kind(), error = %e, "no robots.txt"),
        }
    }

    for path in WELL_KNOWN_SITEMAPS {
        if let Some(url) = base.join(path) {
            candidates.insert(url);
        }
    }

    candidates.into_iter().collect()
}

/// Resolves one sitemap to the page URLs it (transitively) lists.
///
/// A leaf document returns its URLs as-is, even if it also names children.
/// An index is expanded depth-first in document order, visiting at most
/// `max_children` children per index. A sitemap already seen during this
/// walk is not fetched again, which stops self-referencing indexes.
pub async fn resolve_sitemap_urls(
    ctx: &FetchContext,
    sitemap_url: &Url,
    max_children: usize,
) -> Vec<String> {
    let mut urls = Vec::new();
    let mut seen: HashSet<Url> = HashSet::new();
    // (sitemap, is_child) pairs; the top of the stack is fetched next
    let mut pending: Vec<(Url, bool)> = vec![(sitemap_url.clone(), false)];

    while let Some((current, is_child)) = pending.pop() {
        if !seen.insert(current.clone()) {
            debug!(url = %current, "sitemap already visited, skipping");
            continue;
        }

        if is_child {
            let delay = ctx.config().sitemap_child_delay;
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        let Some(node) = load_sitemap(ctx, &current).await else {
            continue;
        };

        if node.is_empty() {
            debug!(url = %current, "sitemap has no entries");
            continue;
        }

        if !node.urls.is_empty() {
            debug!(url = %current, count = node.urls.len(), "leaf sitemap");
            urls.extend(node.urls);
            continue;
        }

        debug!(url = %current, count = node.children.len(), "sitemap index");
        let children: Vec<Url> = node
            .children
            .iter()
            .take(max_children)
            .filter_map(|child| match current.join(child) {
                Ok(url) => Some(url),
                Err(e) => {
                    debug!(child = %child, error = %e, "bad child sitemap URL");
                    None
                }
            })
            .collect();

        // Reversed so the first child is popped first
        pending.extend(children.into_iter().rev().map(|child| (child, true)));
    }

    urls
}

/// Fetches, decompresses, screens and parses one sitemap document.
async fn load_sitemap(ctx: &FetchContext, url: &Url) -> Option<SitemapNode> {
    let raw = match ctx.fetch_bytes(url).await {
        Ok(raw) => raw,
        Err(e) => {
            debug!(url = %url, kind = e.kind(), error = %e, "sitemap fetch failed");
            return None;
        }
    };

    let content = if url.path().ends_with(".gz") || raw.starts_with(&GZIP_MAGIC) {
        match gunzip(&raw) {
            Ok(content) => content,
            Err(e) => {
                debug!(url = %url, error = %e, "sitemap decompression failed");
                return None;
            }
        }
    } else {
        raw
    };

    if looks_blocked(&String::from_utf8_lossy(&content)) {
        debug!(url = %url, "sitemap looks like a challenge page");
        return None;
    }

    Some(parse_sitemap(&content))
}

fn gunzip(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut decoded = Vec::new();
    MultiGzDecoder::new(bytes).read_to_end(&mut decoded)?;
    Ok(decoded)
}

/// Page URLs from the first candidate sitemap that yields any, trimmed and
/// de-duplicated in first-seen order. Empty if no candidate works.
pub async fn discover_via_sitemaps(ctx: &FetchContext, base: &BaseUrl) -> Vec<String> {
    let candidates = discover_candidates(ctx, base).await;
    info!(count = candidates.len(), "sitemap candidates");

    for candidate in &candidates {
        let urls = resolve_sitemap_urls(ctx, candidate, ctx.config().max_child_sitemaps).await;
        if urls.is_empty() {
            continue;
        }

        let cleaned: IndexSet<String> = urls
            .iter()
            .map(|url| url.trim())
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .collect();

        info!(sitemap = %candidate, count = cleaned.len(), "sitemap discovery succeeded");
        return cleaned.into_iter().collect();
    }

    Vec::new()
}
