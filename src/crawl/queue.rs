// src/crawl/queue.rs
// =============================================================================
// Breadth-first fallback crawl, used when no sitemap produced any URL.
//
// How it works:
// 1. Start with the site root in a queue
// 2. Navigate to the next URL (through the renderer, so client-side links
//    are present), then wait a moment for the page to settle
// 3. Extract all links and queue the same-host ones we haven't seen
// 4. Repeat until the queue is empty or `limit` pages have been visited
//
// A page that fails to load or is a challenge page still counts as visited,
// but none of its links are followed.
// =============================================================================

use std::collections::{HashSet, VecDeque};

use tracing::{debug, info};
use url::Url;

use crate::fetch::FetchContext;
use crate::normalize::{same_host_url, BaseUrl};
use crate::page::{extract_links, looks_blocked};

/// Pending URLs plus everything already visited, owned by one crawl.
#[derive(Debug)]
struct Frontier {
    queue: VecDeque<Url>,
    // Everything ever queued, so a URL is queued at most once
    queued: HashSet<String>,
    visited: Vec<String>,
    visited_set: HashSet<String>,
}

impl Frontier {
    fn new(start: Url) -> Self {
        let mut frontier = Self {
            queue: VecDeque::new(),
            queued: HashSet::new(),
            visited: Vec::new(),
            visited_set: HashSet::new(),
        };
        frontier.push(start);
        frontier
    }

    fn push(&mut self, url: Url) {
        if self.visited_set.contains(url.as_str()) {
            return;
        }
        if self.queued.insert(url.to_string()) {
            self.queue.push_back(url);
        }
    }

    /// Next unvisited URL, marked as visited.
    fn pop(&mut self) -> Option<Url> {
        while let Some(url) = self.queue.pop_front() {
            if self.visited_set.insert(url.to_string()) {
                self.visited.push(url.to_string());
                return Some(url);
            }
        }
        None
    }

    fn visited_count(&self) -> usize {
        self.visited.len()
    }

    fn into_visited(self) -> Vec<String> {
        self.visited
    }
}

/// Crawls the site breadth-first from its root and returns every visited
/// URL (in visit order), never more than `limit` of them.
pub async fn crawl(ctx: &FetchContext, base: &BaseUrl, limit: usize) -> Vec<String> {
    info!(base = %base, limit, "starting fallback crawl");

    let base_url = base.as_url();
    let mut frontier = Frontier::new(base_url.clone());

    while frontier.visited_count() < limit {
        let Some(url) = frontier.pop() else {
            break;
        };

        debug!(visited = frontier.visited_count(), url = %url, "crawling");

        let html = match ctx.navigate_page(&url).await {
            Ok(html) => html,
            Err(e) => {
                debug!(url = %url, kind = e.kind(), error = %e, "navigation failed");
                continue;
            }
        };

        if looks_blocked(&html) {
            debug!(url = %url, "page looks like a challenge page, not following links");
            continue;
        }

        for link in extract_links(&html, &url) {
            if same_host_url(&link, base_url) {
                frontier.push(link);
            }
        }
    }

    info!(visited = frontier.visited_count(), "fallback crawl finished");
    frontier.into_visited()
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why a VecDeque?
//    - pop_front() + push_back() gives FIFO order, i.e. breadth-first
//
// 2. Why both `queued` and `visited_set`?
//    - `queued` stops a popular link (say, the home page) from being added
//      to the queue once per page that links to it
//    - `visited_set` is what the visit cap counts against
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiscoveryConfig;
    use crate::fetch::testing::{context_for, FakeSite};
    use crate::normalize::{normalize_base, same_host};

    fn base() -> BaseUrl {
        normalize_base("https://example.com").unwrap()
    }

    #[tokio::test]
    async fn test_crawl_follows_same_host_links_breadth_first() {
        let site = FakeSite::default()
            .with_page(
                "https://example.com/",
                r#"<a href="/a">A</a><a href="/b#top">B</a><a href="https://other.com/x">X</a>"#,
            )
            .with_page("https://example.com/a", r#"<a href="/c">C</a><a href="/">Home</a>"#)
            .with_page("https://example.com/b", r#"<a href="mailto:hi@example.com">Mail</a>"#)
            .with_page("https://example.com/c", "<p>leaf</p>");
        let (ctx, site) = context_for(site, DiscoveryConfig::without_delays());

        let visited = crawl(&ctx, &base(), 2000).await;

        assert_eq!(
            visited,
            vec![
                "https://example.com/",
                "https://example.com/a",
                "https://example.com/b",
                "https://example.com/c",
            ]
        );
        assert_eq!(site.rendered(), visited);
    }

    #[tokio::test]
    async fn test_crawl_respects_limit() {
        // Every page links to the same fifty pages
        let mut site = FakeSite::default();
        let mut pages = vec!["https://example.com/".to_string()];
        for i in 0..50 {
            pages.push(format!("https://example.com/p{}", i));
        }
        for page in &pages {
            let links: String = (0..50)
                .map(|i| format!(r#"<a href="/p{}">p</a>"#, i))
                .collect();
            site = site.with_page(page, &links);
        }
        let (ctx, site) = context_for(site, DiscoveryConfig::without_delays());

        let visited = crawl(&ctx, &base(), 7).await;

        assert_eq!(visited.len(), 7);
        assert_eq!(site.rendered().len(), 7);
        assert!(visited.iter().all(|url| same_host(url, "https://example.com/")));
    }

    #[tokio::test]
    async fn test_failed_and_blocked_pages_are_visited_but_not_followed() {
        let site = FakeSite::default()
            .with_page(
                "https://example.com/",
                r#"<a href="/blocked">B</a><a href="/missing">M</a>"#,
            )
            .with_page(
                "https://example.com/blocked",
                r#"<title>Attention Required!</title><a href="/secret">S</a>"#,
            )
            .with_page("https://example.com/secret", "<p>unreachable</p>");
        let (ctx, _) = context_for(site, DiscoveryConfig::without_delays());

        let visited = crawl(&ctx, &base(), 2000).await;

        assert_eq!(
            visited,
            vec![
                "https://example.com/",
                "https://example.com/blocked",
                "https://example.com/missing",
            ]
        );
    }

    #[tokio::test]
    async fn test_unreachable_root_returns_root_only() {
        let (ctx, _) = context_for(FakeSite::default(), DiscoveryConfig::without_delays());
        assert_eq!(crawl(&ctx, &base(), 2000).await, vec!["https://example.com/"]);
    }

    #[test]
    fn test_frontier_queues_each_url_once() {
        let root = Url::parse("https://example.com/").unwrap();
        let mut frontier = Frontier::new(root.clone());
        let a = Url::parse("https://example.com/a").unwrap();

        assert_eq!(frontier.pop(), Some(root.clone()));
        frontier.push(a.clone());
        frontier.push(a.clone());
        frontier.push(root);

        assert_eq!(frontier.pop(), Some(a));
        assert_eq!(frontier.pop(), None);
        assert_eq!(frontier.visited_count(), 2);
    }
}
