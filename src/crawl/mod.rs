// src/crawl/mod.rs
// =============================================================================
// This module handles the fallback website crawl.
//
// Features:
// - Breadth-first crawling starting from the site root
// - Same-host restriction (never leaves the target site)
// - Hard cap on the number of visited pages
// - Pages are fetched through the renderer, with a settle delay after each
// =============================================================================

mod queue;

// Re-export the main crawling function
pub use queue::crawl;
