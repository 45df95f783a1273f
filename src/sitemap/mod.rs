// src/sitemap/mod.rs
// =============================================================================
// Sitemap-driven URL discovery.
//
// - robots.rs:   `Sitemap:` lines from robots.txt
// - xml.rs:      urlset / sitemapindex parsing
// - resolver.rs: candidate selection and index-tree walking
// =============================================================================

mod resolver;
mod robots;
mod xml;

pub use resolver::discover_via_sitemaps;
