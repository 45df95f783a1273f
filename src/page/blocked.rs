// src/page/blocked.rs
// =============================================================================
// Detects anti-bot interstitials ("checking your browser", "you have been
// blocked", ...) served in place of real content.
//
// It is a plain substring scan. A blocked page is never parsed for links,
// sitemap entries or words.
// =============================================================================

const BLOCK_MARKERS: &[&str] = &[
    "attention required",
    "cloudflare",
    "please enable cookies",
    "sorry, you have been blocked",
];

pub fn looks_blocked(text: &str) -> bool {
    let lower = text.to_lowercase();
    BLOCK_MARKERS.iter().any(|marker| lower.contains(marker))
}
