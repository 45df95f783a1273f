// src/page/mod.rs
// =============================================================================
// Everything that looks at a fetched page:
// - blocked.rs: anti-bot interstitial detection
// - html.rs:    link extraction and word counting
// - sample.rs:  average word count over the first N pages of a site
// =============================================================================

mod blocked;
mod html;
mod sample;

pub use blocked::looks_blocked;
pub use html::{count_words, extract_links};
pub use sample::sample_average_words;
