// src/cli.rs
// =============================================================================
// Command-line interface, defined with clap's derive API.
//
//   site-metrics <ID> <WEBSITE_URL> [--json] [-v...] [tuning flags]
//
// Missing positional arguments make clap print usage to stderr and exit
// with code 2. Extra trailing arguments are accepted and ignored, and a
// negative number is taken as an id rather than a flag. Any other id that
// starts with '-' goes after `--`.
// =============================================================================

use std::time::Duration;

use clap::{ArgAction, Parser};

use crate::config::{DiscoveryConfig, DEFAULT_USER_AGENT};

#[derive(Parser, Debug)]
#[command(
    name = "site-metrics",
    version,
    about = "Count a website's pages and measure their average word count",
    long_about = "site-metrics discovers the pages of a website through its sitemaps \
                  (falling back to a same-host crawl), then word-counts a sample of them. \
                  It prints the page total and the average word count."
)]
pub struct Cli {
    /// Identifier echoed back in the output
    #[arg(allow_negative_numbers = true)]
    pub id: String,

    /// Website to measure (e.g., example.com or https://example.com)
    pub website_url: String,

    /// Anything after the website is ignored
    #[arg(hide = true)]
    pub extra: Vec<String>,

    /// Output the result as JSON instead of key=value lines
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug). Logs go to stderr.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Timeout for every single request, in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Children followed per sitemap index
    #[arg(long, default_value_t = 50)]
    pub max_child_sitemaps: usize,

    /// Maximum pages visited by the fallback crawl
    #[arg(long, default_value_t = 2000)]
    pub crawl_limit: usize,

    /// Number of pages word-counted for the average
    #[arg(long, default_value_t = 10)]
    pub sample_size: usize,

    /// Sample pages fetched at the same time
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,

    /// User-Agent header sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl Cli {
    pub fn config(&self) -> DiscoveryConfig {
        DiscoveryConfig {
            request_timeout: Duration::from_secs(self.timeout_secs),
            max_child_sitemaps: self.max_child_sitemaps,
            crawl_limit: self.crawl_limit,
            sample_size: self.sample_size,
            sample_concurrency: self.concurrency.max(1),
            user_agent: self.user_agent.clone(),
            ..DiscoveryConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_parses_positionals_with_defaults() {
        let cli = Cli::try_parse_from(["site-metrics", "42", "example.com"]).unwrap();
        assert_eq!(cli.id, "42");
        assert_eq!(cli.website_url, "example.com");
        assert!(!cli.json);

        let config = cli.config();
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.max_child_sitemaps, 50);
        assert_eq!(config.crawl_limit, 2000);
        assert_eq!(config.sample_size, 10);
        assert_eq!(config.sample_concurrency, 1);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "site-metrics",
            "1",
            "example.com",
            "--json",
            "-vv",
            "--crawl-limit",
            "100",
            "--concurrency",
            "0",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        let config = cli.config();
        assert_eq!(config.crawl_limit, 100);
        assert_eq!(config.sample_concurrency, 1);
    }

    #[test]
    fn test_negative_id_and_extra_arguments() {
        let cli = Cli::try_parse_from(["site-metrics", "-1", "example.com", "ignored", "too"]).unwrap();
        assert_eq!(cli.id, "-1");
        assert_eq!(cli.website_url, "example.com");
        assert_eq!(cli.extra, vec!["ignored", "too"]);
        assert_eq!(cli.verbose, 0);

        let cli = Cli::try_parse_from(["site-metrics", "--", "-abc", "example.com"]).unwrap();
        assert_eq!(cli.id, "-abc");
    }

    #[test]
    fn test_missing_website_is_usage_error() {
        let err = Cli::try_parse_from(["site-metrics", "42"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(err.exit_code(), 2);
    }
}
