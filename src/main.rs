// src/main.rs
// =============================================================================
// This is the entry point of the site-metrics CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (to stderr, so stdout only carries the result)
// 3. Open an HTTP session and run discovery for the one website given
// 4. Print the result and exit (0 = success, 2 = usage or fatal error)
// =============================================================================

mod cli;
mod config;
mod crawl;
mod discovery;
mod error;
mod fetch;
mod normalize;
mod page;
mod sitemap;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use discovery::{discover_site, SiteMetrics};
use fetch::{FetchContext, HttpSession};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if !cli.extra.is_empty() {
        debug!(extra = ?cli.extra, "ignoring extra arguments");
    }

    let config = cli.config();
    let session = HttpSession::new(&config)?;
    let ctx = FetchContext::from_session(session, config);

    let metrics = discover_site(&ctx, &cli.id, &cli.website_url).await?;
    print_metrics(&metrics, cli.json)?;

    Ok(0)
}

// RUST_LOG wins over -v when set
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("site_metrics={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_metrics(metrics: &SiteMetrics, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(metrics)?);
    } else {
        println!("{}", format_metrics(metrics));
    }
    Ok(())
}

fn format_metrics(metrics: &SiteMetrics) -> String {
    format!(
        "website={}\ntotalPages={}\naverageWords={:.2}\nid={}",
        metrics.website, metrics.total_pages, metrics.average_words, metrics.id
    )
}
