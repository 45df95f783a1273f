// src/page/sample.rs
// =============================================================================
// Average word count over a sample of pages.
//
// The sample is the first `sample_size` URLs of the list it is given. The
// caller passes a sorted, de-duplicated list, so the same site always gets
// the same sample. Pages may be fetched concurrently (bounded by
// `sample_concurrency`); results keep list order either way.
//
// A page that fails to load, looks like a challenge page or has no words
// does not take part in the average.
// =============================================================================

use futures::stream::{self, StreamExt};
use tracing::{debug, info};
use url::Url;

use super::{count_words, looks_blocked};
use crate::fetch::FetchContext;

/// One sampled page. `words` is `None` when the page was unusable.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSample {
    pub url: String,
    pub words: Option<usize>,
}

/// Mean word count of the usable pages among the first `sample_size` URLs,
/// or 0.0 if none were usable.
pub async fn sample_average_words(ctx: &FetchContext, urls: &[String], sample_size: usize) -> f64 {
    let samples = sample_pages(ctx, urls, sample_size).await;

    for sample in &samples {
        debug!(url = %sample.url, words = ?sample.words, "sampled page");
    }

    let counts: Vec<usize> = samples.iter().filter_map(|sample| sample.words).collect();
    info!(
        sampled = samples.len(),
        usable = counts.len(),
        "word count sample finished"
    );

    if counts.is_empty() {
        return 0.0;
    }
    counts.iter().sum::<usize>() as f64 / counts.len() as f64
}

async fn sample_pages(ctx: &FetchContext, urls: &[String], sample_size: usize) -> Vec<PageSample> {
    let concurrency = ctx.config().sample_concurrency.max(1);

    stream::iter(urls.iter().take(sample_size))
        .map(|url| sample_page(ctx, url))
        // buffered (not buffer_unordered) keeps list order
        .buffered(concurrency)
        .collect()
        .await
}

async fn sample_page(ctx: &FetchContext, url: &str) -> PageSample {
    let words = match Url::parse(url) {
        Ok(parsed) => match ctx.navigate_page(&parsed).await {
            Ok(html) if looks_blocked(&html) => {
                debug!(url = %url, "sample page looks like a challenge page");
                None
            }
            Ok(html) => Some(count_words(&html)).filter(|&words| words > 0),
            Err(e) => {
                debug!(url = %url, kind = e.kind(), error = %e, "sample page failed");
                None
            }
        },
        Err(e) => {
            debug!(url = %url, error = %e, "sample URL does not parse");
            None
        }
    };

    PageSample {
        url: url.to_string(),
        words,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiscoveryConfig;
    use crate::fetch::testing::{context_for, FakeSite};

    fn words(n: usize) -> String {
        format!("<html><body><p>{}</p></body></html>", vec!["word"; n].join(" "))
    }

    #[tokio::test]
    async fn test_average_of_usable_pages() {
        let site = FakeSite::default()
            .with_page("https://example.com/a", &words(120))
            .with_page("https://example.com/b", &words(130))
            .with_page("https://example.com/c", "<html><body></body></html>")
            .with_page("https://example.com/d", "<title>Attention Required! | Cloudflare</title>");
        let (ctx, _) = context_for(site, DiscoveryConfig::without_delays());

        let urls: Vec<String> = ["a", "b", "c", "d", "missing"]
            .iter()
            .map(|p| format!("https://example.com/{}", p))
            .collect();

        let average = sample_average_words(&ctx, &urls, 10).await;
        assert!((average - 125.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_all_failures_average_zero() {
        let (ctx, _) = context_for(FakeSite::default(), DiscoveryConfig::without_delays());
        let urls = vec![
            "https://example.com/x".to_string(),
            "not a url".to_string(),
        ];
        assert_eq!(sample_average_words(&ctx, &urls, 10).await, 0.0);
        assert_eq!(sample_average_words(&ctx, &Vec::new(), 10).await, 0.0);
    }

    #[tokio::test]
    async fn test_only_first_n_pages_are_sampled() {
        let mut site = FakeSite::default();
        let mut urls = Vec::new();
        for i in 0..15 {
            let url = format!("https://example.com/{:02}", i);
            site = site.with_page(&url, &words(10));
            urls.push(url);
        }
        let (ctx, site) = context_for(site, DiscoveryConfig::without_delays());

        sample_average_words(&ctx, &urls, 10).await;
        assert_eq!(site.rendered(), urls[..10].to_vec());
    }

    #[tokio::test]
    async fn test_downloads_do_not_count_as_pages() {
        use crate::fetch::HttpSession;
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/report.pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                b"%PDF-1.4\n1 0 obj << /Type /Catalog /Pages 2 0 R >> endobj\ntrailer".to_vec(),
                "application/pdf",
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(words(8), "text/html"))
            .mount(&server)
            .await;

        let config = DiscoveryConfig::without_delays();
        let session = HttpSession::new(&config).unwrap();
        let ctx = FetchContext::from_session(session, config);

        let pdf_only = vec![format!("{}/report.pdf", server.uri())];
        assert_eq!(sample_average_words(&ctx, &pdf_only, 10).await, 0.0);

        let mixed = vec![format!("{}/page", server.uri()), pdf_only[0].clone()];
        assert_eq!(sample_average_words(&ctx, &mixed, 10).await, 8.0);
    }

    #[tokio::test]
    async fn test_concurrent_sampling_keeps_selection() {
        let site = FakeSite::default()
            .with_page("https://example.com/1", &words(10))
            .with_page("https://example.com/2", &words(20))
            .with_page("https://example.com/3", &words(300));
        let config = DiscoveryConfig {
            sample_concurrency: 4,
            ..DiscoveryConfig::without_delays()
        };
        let (ctx, _) = context_for(site, config);
        let urls: Vec<String> = (1..=3).map(|i| format!("https://example.com/{}", i)).collect();

        let samples = sample_pages(&ctx, &urls, 2).await;
        assert_eq!(
            samples,
            vec![
                PageSample {
                    url: "https://example.com/1".to_string(),
                    words: Some(10)
                },
                PageSample {
                    url: "https://example.com/2".to_string(),
                    words: Some(20)
                },
            ]
        );
    }
}
