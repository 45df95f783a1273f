// src/sitemap/robots.rs
// Pulls `Sitemap:` directives out of a robots.txt body. Order is kept and
// duplicates are left in; the resolver de-duplicates candidates.

pub fn parse_robots_sitemaps(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| {
            line.get(..8)
                .is_some_and(|key| key.eq_ignore_ascii_case("sitemap:"))
        })
        .filter_map(|line| line.split_once(':'))
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_sitemaps_in_order() {
        let robots = "User-agent: *\n\
                      Disallow: /admin\n\
                      Sitemap: https://example.com/sitemap.xml\n\
                      sitemap:https://example.com/news.xml\n\
                      \n\
                      SITEMAP:   https://example.com/sitemap.xml  \n";
        assert_eq!(
            parse_robots_sitemaps(robots),
            vec![
                "https://example.com/sitemap.xml",
                "https://example.com/news.xml",
                "https://example.com/sitemap.xml",
            ]
        );
    }

    #[test]
    fn test_skips_empty_values_and_other_keys() {
        let robots = "Sitemap:\nSitemaps: https://example.com/x.xml\n# Sitemap: https://example.com/y.xml\n";
        assert!(parse_robots_sitemaps(robots).is_empty());
    }

    #[test]
    fn test_handles_crlf_and_indentation() {
        let robots = "  Sitemap: https://example.com/a.xml\r\nUser-agent: *\r\n";
        assert_eq!(parse_robots_sitemaps(robots), vec!["https://example.com/a.xml"]);
    }
}
