// src/normalize.rs
// =============================================================================
// URL helpers: canonical base URLs, host comparison and link resolution.
//
// Everything here is built on the `url` crate, which already lower-cases
// schemes and hosts of http(s) URLs when parsing.
// =============================================================================

use std::fmt;

use url::Url;

use crate::error::DiscoveryError;

/// A site root of the form `scheme://host/`.
///
/// Only [`normalize_base`] constructs one, so the host is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(Url);

impl BaseUrl {
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Joins a path such as `robots.txt` onto the site root.
    pub fn join(&self, path: &str) -> Option<Url> {
        self.0.join(path.trim_start_matches('/')).ok()
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Turns user input like `example.com` or `HTTPS://Example.com/x` into
/// `https://example.com/`.
pub fn normalize_base(input: &str) -> Result<BaseUrl, DiscoveryError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DiscoveryError::InvalidInput("website is empty".to_string()));
    }

    let lower = trimmed.to_ascii_lowercase();
    let with_scheme = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let parsed = Url::parse(&with_scheme)
        .map_err(|e| DiscoveryError::InvalidInput(format!("'{}': {}", trimmed, e)))?;

    let host = match parsed.host_str() {
        Some(host) if !host.is_empty() => host,
        _ => {
            return Err(DiscoveryError::InvalidInput(format!(
                "'{}' has no host",
                trimmed
            )))
        }
    };

    let authority = match parsed.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };

    let base = Url::parse(&format!("{}://{}/", parsed.scheme(), authority))
        .map_err(|e| DiscoveryError::InvalidInput(format!("'{}': {}", trimmed, e)))?;

    Ok(BaseUrl(base))
}

/// Compares the host (and explicit port) of two URLs, ignoring case,
/// scheme and path. Unparseable input never matches.
pub fn same_host(a: &str, b: &str) -> bool {
    match (Url::parse(a), Url::parse(b)) {
        (Ok(a), Ok(b)) => same_host_url(&a, &b),
        _ => false,
    }
}

pub fn same_host_url(a: &Url, b: &Url) -> bool {
    match (a.host_str(), b.host_str()) {
        (Some(ha), Some(hb)) => ha.eq_ignore_ascii_case(hb) && a.port() == b.port(),
        _ => false,
    }
}

/// Resolves a possibly-relative link against the page it was found on and
/// drops the fragment. Scheme filtering is left to the caller.
pub fn resolve(page: &Url, href: &str) -> Option<Url> {
    let mut resolved = page.join(href).ok()?;
    resolved.set_fragment(None);
    Some(resolved)
}
