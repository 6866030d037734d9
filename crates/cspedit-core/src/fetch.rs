//! Policy header retrieval.
//!
//! Fetches a URL and returns the value of its Content-Security-Policy header.
//! Redirects are followed; the response status is not inspected, so an error
//! page that carries the header still yields it.

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::error::FetchError;
use crate::storage::FetchConfig;

pub const CSP_HEADER: &str = "Content-Security-Policy";
pub const CSP_REPORT_ONLY_HEADER: &str = "Content-Security-Policy-Report-Only";

/// Request settings for [`fetch_policy`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Response header to read.
    pub header: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::from_config(&FetchConfig::default())
    }
}

impl FetchOptions {
    pub fn from_config(config: &FetchConfig) -> Self {
        Self {
            header: config.header.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// Turn a user-supplied target into a URL.
///
/// A target without a scheme is taken as `https://<target>`.
pub fn normalize_target(target: &str) -> Result<Url, FetchError> {
    let target = target.trim();
    let candidate = if target.contains("://") {
        target.to_string()
    } else {
        format!("https://{target}")
    };

    let url = Url::parse(&candidate).map_err(|source| FetchError::InvalidUrl {
        url: target.to_string(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FetchError::UnsupportedScheme(other.to_string())),
    }
}

/// Fetch `target` and return its policy header.
///
/// Returns `Ok(None)` when the response has no such header. Several
/// instances of the header are joined with `"; "` in response order.
pub async fn fetch_policy(
    options: &FetchOptions,
    target: &str,
) -> Result<Option<String>, FetchError> {
    let url = normalize_target(target)?;
    debug!(url = %url, header = %options.header, "fetching policy");

    let client = Client::builder()
        .user_agent(options.user_agent.as_str())
        .timeout(options.timeout)
        .build()?;
    let response = client.get(url.clone()).send().await?;

    debug!(status = %response.status(), final_url = %response.url(), "response received");
    let policy = collect_header(response.headers(), &options.header)?;
    match &policy {
        Some(value) => info!(url = %url, bytes = value.len(), "policy header found"),
        None => info!(url = %url, header = %options.header, "no policy header"),
    }
    Ok(policy)
}

fn collect_header(headers: &HeaderMap, name: &str) -> Result<Option<String>, FetchError> {
    let values = headers
        .get_all(name)
        .iter()
        .map(|value| {
            value.to_str().map_err(|_| FetchError::InvalidHeader {
                header: name.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if values.is_empty() {
        Ok(None)
    } else {
        Ok(Some(values.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn bare_host_defaults_to_https() {
        let url = normalize_target("example.com/path").unwrap();
        assert_eq!(url.as_str(), "https://example.com/path");

        let url = normalize_target("  localhost:8080 ").unwrap();
        assert_eq!(url.as_str(), "https://localhost:8080/");
    }

    #[test]
    fn explicit_http_is_kept() {
        let url = normalize_target("http://example.com").unwrap();
        assert_eq!(url.scheme(), "http");
    }

    #[test]
    fn rejects_other_schemes() {
        assert!(matches!(
            normalize_target("ftp://example.com"),
            Err(FetchError::UnsupportedScheme(s)) if s == "ftp"
        ));
    }

    #[test]
    fn rejects_unparsable_target() {
        assert!(matches!(
            normalize_target("http://exa mple.com"),
            Err(FetchError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "content-security-policy",
            HeaderValue::from_static("default-src 'self'"),
        );
        assert_eq!(
            collect_header(&headers, CSP_HEADER).unwrap().as_deref(),
            Some("default-src 'self'")
        );
        assert_eq!(collect_header(&headers, CSP_REPORT_ONLY_HEADER).unwrap(), None);
    }

    #[test]
    fn repeated_headers_are_joined() {
        let mut headers = HeaderMap::new();
        headers.append(CSP_HEADER, HeaderValue::from_static("default-src 'self'"));
        headers.append(CSP_HEADER, HeaderValue::from_static("img-src data:"));
        assert_eq!(
            collect_header(&headers, CSP_HEADER).unwrap().as_deref(),
            Some("default-src 'self'; img-src data:")
        );
    }

    #[test]
    fn opaque_header_is_an_error() {
        let mut headers = HeaderMap::new();
        headers.insert(CSP_HEADER, HeaderValue::from_bytes(b"default-src \xff").unwrap());
        assert!(matches!(
            collect_header(&headers, CSP_HEADER),
            Err(FetchError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn default_options_read_csp_header() {
        let options = FetchOptions::default();
        assert_eq!(options.header, CSP_HEADER);
        assert_eq!(options.timeout, Duration::from_secs(30));
    }
}
