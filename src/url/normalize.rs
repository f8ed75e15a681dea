use crate::{UrlError, UrlResult};
use url::Url;

/// Schemes that never point at a crawlable page
const NON_PAGE_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

/// Parses and canonicalizes a crawl root URL
///
/// # Canonicalization Steps
///
/// 1. Trim surrounding whitespace and parse; reject if malformed
/// 2. Accept only HTTP and HTTPS schemes
/// 3. Require a host
/// 4. Remove the fragment (everything after #)
///
/// Host lowercasing, default-port elision and dot-segment removal are done
/// by the `url` parser itself.
///
/// # Examples
///
/// ```
/// use sumi_seek::url::normalize_url;
///
/// let url = normalize_url("HTTP://Example.COM:80/a/../docs#intro").unwrap();
/// assert_eq!(url.as_str(), "http://example.com/docs");
/// ```
pub fn normalize_url(url_str: &str) -> UrlResult<Url> {
    let mut url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingDomain);
    }

    url.set_fragment(None);

    Ok(url)
}

/// Returns the key a URL is deduplicated under
///
/// Two URLs that differ only by fragment share a key.
pub fn canonical_key(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);
    url.into()
}

/// Returns true when an href uses a scheme that can never be fetched as a page
pub(crate) fn is_non_page_href(href: &str) -> bool {
    let lower = href.trim_start().to_ascii_lowercase();
    NON_PAGE_SCHEMES.iter().any(|scheme| lower.starts_with(scheme))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_scheme() {
        let result = normalize_url("http://example.com/page").unwrap();
        assert_eq!(result.as_str(), "http://example.com/page");
    }

    #[test]
    fn test_remove_fragment() {
        let result = normalize_url("https://example.com/page#section").unwrap();
        assert_eq!(result.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_lowercase_domain() {
        let result = normalize_url("https://EXAMPLE.COM/Page").unwrap();
        assert_eq!(result.as_str(), "https://example.com/Page");
    }

    #[test]
    fn test_default_port_dropped() {
        let result = normalize_url("https://example.com:443/").unwrap();
        assert_eq!(result.as_str(), "https://example.com/");
    }

    #[test]
    fn test_query_preserved() {
        let result = normalize_url("https://example.com/search?q=rust&page=2").unwrap();
        assert_eq!(result.as_str(), "https://example.com/search?q=rust&page=2");
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        let result = normalize_url("  https://example.com/  ").unwrap();
        assert_eq!(result.as_str(), "https://example.com/");
    }

    #[test]
    fn test_empty_path_becomes_root() {
        let result = normalize_url("https://example.com").unwrap();
        assert_eq!(result.as_str(), "https://example.com/");
    }

    #[test]
    fn test_invalid_scheme() {
        let result = normalize_url("ftp://example.com/page");
        assert!(matches!(result.unwrap_err(), UrlError::InvalidScheme(_)));
    }

    #[test]
    fn test_malformed_url() {
        let result = normalize_url("not a url");
        assert!(matches!(result.unwrap_err(), UrlError::Parse(_)));
    }

    #[test]
    fn test_canonical_key_ignores_fragment() {
        let a = Url::parse("https://example.com/page#one").unwrap();
        let b = Url::parse("https://example.com/page#two").unwrap();
        assert_eq!(canonical_key(&a), canonical_key(&b));
        assert_eq!(canonical_key(&a), "https://example.com/page");
    }

    #[test]
    fn test_non_page_hrefs() {
        assert!(is_non_page_href("javascript:void(0)"));
        assert!(is_non_page_href("MAILTO:someone@example.com"));
        assert!(is_non_page_href("  tel:+123"));
        assert!(is_non_page_href("data:text/html,hi"));
        assert!(!is_non_page_href("/docs"));
        assert!(!is_non_page_href("https://example.com/"));
    }
}
