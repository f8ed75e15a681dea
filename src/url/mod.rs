//! URL handling module for Sumi-Seek
//!
//! This module provides root URL normalization, dedup keys and the
//! same-origin link filter used by every page task.

mod normalize;
mod origin;

pub use normalize::{canonical_key, normalize_url};
pub use origin::{filter_link, HostPolicy, LinkRejection};

use url::Url;

/// Extracts the lowercase host of a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_seek::url::extract_host;
///
/// let url = Url::parse("https://Docs.Example.com:8080/path").unwrap();
/// assert_eq!(extract_host(&url), Some("docs.example.com".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}
