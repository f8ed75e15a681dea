//! Same-origin link filtering
//!
//! Every href found on a page passes through [`filter_link`] before the
//! scheduler sees it. The filter resolves the href against the page it was
//! found on and keeps it only if it stays on the page's host.

use crate::url::normalize::is_non_page_href;
use std::fmt;
use url::Url;

/// How strictly a link's host must agree with the page it was found on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HostPolicy {
    /// The link host must equal the page host
    #[default]
    ExactHost,

    /// The link host may also be any subdomain of the page host
    IncludeSubdomains,
}

impl HostPolicy {
    /// Checks whether `candidate` is in scope for a page served from `origin`
    ///
    /// Both hosts are expected in the lowercase form produced by the `url`
    /// parser. Ports are not part of the comparison.
    pub fn accepts(&self, origin: &str, candidate: &str) -> bool {
        match self {
            Self::ExactHost => candidate == origin,
            Self::IncludeSubdomains => {
                candidate == origin
                    || candidate
                        .strip_suffix(origin)
                        .is_some_and(|prefix| prefix.len() > 1 && prefix.ends_with('.'))
            }
        }
    }
}

/// Why a discovered href was not turned into a crawl target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkRejection {
    /// Blank href or a fragment pointing back into the same page
    Empty,

    /// The href could not be resolved against the page URL
    Malformed(String),

    /// Resolved to something other than http/https
    UnsupportedScheme(String),

    /// Resolved URL has no host to compare
    MissingHost,

    /// Host differs from the page's host
    OffOrigin(String),
}

impl LinkRejection {
    /// Off-origin links are a scope decision rather than a defect in the page
    pub fn is_scope_decision(&self) -> bool {
        matches!(self, Self::OffOrigin(_))
    }
}

impl fmt::Display for LinkRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty or same-page link"),
            Self::Malformed(e) => write!(f, "malformed link: {}", e),
            Self::UnsupportedScheme(s) => write!(f, "unsupported scheme: {}", s),
            Self::MissingHost => write!(f, "link has no host"),
            Self::OffOrigin(host) => write!(f, "off-origin host: {}", host),
        }
    }
}

/// Resolves `raw_href` against `page_url` and keeps it if it stays in scope
///
/// Relative (`docs/intro`), root-relative (`/docs`), protocol-relative
/// (`//example.com/docs`) and absolute hrefs are all supported. The returned
/// URL has its fragment removed so it can be used directly as a dedup key.
///
/// # Examples
///
/// ```
/// use sumi_seek::url::{filter_link, HostPolicy, LinkRejection};
/// use url::Url;
///
/// let page = Url::parse("https://example.com/blog/post").unwrap();
///
/// let link = filter_link("../about#team", &page, HostPolicy::ExactHost).unwrap();
/// assert_eq!(link.as_str(), "https://example.com/about");
///
/// let rejected = filter_link("https://other.org/", &page, HostPolicy::ExactHost);
/// assert!(matches!(rejected, Err(LinkRejection::OffOrigin(_))));
/// ```
pub fn filter_link(raw_href: &str, page_url: &Url, policy: HostPolicy) -> Result<Url, LinkRejection> {
    let href = raw_href.trim();

    if href.is_empty() || href.starts_with('#') {
        return Err(LinkRejection::Empty);
    }

    if is_non_page_href(href) {
        let scheme = href.split(':').next().unwrap_or_default();
        return Err(LinkRejection::UnsupportedScheme(scheme.to_ascii_lowercase()));
    }

    let mut resolved = page_url
        .join(href)
        .map_err(|e| LinkRejection::Malformed(e.to_string()))?;

    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return Err(LinkRejection::UnsupportedScheme(resolved.scheme().to_string()));
    }

    let origin = page_url.host_str().ok_or(LinkRejection::MissingHost)?;
    let host = resolved.host_str().ok_or(LinkRejection::MissingHost)?;

    if !policy.accepts(origin, host) {
        return Err(LinkRejection::OffOrigin(host.to_string()));
    }

    resolved.set_fragment(None);
    Ok(resolved)
}
