//! Page task: one fetch-and-search unit of work
//!
//! A page task never fails. Transport errors, bad status codes and unusable
//! bodies all degrade to an outcome with no links and no matches, which the
//! scheduler records like any other page.

use crate::crawler::fetcher::{FetchError, Fetcher};
use crate::crawler::parser::{parse_document, ParsedDocument};
use crate::search::KeywordMatcher;
use crate::state::{CrawlTarget, PageOutcome, PageState};
use crate::url::{filter_link, HostPolicy};
use url::Url;

/// Everything a page needs besides its own target
///
/// Shared by reference between all in-flight pages of one crawl.
pub struct PageTask<'a, F> {
    fetcher: &'a F,
    matcher: &'a KeywordMatcher,
    policy: HostPolicy,
}

impl<'a, F: Fetcher> PageTask<'a, F> {
    pub fn new(fetcher: &'a F, matcher: &'a KeywordMatcher, policy: HostPolicy) -> Self {
        Self {
            fetcher,
            matcher,
            policy,
        }
    }

    /// Fetches, parses and searches one page
    pub async fn run(&self, target: CrawlTarget) -> PageOutcome {
        tracing::debug!("Fetching [level {}] {}", target.level(), target.url());

        let page = match self.fetcher.fetch(target.url()).await {
            Ok(page) => page,
            Err(FetchError::Body(e)) => {
                tracing::warn!("Unreadable body from {}: {}", target.url(), e);
                return PageOutcome::failed(&target, PageState::ParseFailed, Some(200));
            }
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", target.url(), e);
                return PageOutcome::failed(&target, PageState::Unreachable, None);
            }
        };

        if !page.is_ok() {
            tracing::debug!("{} returned HTTP {}", target.url(), page.status_code);
            return PageOutcome::failed(&target, PageState::HttpError, Some(page.status_code));
        }

        if !page.looks_like_html() {
            tracing::debug!(
                "Skipping {}: content type {}",
                target.url(),
                page.content_type.as_deref().unwrap_or_default()
            );
            return PageOutcome::failed(&target, PageState::ContentMismatch, Some(page.status_code));
        }

        let document = parse_document(&page.body);
        let matches = self.matcher.find_all(&document.body_text());
        let links = self.in_scope_links(&document, target.url());

        tracing::debug!(
            "Processed {} ({:?}): {} matches, {} in-scope links",
            target.url(),
            document.title().unwrap_or_default(),
            matches.len(),
            links.len()
        );

        PageOutcome::processed(&target, links, matches)
    }

    /// Runs every href through the origin filter, keeping document order
    fn in_scope_links(&self, document: &ParsedDocument, page_url: &Url) -> Vec<Url> {
        document
            .hrefs()
            .iter()
            .filter_map(|href| match filter_link(href, page_url, self.policy) {
                Ok(url) => Some(url),
                Err(rejection) if rejection.is_scope_decision() => {
                    tracing::trace!("Out of scope on {}: {}", page_url, rejection);
                    None
                }
                Err(rejection) => {
                    tracing::debug!("Dropping href {:?} on {}: {}", href, page_url, rejection);
                    None
                }
            })
            .collect()
    }
}
