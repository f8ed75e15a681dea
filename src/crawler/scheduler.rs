//! Frontier scheduler: the crawl's only coordinator
//!
//! This module handles:
//! - The visited set used to deduplicate discovered URLs
//! - The pool of in-flight page tasks, drained in completion order
//! - The depth ceiling on link expansion
//! - An optional cap on concurrent page fetches
//!
//! All page tasks are futures polled from the scheduler's own task through a
//! single `FuturesUnordered`, so the visited set and the in-flight pool are
//! plain collections. They are only touched between two awaits of the drain
//! loop.

use crate::crawler::fetcher::Fetcher;
use crate::crawler::page::PageTask;
use crate::search::{KeywordMatcher, SearchError, DEFAULT_CONTEXT_WORDS};
use crate::state::{CrawlRecord, CrawlTarget, PageOutcome, PageState};
use crate::url::{canonical_key, HostPolicy};
use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::{HashMap, HashSet, VecDeque};
use std::num::NonZeroUsize;
use url::Url;

/// Default number of link hops whose pages are expanded
pub const DEFAULT_DEPTH_LIMIT: u32 = 2;

/// Counters gathered while draining the frontier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Completed pages per terminal state
    pub pages_by_state: HashMap<PageState, u64>,

    /// Pages with at least one keyword match
    pub pages_with_matches: u64,

    /// Keyword matches across all pages
    pub total_matches: u64,

    /// In-scope links reported by pages, before deduplication
    pub links_discovered: u64,

    /// Highest number of page tasks in flight at once
    pub peak_in_flight: usize,

    /// Deepest level of any completed page
    pub deepest_level: u32,
}

impl CrawlStats {
    fn record(&mut self, outcome: &PageOutcome) {
        *self.pages_by_state.entry(outcome.state).or_insert(0) += 1;
        if !outcome.matches.is_empty() {
            self.pages_with_matches += 1;
        }
        self.total_matches += outcome.matches.len() as u64;
        self.links_discovered += outcome.links.len() as u64;
        self.deepest_level = self.deepest_level.max(outcome.level);
    }

    /// Total number of completed pages
    pub fn pages_crawled(&self) -> u64 {
        self.pages_by_state.values().sum()
    }

    /// Number of completed pages in the given state
    pub fn count(&self, state: PageState) -> u64 {
        self.pages_by_state.get(&state).copied().unwrap_or(0)
    }
}

/// Result of one crawl: records in completion order plus counters
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    pub records: Vec<CrawlRecord>,
    pub stats: CrawlStats,
}

/// Scheduler owns crawl policy; every call to [`Scheduler::crawl`] gets a
/// fresh visited set and in-flight pool
///
/// The scheduler coordinates:
/// - Depth limit (pages at the limit are fetched but not expanded)
/// - Host policy handed to every page task
/// - Optional cap on concurrent page fetches
#[derive(Debug, Clone)]
pub struct Scheduler {
    depth_limit: u32,
    host_policy: HostPolicy,
    max_in_flight: Option<NonZeroUsize>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH_LIMIT)
    }
}

impl Scheduler {
    /// Creates an unbounded, exact-host scheduler
    pub fn new(depth_limit: u32) -> Self {
        Self {
            depth_limit,
            host_policy: HostPolicy::ExactHost,
            max_in_flight: None,
        }
    }

    pub fn with_host_policy(mut self, host_policy: HostPolicy) -> Self {
        self.host_policy = host_policy;
        self
    }

    /// Caps concurrent page fetches; `None` keeps fan-out unbounded
    pub fn with_max_in_flight(mut self, limit: Option<NonZeroUsize>) -> Self {
        self.max_in_flight = limit;
        self
    }

    pub fn depth_limit(&self) -> u32 {
        self.depth_limit
    }

    fn has_capacity(&self, in_flight: usize) -> bool {
        self.max_in_flight
            .map_or(true, |limit| in_flight < limit.get())
    }

    /// Crawls from `root` until the frontier is exhausted
    ///
    /// # Drain Loop
    ///
    /// 1. Start waiting targets while under the concurrency cap
    /// 2. Suspend until any in-flight page completes
    /// 3. Retire it from the in-flight pool
    /// 4. Below the depth limit, admit every discovered link not yet visited
    /// 5. Append the page's `{url, matches}` record
    ///
    /// Records come back in completion order. Page failures never abort the
    /// crawl; they show up as records without matches.
    pub async fn crawl<F: Fetcher>(
        &self,
        fetcher: &F,
        root: Url,
        matcher: &KeywordMatcher,
    ) -> CrawlReport {
        let task = PageTask::new(fetcher, matcher, self.host_policy);

        let mut visited: HashSet<String> = HashSet::new();
        let mut waiting: VecDeque<CrawlTarget> = VecDeque::new();
        let mut in_flight_keys: HashSet<String> = HashSet::new();
        let mut in_flight = FuturesUnordered::new();
        let mut report = CrawlReport::default();

        tracing::info!(
            "Crawling {} for {:?} (depth limit {})",
            root,
            matcher.keyword(),
            self.depth_limit
        );

        visited.insert(canonical_key(&root));
        waiting.push_back(CrawlTarget::root(root));

        loop {
            while self.has_capacity(in_flight.len()) {
                let Some(target) = waiting.pop_front() else {
                    break;
                };
                let newly_in_flight = in_flight_keys.insert(canonical_key(target.url()));
                debug_assert!(newly_in_flight, "{} scheduled twice", target.url());
                in_flight.push(task.run(target));
            }

            report.stats.peak_in_flight = report.stats.peak_in_flight.max(in_flight.len());

            let Some(outcome) = in_flight.next().await else {
                break;
            };

            let retired = in_flight_keys.remove(&canonical_key(&outcome.url));
            debug_assert!(retired, "{} completed but was not in flight", outcome.url);

            if outcome.level < self.depth_limit {
                let admitted = self.admit_links(&outcome, &mut visited, &mut waiting);
                tracing::trace!(
                    "{} admitted {} of {} links",
                    outcome.url,
                    admitted,
                    outcome.links.len()
                );
            }

            report.stats.record(&outcome);
            report.records.push(outcome.into_record());

            let crawled = report.records.len();
            if crawled % 10 == 0 {
                tracing::info!(
                    "Progress: {} pages crawled, {} in flight, {} waiting",
                    crawled,
                    in_flight.len(),
                    waiting.len()
                );
            }
        }

        debug_assert!(in_flight_keys.is_empty());
        debug_assert!(waiting.is_empty());

        tracing::info!(
            "Frontier exhausted: {} pages crawled, {} with matches",
            report.records.len(),
            report.stats.pages_with_matches
        );

        report
    }

    /// Marks unseen links as visited and queues them one level deeper
    fn admit_links(
        &self,
        outcome: &PageOutcome,
        visited: &mut HashSet<String>,
        waiting: &mut VecDeque<CrawlTarget>,
    ) -> usize {
        let parent = CrawlTarget::new(outcome.url.clone(), outcome.level);
        let mut admitted = 0;

        for link in &outcome.links {
            if visited.insert(canonical_key(link)) {
                waiting.push_back(parent.child(link.clone()));
                admitted += 1;
            }
        }

        admitted
    }
}

/// Crawls `root` for `keyword` with default context and unbounded fan-out
///
/// Returns the `{url, matches}` records in completion order.
///
/// # Errors
///
/// Only an unusable keyword is an error, raised before anything is fetched.
pub async fn crawl<F: Fetcher>(
    fetcher: &F,
    root: Url,
    keyword: &str,
    depth_limit: u32,
) -> Result<Vec<CrawlRecord>, SearchError> {
    let matcher = KeywordMatcher::new(keyword, DEFAULT_CONTEXT_WORDS)?;
    let report = Scheduler::new(depth_limit)
        .crawl(fetcher, root, &matcher)
        .await;
    Ok(report.records)
}
