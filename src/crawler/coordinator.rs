//! Crawler coordinator - wires configuration into one crawl run
//!
//! This module turns a validated [`Config`] plus a root URL and keyword into
//! a finished [`CrawlRun`]:
//! - Normalizing the root URL
//! - Compiling the keyword matcher
//! - Building the HTTP fetcher
//! - Configuring and draining the frontier scheduler
//! - Timing the run

use crate::config::Config;
use crate::crawler::fetcher::HttpFetcher;
use crate::crawler::scheduler::{CrawlReport, Scheduler};
use crate::search::KeywordMatcher;
use crate::url::{extract_host, normalize_url};
use crate::Result;
use chrono::{DateTime, Utc};
use std::num::NonZeroUsize;
use url::Url;

/// A finished crawl together with the settings that produced it
#[derive(Debug, Clone)]
pub struct CrawlRun {
    pub root: Url,
    pub keyword: String,
    pub depth_limit: u32,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub report: CrawlReport,
}

impl CrawlRun {
    pub fn duration_seconds(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Config,
    fetcher: HttpFetcher,
    scheduler: Scheduler,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - HTTP client built and scheduler configured
    /// * `Err(SeekError)` - The HTTP client could not be built
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = HttpFetcher::from_config(&config.crawler, &config.user_agent)?;

        let max_in_flight = config
            .crawler
            .max_concurrent_pages_open
            .and_then(|limit| NonZeroUsize::new(limit as usize));

        let scheduler = Scheduler::new(config.crawler.max_depth)
            .with_host_policy(config.crawler.host_policy())
            .with_max_in_flight(max_in_flight);

        Ok(Self {
            config,
            fetcher,
            scheduler,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs one crawl from `root` searching for `keyword`
    ///
    /// Errors are only possible before the first fetch: a root URL that is
    /// not an absolute http(s) URL, or an unusable keyword.
    pub async fn run(&self, root: &str, keyword: &str) -> Result<CrawlRun> {
        let root = normalize_url(root)?;
        let matcher = KeywordMatcher::new(keyword, self.config.crawler.context_words)?;

        tracing::info!(
            "Starting crawl of host {} (max concurrent: {})",
            extract_host(&root).unwrap_or_default(),
            self.config
                .crawler
                .max_concurrent_pages_open
                .map_or_else(|| "unbounded".to_string(), |n| n.to_string())
        );

        let started_at = Utc::now();
        let report = self
            .scheduler
            .crawl(&self.fetcher, root.clone(), &matcher)
            .await;
        let finished_at = Utc::now();

        let run = CrawlRun {
            root,
            keyword: keyword.to_string(),
            depth_limit: self.scheduler.depth_limit(),
            started_at,
            finished_at,
            report,
        };

        tracing::info!(
            "Crawl completed: {} pages crawled in {:.2}s",
            run.report.records.len(),
            run.duration_seconds()
        );

        Ok(run)
    }
}

/// Runs a complete crawl with the given configuration
///
/// # Example
///
/// ```no_run
/// use sumi_seek::config::Config;
/// use sumi_seek::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let run = run_crawl(Config::default(), "https://example.com/", "rust").await?;
/// println!("Crawled {}", run.report.records.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config, root: &str, keyword: &str) -> Result<CrawlRun> {
    Coordinator::new(config)?.run(root, keyword).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SeekError;

    #[test]
    fn test_coordinator_creation() {
        let coordinator = Coordinator::new(Config::default()).unwrap();
        assert_eq!(coordinator.scheduler.depth_limit(), 2);
        assert_eq!(coordinator.config().crawler.context_words, 2);
    }

    #[tokio::test]
    async fn test_invalid_root_rejected_before_fetching() {
        let coordinator = Coordinator::new(Config::default()).unwrap();
        let result = coordinator.run("not a url", "rust").await;
        assert!(matches!(result, Err(SeekError::Url(_))));

        let result = coordinator.run("ftp://example.com/", "rust").await;
        assert!(matches!(result, Err(SeekError::Url(_))));
    }

    #[tokio::test]
    async fn test_empty_keyword_rejected() {
        let coordinator = Coordinator::new(Config::default()).unwrap();
        let result = coordinator.run("https://example.com/", "   ").await;
        assert!(matches!(result, Err(SeekError::Search(_))));
    }
}
