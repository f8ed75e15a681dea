//! Output handler traits and types
//!
//! This module defines the trait interface for output handlers and the
//! summary data derived from a finished crawl.

use crate::crawler::CrawlRun;
use crate::state::{CrawlRecord, PageState};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize results: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Summary statistics for a crawl
#[derive(Debug, Clone, Default)]
pub struct CrawlSummary {
    // Run metadata
    pub root: String,
    pub keyword: String,
    pub depth_limit: u32,
    pub started_at: String,
    pub finished_at: String,
    pub duration_seconds: f64,
    pub config_hash: Option<String>,

    // Overall statistics
    pub pages_crawled: u64,
    pub pages_with_matches: u64,
    pub total_matches: u64,
    pub links_discovered: u64,
    pub peak_in_flight: usize,
    pub deepest_level: u32,

    // State breakdown
    pub pages_by_state: HashMap<PageState, u64>,

    // Pages with at least one match, in completion order
    pub matched_pages: Vec<CrawlRecord>,
}

impl CrawlSummary {
    /// Builds a summary from a finished crawl
    pub fn from_run(run: &CrawlRun, config_hash: Option<&str>) -> Self {
        let stats = &run.report.stats;

        Self {
            root: run.root.to_string(),
            keyword: run.keyword.clone(),
            depth_limit: run.depth_limit,
            started_at: run.started_at.to_rfc3339(),
            finished_at: run.finished_at.to_rfc3339(),
            duration_seconds: run.duration_seconds(),
            config_hash: config_hash.map(str::to_string),
            pages_crawled: stats.pages_crawled(),
            pages_with_matches: stats.pages_with_matches,
            total_matches: stats.total_matches,
            links_discovered: stats.links_discovered,
            peak_in_flight: stats.peak_in_flight,
            deepest_level: stats.deepest_level,
            pages_by_state: stats.pages_by_state.clone(),
            matched_pages: run
                .report
                .records
                .iter()
                .filter(|record| record.has_matches())
                .cloned()
                .collect(),
        }
    }

    pub fn count(&self, state: PageState) -> u64 {
        self.pages_by_state.get(&state).copied().unwrap_or(0)
    }

    /// Pages that did not end up processed
    pub fn failed_pages(&self) -> u64 {
        self.pages_crawled - self.count(PageState::Processed)
    }

    /// Returns the success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.pages_crawled == 0 {
            return 0.0;
        }
        (self.count(PageState::Processed) as f64 / self.pages_crawled as f64) * 100.0
    }
}

/// Trait for output handlers
///
/// Output handlers persist a finished crawl somewhere: a file, a report,
/// the console.
pub trait OutputHandler {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Writes the crawl
    fn write(&self, run: &CrawlRun, summary: &CrawlSummary) -> OutputResult<()>;
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::crawler::{CrawlReport, CrawlRun, CrawlStats};
    use crate::state::{CrawlRecord, PageState};
    use chrono::{TimeZone, Utc};
    use std::collections::HashMap;
    use url::Url;

    /// A small finished crawl: three pages, one failure, one page with matches
    pub(crate) fn sample_run() -> CrawlRun {
        let mut pages_by_state = HashMap::new();
        pages_by_state.insert(PageState::Processed, 2);
        pages_by_state.insert(PageState::HttpError, 1);

        CrawlRun {
            root: Url::parse("https://example.com/").unwrap(),
            keyword: "code".to_string(),
            depth_limit: 2,
            started_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            finished_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 3).unwrap(),
            report: CrawlReport {
                records: vec![
                    CrawlRecord {
                        url: "https://example.com/".to_string(),
                        matches: vec![],
                    },
                    CrawlRecord {
                        url: "https://example.com/editor".to_string(),
                        matches: vec![
                            "the best code editor here".to_string(),
                            "write more code every day".to_string(),
                        ],
                    },
                    CrawlRecord {
                        url: "https://example.com/broken".to_string(),
                        matches: vec![],
                    },
                ],
                stats: CrawlStats {
                    pages_by_state,
                    pages_with_matches: 1,
                    total_matches: 2,
                    links_discovered: 4,
                    peak_in_flight: 2,
                    deepest_level: 1,
                },
            },
        }
    }
}
