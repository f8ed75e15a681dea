//! Crawler module for page fetching and frontier scheduling
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `Fetcher` trait
//! - HTML parsing into searchable text and links
//! - The page task that turns one URL into one outcome
//! - The frontier scheduler that drains page tasks in completion order
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod page;
mod parser;
mod scheduler;

pub use coordinator::{run_crawl, Coordinator, CrawlRun};
pub use fetcher::{build_http_client, FetchError, FetchedPage, Fetcher, HttpFetcher};
pub use page::PageTask;
pub use parser::{parse_document, ParsedDocument};
pub use scheduler::{crawl, CrawlReport, CrawlStats, Scheduler, DEFAULT_DEPTH_LIMIT};
