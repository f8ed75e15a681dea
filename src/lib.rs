//! Sumi-Seek: a same-origin keyword crawler
//!
//! This crate crawls a website from a root URL up to a depth limit, staying on
//! the root's host, and searches every page for a keyword. Each match is
//! returned with a few words of surrounding context.

pub mod config;
pub mod crawler;
pub mod output;
pub mod search;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Seek operations
///
/// Page-level failures never surface here; they become empty outcomes inside
/// the crawl. These errors stop a run before it starts or after it finishes.
#[derive(Debug, Error)]
pub enum SeekError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Search error: {0}")]
    Search(#[from] search::SearchError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Sumi-Seek operations
pub type Result<T> = std::result::Result<T, SeekError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, run_crawl, Scheduler};
pub use search::KeywordMatcher;
pub use state::{CrawlRecord, CrawlTarget, PageOutcome, PageState};
pub use crate::url::{filter_link, normalize_url, HostPolicy};
