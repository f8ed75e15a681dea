//! Output module for persisting crawl results
//!
//! This module handles:
//! - Writing the JSON results file
//! - Generating the optional markdown summary
//! - Printing console statistics

mod json;
mod markdown;
pub mod stats;
mod traits;

pub use json::{write_results_json, JsonResultsFile};
pub use markdown::{format_markdown_summary, generate_markdown_summary, MarkdownSummary};
pub use stats::{format_statistics, print_statistics};
pub use traits::{CrawlSummary, OutputError, OutputHandler, OutputResult};

use crate::config::OutputConfig;
use crate::crawler::CrawlRun;

/// Builds the handlers an output configuration asks for
pub fn handlers_for(config: &OutputConfig) -> Vec<Box<dyn OutputHandler>> {
    let mut handlers: Vec<Box<dyn OutputHandler>> =
        vec![Box::new(JsonResultsFile::new(&config.results_path))];

    if let Some(summary_path) = &config.summary_path {
        handlers.push(Box::new(MarkdownSummary::new(summary_path)));
    }

    handlers
}

/// Writes a finished crawl through every configured handler
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - All outputs written; the summary is returned for printing
/// * `Err(OutputError)` - The first handler that failed
pub fn write_outputs(
    run: &CrawlRun,
    config: &OutputConfig,
    config_hash: Option<&str>,
) -> OutputResult<CrawlSummary> {
    let summary = CrawlSummary::from_run(run, config_hash);

    for handler in handlers_for(config) {
        tracing::debug!("Writing {} output", handler.name());
        handler.write(run, &summary)?;
    }

    Ok(summary)
}
