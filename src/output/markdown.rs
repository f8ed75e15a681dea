//! Markdown summary generation
//!
//! This module generates a human-readable markdown report of a crawl: run
//! information, page states and every match found.

use crate::crawler::CrawlRun;
use crate::output::traits::{CrawlSummary, OutputHandler, OutputResult};
use crate::state::PageState;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Generates a markdown summary file
///
/// # Arguments
///
/// * `summary` - The crawl summary data
/// * `output_path` - Path where the markdown file should be written
pub fn generate_markdown_summary(summary: &CrawlSummary, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(summary);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawl summary as markdown
pub fn format_markdown_summary(summary: &CrawlSummary) -> String {
    let mut md = String::new();

    md.push_str("# Sumi-Seek Crawl Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Root URL**: {}\n", summary.root));
    md.push_str(&format!("- **Keyword**: `{}`\n", summary.keyword));
    md.push_str(&format!("- **Depth Limit**: {}\n", summary.depth_limit));
    md.push_str(&format!("- **Started**: {}\n", summary.started_at));
    md.push_str(&format!("- **Finished**: {}\n", summary.finished_at));
    md.push_str(&format!(
        "- **Duration**: {:.2} seconds\n",
        summary.duration_seconds
    ));
    if let Some(hash) = &summary.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push('\n');

    // Overall statistics
    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **Pages Crawled**: {}\n", summary.pages_crawled));
    md.push_str(&format!(
        "- **Pages With Matches**: {}\n",
        summary.pages_with_matches
    ));
    md.push_str(&format!("- **Total Matches**: {}\n", summary.total_matches));
    md.push_str(&format!(
        "- **Links Discovered**: {}\n",
        summary.links_discovered
    ));
    md.push_str(&format!(
        "- **Peak Concurrent Fetches**: {}\n",
        summary.peak_in_flight
    ));
    md.push_str(&format!("- **Deepest Level**: {}\n", summary.deepest_level));
    md.push_str(&format!(
        "- **Success Rate**: {:.2}%\n\n",
        summary.success_rate()
    ));

    // State breakdown
    md.push_str("## Page State Breakdown\n\n");
    md.push_str("| State | Count |\n");
    md.push_str("|-------|-------|\n");
    for state in PageState::all_states() {
        md.push_str(&format!("| {} | {} |\n", state, summary.count(state)));
    }
    md.push('\n');

    // Matches
    md.push_str("## Matches\n\n");
    if summary.matched_pages.is_empty() {
        md.push_str(&format!("No page mentions `{}`.\n", summary.keyword));
    }
    for record in &summary.matched_pages {
        md.push_str(&format!("### {}\n\n", record.url));
        for context in &record.matches {
            md.push_str(&format!("- {}\n", context));
        }
        md.push('\n');
    }

    md
}

/// Output handler for the markdown report
#[derive(Debug, Clone)]
pub struct MarkdownSummary {
    path: PathBuf,
}

impl MarkdownSummary {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputHandler for MarkdownSummary {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn write(&self, _run: &CrawlRun, summary: &CrawlSummary) -> OutputResult<()> {
        generate_markdown_summary(summary, &self.path)
    }
}
