//! Console statistics for a finished crawl

use crate::output::traits::CrawlSummary;

/// Formats the one-screen console report
pub fn format_statistics(summary: &CrawlSummary) -> String {
    let mut out = String::new();

    out.push_str(&format!("Crawled {}\n", summary.pages_crawled));
    out.push_str(&format!(
        "Found {} pages with term {}.\n",
        summary.pages_with_matches, summary.keyword
    ));

    let mut state_counts: Vec<_> = summary
        .pages_by_state
        .iter()
        .filter(|(_, count)| **count > 0)
        .collect();
    state_counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));

    if !state_counts.is_empty() {
        out.push_str("\nPages by State:\n");
        for (state, count) in state_counts {
            let percentage = if summary.pages_crawled > 0 {
                (*count as f64 / summary.pages_crawled as f64) * 100.0
            } else {
                0.0
            };
            out.push_str(&format!("  {}: {} ({:.1}%)\n", state, count, percentage));
        }
    }

    out.push_str(&format!(
        "\nSuccess Rate: {:.1}% in {:.2}s (peak {} concurrent fetches)\n",
        summary.success_rate(),
        summary.duration_seconds,
        summary.peak_in_flight
    ));

    out
}

/// Prints statistics to stdout
pub fn print_statistics(summary: &CrawlSummary) {
    print!("{}", format_statistics(summary));
}
