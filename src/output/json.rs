//! JSON results file
//!
//! The results file is a JSON array of `{"url": ..., "matches": [...]}`
//! objects in completion order, one per crawled page.

use crate::crawler::CrawlRun;
use crate::output::traits::{CrawlSummary, OutputHandler, OutputResult};
use crate::state::CrawlRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes crawl records as a JSON array
pub fn write_results_json(records: &[CrawlRecord], output_path: &Path) -> OutputResult<()> {
    let mut writer = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Output handler for the JSON results file
#[derive(Debug, Clone)]
pub struct JsonResultsFile {
    path: PathBuf,
}

impl JsonResultsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputHandler for JsonResultsFile {
    fn name(&self) -> &'static str {
        "json"
    }

    fn write(&self, run: &CrawlRun, _summary: &CrawlSummary) -> OutputResult<()> {
        write_results_json(&run.report.records, &self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::traits::fixtures::sample_run;
    use crate::output::OutputError;
    use tempfile::TempDir;

    #[test]
    fn test_results_file_shape() {
        let dir = TempDir::new().unwrap();
        let handler = JsonResultsFile::new(dir.path().join("results.json"));
        let run = sample_run();

        handler
            .write(&run, &CrawlSummary::from_run(&run, None))
            .unwrap();

        let content = std::fs::read_to_string(handler.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        let entries = value.as_array().unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1]["url"], "https://example.com/editor");
        assert_eq!(entries[1]["matches"][0], "the best code editor here");
        assert_eq!(entries[0]["matches"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("results.json");

        let result = write_results_json(&[], &path);
        assert!(matches!(result, Err(OutputError::Io(_))));
    }
}
