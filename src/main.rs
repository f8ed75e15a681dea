//! Sumi-Seek main entry point
//!
//! This is the command-line interface for the Sumi-Seek keyword crawler.

use anyhow::Context;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use sumi_seek::config::{load_config_with_hash, validate, Config};
use sumi_seek::crawler::Coordinator;
use sumi_seek::output::{print_statistics, write_outputs};
use tracing_subscriber::EnvFilter;

const DEFAULT_ROOT_URL: &str = "https://www.udemy.com/";
const DEFAULT_KEYWORD: &str = "software";

/// Sumi-Seek: a same-origin keyword crawler
///
/// Sumi-Seek crawls a website from a root URL, stays on the root's host,
/// and reports every place a keyword appears together with a few words of
/// surrounding context.
#[derive(Parser, Debug)]
#[command(name = "sumi-seek")]
#[command(version)]
#[command(about = "A same-origin keyword crawler", long_about = None)]
struct Cli {
    /// Root URL to start crawling from (prompted for when omitted)
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Keyword to search for (prompted for when omitted)
    #[arg(value_name = "KEYWORD")]
    keyword: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Maximum link depth to expand
    #[arg(short, long)]
    depth: Option<u32>,

    /// Words of context captured on each side of a match
    #[arg(long, value_name = "N")]
    context: Option<usize>,

    /// Maximum number of concurrent page fetches
    #[arg(long, value_name = "N")]
    max_concurrent: Option<u32>,

    /// Also follow links to subdomains of the root host
    #[arg(long)]
    include_subdomains: bool,

    /// Path of the JSON results file
    #[arg(short, long, value_name = "RESULTS")]
    output: Option<PathBuf>,

    /// Write a markdown summary to this path
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (mut config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (cfg, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, Some(hash))
        }
        None => (Config::default(), None),
    };

    apply_overrides(&mut config, &cli);
    validate(&config).context("Invalid settings")?;

    let root = match cli.url {
        Some(url) => url,
        None => prompt("Enter root URL", DEFAULT_ROOT_URL)?,
    };
    let keyword = match cli.keyword {
        Some(keyword) => keyword,
        None => prompt("Enter keyword", DEFAULT_KEYWORD)?,
    };

    let output_config = config.output.clone();
    let coordinator = Coordinator::new(config)?;

    let run = match coordinator.run(&root, &keyword).await {
        Ok(run) => run,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    let summary = write_outputs(&run, &output_config, config_hash.as_deref())
        .context("Failed to write crawl results")?;
    tracing::info!("Results written to {}", output_config.results_path);
    if let Some(path) = &output_config.summary_path {
        tracing::info!("Summary written to {}", path);
    }

    if !cli.quiet {
        print_statistics(&summary);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_seek=info,warn"),
            1 => EnvFilter::new("sumi_seek=debug,info"),
            2 => EnvFilter::new("sumi_seek=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(io::stderr)
        .init();
}

/// Command-line flags win over the configuration file
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(depth) = cli.depth {
        config.crawler.max_depth = depth;
    }
    if let Some(context) = cli.context {
        config.crawler.context_words = context;
    }
    if let Some(limit) = cli.max_concurrent {
        config.crawler.max_concurrent_pages_open = Some(limit);
    }
    if cli.include_subdomains {
        config.crawler.include_subdomains = true;
    }
    if let Some(path) = &cli.output {
        config.output.results_path = path.display().to_string();
    }
    if let Some(path) = &cli.summary {
        config.output.summary_path = Some(path.display().to_string());
    }
}

/// Asks for a value on stdin, falling back to `default` on an empty line
fn prompt(label: &str, default: &str) -> anyhow::Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{} [{}]: ", label, default)?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    let value = line.trim();
    if value.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(value.to_string())
    }
}
