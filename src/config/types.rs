use crate::search::DEFAULT_CONTEXT_WORDS;
use crate::url::HostPolicy;
use serde::Deserialize;

/// Main configuration structure for Sumi-Seek
///
/// Every section is optional in the TOML file; missing keys take the
/// defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Maximum number of link hops from the root whose links are expanded
    pub max_depth: u32,

    /// Words captured on each side of a keyword match
    pub context_words: usize,

    /// Maximum number of concurrent page fetches (absent = unbounded)
    pub max_concurrent_pages_open: Option<u32>,

    /// Also follow links to subdomains of the page's host
    pub include_subdomains: bool,

    /// Whole-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Redirect hops followed per request
    pub max_redirects: usize,

    /// Refuse plain-HTTP URLs
    pub https_only: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            context_words: DEFAULT_CONTEXT_WORDS,
            max_concurrent_pages_open: None,
            include_subdomains: false,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            max_redirects: 10,
            https_only: false,
        }
    }
}

impl CrawlerConfig {
    pub fn host_policy(&self) -> HostPolicy {
        if self.include_subdomains {
            HostPolicy::IncludeSubdomains
        } else {
            HostPolicy::ExactHost
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UserAgentConfig {
    /// Name of the crawler
    pub crawler_name: String,

    /// Version of the crawler
    pub crawler_version: String,

    /// URL with information about the crawler
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "SumiSeek".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Format: CrawlerName/Version (+ContactURL)
    pub fn user_agent_string(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Path of the JSON results file
    pub results_path: String,

    /// Path of the markdown summary, written only when set
    pub summary_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_path: "./results.json".to_string(),
            summary_path: None,
        }
    }
}
