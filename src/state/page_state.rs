/// Page state definitions for crawl outcomes
///
/// Every page a crawl touches ends in exactly one of these states.
use serde::Serialize;
use std::fmt;

/// Terminal state of a fetched page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageState {
    // ===== Success =====
    /// Page was fetched with status 200, parsed and searched
    Processed,

    // ===== Fetch failures =====
    /// Server answered with a status other than 200
    HttpError,

    /// Page could not be reached (connection refused, DNS failure, timeout)
    Unreachable,

    // ===== Parse failures =====
    /// Content-Type was present and not HTML
    ContentMismatch,

    /// Response body could not be read or decoded
    ParseFailed,
}

impl PageState {
    /// Returns true if this represents a successful completion
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Processed)
    }

    /// Returns true if the fetch itself failed
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::HttpError | Self::Unreachable)
    }

    /// Returns true if the page arrived but could not be used
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::ContentMismatch | Self::ParseFailed)
    }

    /// Stable snake_case label used in logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::HttpError => "http_error",
            Self::Unreachable => "unreachable",
            Self::ContentMismatch => "content_mismatch",
            Self::ParseFailed => "parse_failed",
        }
    }

    /// Returns all possible page states
    pub fn all_states() -> [Self; 5] {
        [
            Self::Processed,
            Self::HttpError,
            Self::Unreachable,
            Self::ContentMismatch,
            Self::ParseFailed,
        ]
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
