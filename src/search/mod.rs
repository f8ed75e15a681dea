//! Keyword search with surrounding word context
//!
//! A [`KeywordMatcher`] is compiled once per crawl and shared by every page
//! task. Each match is returned as the flat slice of page text covering
//! `context_words` tokens on either side of the keyword.

use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Default number of words captured on each side of a keyword
pub const DEFAULT_CONTEXT_WORDS: usize = 2;

/// Upper bound on the context window, keeps the compiled pattern small
pub const MAX_CONTEXT_WORDS: usize = 32;

/// Errors raised while preparing a keyword search
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search keyword cannot be empty")]
    EmptyKeyword,

    #[error("Context window must be at most {max} words, got {got}")]
    InvalidContext { got: usize, max: usize },

    #[error("Failed to compile keyword pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Compiled, case-insensitive keyword-in-context pattern
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keyword: String,
    context_words: usize,
    pattern: Regex,
}

impl KeywordMatcher {
    /// Compiles a matcher for `keyword`
    ///
    /// The keyword is matched literally: characters such as `+`, `.` or `(`
    /// carry no pattern meaning. It may sit inside a longer token (`code`
    /// matches inside `codebase`) and may itself contain spaces.
    ///
    /// # Errors
    ///
    /// * `SearchError::EmptyKeyword` - keyword is empty or only whitespace
    /// * `SearchError::InvalidContext` - `context_words` exceeds [`MAX_CONTEXT_WORDS`]
    pub fn new(keyword: &str, context_words: usize) -> Result<Self, SearchError> {
        if keyword.trim().is_empty() {
            return Err(SearchError::EmptyKeyword);
        }

        if context_words > MAX_CONTEXT_WORDS {
            return Err(SearchError::InvalidContext {
                got: context_words,
                max: MAX_CONTEXT_WORDS,
            });
        }

        let escaped = regex::escape(keyword);
        let source = format!(
            r"(?:\S+\s+){{{n}}}\S*?{kw}\S*(?:\s+\S+){{{n}}}",
            n = context_words,
            kw = escaped
        );

        let pattern = RegexBuilder::new(&source).case_insensitive(true).build()?;

        Ok(Self {
            keyword: keyword.to_string(),
            context_words,
            pattern,
        })
    }

    /// The keyword as supplied by the caller
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn context_words(&self) -> usize {
        self.context_words
    }

    /// Returns every non-overlapping keyword window in document order
    pub fn find_all(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        self.pattern
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// One-shot keyword extraction
///
/// Returns an empty list when `text` is absent or empty. Compile a
/// [`KeywordMatcher`] instead when searching many pages for the same keyword.
///
/// # Examples
///
/// ```
/// use sumi_seek::search::extract;
///
/// let found = extract(Some("the best code editor here"), "code", 2).unwrap();
/// assert_eq!(found, vec!["the best code editor here"]);
/// ```
pub fn extract(
    text: Option<&str>,
    keyword: &str,
    context_words: usize,
) -> Result<Vec<String>, SearchError> {
    let matcher = KeywordMatcher::new(keyword, context_words)?;
    Ok(text.map(|t| matcher.find_all(t)).unwrap_or_default())
}
