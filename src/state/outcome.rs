use crate::state::PageState;
use serde::Serialize;
use url::Url;

/// A unit of pending crawl work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    url: Url,
    level: u32,
}

impl CrawlTarget {
    pub fn new(url: Url, level: u32) -> Self {
        Self { url, level }
    }

    /// The root of a crawl always sits at level 0
    pub fn root(url: Url) -> Self {
        Self::new(url, 0)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Link hops from the crawl root
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Builds the target for a link discovered on this page
    pub fn child(&self, url: Url) -> Self {
        Self::new(url, self.level.saturating_add(1))
    }
}

/// Everything a single page task produced
///
/// Failed pages still produce an outcome, with no links and no matches.
#[derive(Debug, Clone)]
pub struct PageOutcome {
    pub url: Url,
    pub level: u32,
    /// In-scope links in document order, duplicates included
    pub links: Vec<Url>,
    pub matches: Vec<String>,
    pub state: PageState,
    pub status_code: Option<u16>,
}

impl PageOutcome {
    /// Outcome of a page that was fetched and searched
    pub fn processed(target: &CrawlTarget, links: Vec<Url>, matches: Vec<String>) -> Self {
        Self {
            url: target.url().clone(),
            level: target.level(),
            links,
            matches,
            state: PageState::Processed,
            status_code: Some(200),
        }
    }

    /// Outcome of a page that could not be used
    pub fn failed(target: &CrawlTarget, state: PageState, status_code: Option<u16>) -> Self {
        Self {
            url: target.url().clone(),
            level: target.level(),
            links: Vec::new(),
            matches: Vec::new(),
            state,
            status_code,
        }
    }

    pub fn into_record(self) -> CrawlRecord {
        CrawlRecord {
            url: self.url.into(),
            matches: self.matches,
        }
    }
}

/// One entry of the crawl result: a completed page and its keyword matches
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlRecord {
    pub url: String,
    pub matches: Vec<String>,
}

impl CrawlRecord {
    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> CrawlTarget {
        CrawlTarget::new(Url::parse("https://example.com/a").unwrap(), 1)
    }

    #[test]
    fn test_child_increments_level() {
        let child = target().child(Url::parse("https://example.com/b").unwrap());
        assert_eq!(child.level(), 2);
        assert_eq!(child.url().as_str(), "https://example.com/b");
    }

    #[test]
    fn test_root_level() {
        let root = CrawlTarget::root(Url::parse("https://example.com/").unwrap());
        assert_eq!(root.level(), 0);
    }

    #[test]
    fn test_failed_outcome_is_empty() {
        let outcome = PageOutcome::failed(&target(), PageState::HttpError, Some(500));
        assert!(outcome.links.is_empty());
        assert!(outcome.matches.is_empty());
        assert_eq!(outcome.level, 1);
        assert_eq!(outcome.status_code, Some(500));
    }

    #[test]
    fn test_into_record_keeps_url_and_matches() {
        let outcome = PageOutcome::processed(
            &target(),
            vec![Url::parse("https://example.com/c").unwrap()],
            vec!["a b rust c d".to_string()],
        );
        let record = outcome.into_record();
        assert_eq!(record.url, "https://example.com/a");
        assert!(record.has_matches());
    }

    #[test]
    fn test_record_json_shape() {
        let record = CrawlRecord {
            url: "https://example.com/".to_string(),
            matches: vec!["x y code z w".to_string()],
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"url": "https://example.com/", "matches": ["x y code z w"]})
        );
    }
}
