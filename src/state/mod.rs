//! State module for crawl work and its outcomes
//!
//! # Components
//!
//! - `CrawlTarget`: a URL waiting to be fetched, with its depth level
//! - `PageOutcome`: what one page task produced
//! - `CrawlRecord`: the `{url, matches}` entry returned to the caller
//! - `PageState`: terminal state of a fetched page

mod outcome;
mod page_state;

pub use outcome::{CrawlRecord, CrawlTarget, PageOutcome};
pub use page_state::PageState;
