//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `DomainState`: per-origin visited set, page count and crawl phase
//! - `PageResult`: the immutable outcome of one fetch attempt
//! - `EmailRecord`: one extracted address and its guessed name

mod domain_state;
mod page_result;

// Re-export main types
pub use domain_state::{CrawlPhase, DomainState};
pub use page_result::{EmailRecord, PageResult, PageStatus, RecordSource};
