//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with a fixed timeout and no retries
//! - HTML parsing and link discovery
//! - The two-class crawl frontier
//! - The crawl session and the coordinator that drives it

mod coordinator;
mod fetcher;
mod frontier;
mod links;
pub(crate) mod parser;
mod session;

pub use coordinator::Coordinator;
pub use fetcher::{build_http_client, fetch_page, FetchError, FetchedPage, REQUEST_TIMEOUT};
pub use frontier::{Frontier, FrontierEntry};
pub use links::{extract_links, is_priority, LinkSet, PRIORITY_KEYWORDS};
pub use parser::ParsedPage;
pub use session::{CrawlSession, Pacer};
