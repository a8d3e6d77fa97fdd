use crate::config::CrawlerConfig;
use std::collections::HashSet;

/// Lifecycle of one domain crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlPhase {
    Idle,
    Discovering,
    Done,
}

/// Tracks the state of a domain during crawling
///
/// Created on the first seed for an origin and dropped once that origin's
/// frontier is exhausted or its page budget is spent.
#[derive(Debug, Clone)]
pub struct DomainState {
    /// Origin this state belongs to (`scheme://host[:port]`)
    pub origin: String,

    /// Normalized URLs already fetched (or claimed for fetching)
    visited: HashSet<String>,

    /// Number of pages fetched in this domain crawl
    pub pages_scraped: u32,

    phase: CrawlPhase,
}

impl DomainState {
    /// Creates a new DomainState with default values
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            visited: HashSet::new(),
            pages_scraped: 0,
            phase: CrawlPhase::Idle,
        }
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Claims a URL for fetching and counts it against the budget
    ///
    /// Returns false, without counting, when the URL was already claimed.
    pub fn claim(&mut self, url: &str) -> bool {
        if !self.visited.insert(url.to_string()) {
            return false;
        }
        self.pages_scraped += 1;
        true
    }

    /// Marks a URL as seen without spending budget (e.g. a redirect target)
    pub fn mark_seen(&mut self, url: &str) {
        self.visited.insert(url.to_string());
    }

    /// Checks if this domain has spent its page budget
    pub fn has_exceeded_limit(&self, config: &CrawlerConfig) -> bool {
        self.pages_scraped >= config.max_pages
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// Moves an idle crawl into discovery; no effect in any other phase
    pub fn start(&mut self) {
        if self.phase == CrawlPhase::Idle {
            self.phase = CrawlPhase::Discovering;
        }
    }

    /// Ends the crawl; the frontier loop stops at its next check
    pub fn finish(&mut self) {
        self.phase = CrawlPhase::Done;
    }

    pub fn is_discovering(&self) -> bool {
        self.phase == CrawlPhase::Discovering
    }
}
