//! Crawl frontier
//!
//! Two FIFO queues drained priority-first: links that look like contact pages
//! are always visited before regular links, and within each class links are
//! visited in the order they were discovered.

use std::collections::VecDeque;
use url::Url;

/// A URL waiting to be visited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// Normalized URL
    pub url: Url,

    /// Link distance from the seed (seeds are depth 0)
    pub depth: u32,
}

impl FrontierEntry {
    pub fn new(url: Url, depth: u32) -> Self {
        Self { url, depth }
    }
}

#[derive(Debug, Default)]
pub struct Frontier {
    priority: VecDeque<FrontierEntry>,
    regular: VecDeque<FrontierEntry>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a seed URL at depth 0
    pub fn seed(&mut self, url: Url) {
        self.regular.push_back(FrontierEntry::new(url, 0));
    }

    pub fn push_priority(&mut self, entry: FrontierEntry) {
        self.priority.push_back(entry);
    }

    pub fn push_regular(&mut self, entry: FrontierEntry) {
        self.regular.push_back(entry);
    }

    /// Removes the next entry, priority queue first
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.priority
            .pop_front()
            .or_else(|| self.regular.pop_front())
    }

    pub fn len(&self) -> usize {
        self.priority.len() + self.regular.len()
    }

    pub fn is_empty(&self) -> bool {
        self.priority.is_empty() && self.regular.is_empty()
    }
}
