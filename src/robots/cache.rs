//! Process-wide robots.txt cache
//!
//! One entry per origin; entries never expire within a session, so each
//! origin's robots.txt is requested at most once per run.

use crate::robots::ParsedRobots;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct RobotsCache {
    entries: HashMap<String, ParsedRobots>,
}

impl RobotsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached policy for an origin, if one was stored
    pub fn get(&self, origin: &str) -> Option<&ParsedRobots> {
        self.entries.get(origin)
    }

    /// Stores the policy for an origin; an existing entry is kept
    pub fn insert(&mut self, origin: impl Into<String>, robots: ParsedRobots) -> &ParsedRobots {
        self.entries.entry(origin.into()).or_insert(robots)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
