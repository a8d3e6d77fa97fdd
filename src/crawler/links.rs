//! Link discovery
//!
//! Collects same-origin, fetchable links from a parsed page and splits them
//! into priority links (pages likely to list people) and regular links.

use crate::url::{normalize_href, same_origin};
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::trace;
use url::Url;

/// Path keywords that mark a link as likely to hold contact details
pub const PRIORITY_KEYWORDS: &[&str] = &[
    "contact",
    "about",
    "team",
    "staff",
    "directory",
    "people",
    "faculty",
    "employees",
    "management",
];

static ANCHOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("a[href]").expect("Failed to parse anchor selector - this is a bug")
});

/// Links discovered on one page, deduplicated, in document order
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LinkSet {
    pub priority: Vec<Url>,
    pub regular: Vec<Url>,
}

impl LinkSet {
    pub fn len(&self) -> usize {
        self.priority.len() + self.regular.len()
    }

    pub fn is_empty(&self) -> bool {
        self.priority.is_empty() && self.regular.is_empty()
    }
}

/// Extracts links from a document
///
/// # Arguments
///
/// * `document` - The parsed page
/// * `base_url` - The page's final URL; relative links resolve against it
///   and links to any other origin are dropped
pub fn extract_links(document: &Html, base_url: &Url) -> LinkSet {
    let mut seen = HashSet::new();
    let mut links = LinkSet::default();

    for element in document.select(&ANCHOR) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let url = match normalize_href(href, base_url) {
            Ok(url) => url,
            Err(e) => {
                trace!(href, error = %e, "Discarding link");
                continue;
            }
        };

        if !same_origin(&url, base_url) || !seen.insert(url.as_str().to_string()) {
            continue;
        }

        if is_priority(&url) {
            links.priority.push(url);
        } else {
            links.regular.push(url);
        }
    }

    links
}

/// Returns true if the normalized URL contains a priority keyword
///
/// The whole URL is matched, host included, so every link on a host such as
/// `team.example.com` is a priority link.
pub fn is_priority(url: &Url) -> bool {
    let target = url.as_str().to_lowercase();
    PRIORITY_KEYWORDS.iter().any(|keyword| target.contains(keyword))
}
