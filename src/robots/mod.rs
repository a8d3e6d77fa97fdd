//! Robots.txt handling module
//!
//! This module provides functionality for fetching, parsing, and caching robots.txt files.
//! Fetching fails open: any network error or non-success status yields an
//! allow-all policy and a warning, never a crawl error.

mod cache;
mod parser;

pub use cache::RobotsCache;
pub use parser::ParsedRobots;

use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

/// Fetches and parses robots.txt
///
/// # Arguments
///
/// * `client` - The session's HTTP client
/// * `robots_url` - Location of the robots.txt file
///
/// # Returns
///
/// The parsed policy, or [`ParsedRobots::allow_all`] if it could not be fetched
pub async fn fetch_robots(client: &Client, robots_url: &Url) -> ParsedRobots {
    let response = match client.get(robots_url.as_str()).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!(url = %robots_url, error = %e, "robots.txt unreachable, allowing all");
            return ParsedRobots::allow_all();
        }
    };

    let status = response.status();
    if !status.is_success() {
        warn!(url = %robots_url, status = %status, "robots.txt not available, allowing all");
        return ParsedRobots::allow_all();
    }

    match response.text().await {
        Ok(body) => {
            debug!(url = %robots_url, bytes = body.len(), "Fetched robots.txt");
            ParsedRobots::from_content(&body)
        }
        Err(e) => {
            warn!(url = %robots_url, error = %e, "Failed to read robots.txt body, allowing all");
            ParsedRobots::allow_all()
        }
    }
}

/// Checks if a URL may be fetched
///
/// When robots handling is disabled, returns true without looking at the policy.
pub fn is_allowed(
    robots: Option<&ParsedRobots>,
    url: &Url,
    user_agent: &str,
    respect: bool,
) -> bool {
    if !respect {
        return true;
    }
    robots.map_or(true, |r| r.is_allowed(url.as_str(), user_agent))
}
