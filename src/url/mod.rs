//! URL handling module for Contact-Sieve
//!
//! This module provides href resolution and normalization, which is the sole
//! deduplication key for the crawl frontier, plus origin helpers used to keep
//! a crawl on its own domain.

mod domain;
mod normalize;

pub use domain::{origin_key, robots_url, same_origin};
pub use normalize::{normalize_href, normalize_url};
