//! Configuration module for Contact-Sieve
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so a run without any file uses [`Config::default`].
//!
//! # Example
//!
//! ```no_run
//! use contact_sieve::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sieve.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, ExtractionConfig, OutputConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
