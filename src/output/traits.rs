//! Result sink trait and error types

use crate::state::PageResult;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Serialization format of the result file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One row per email record
    #[default]
    Csv,
    /// The full page result list
    Json,
    /// `runs`, `pages` and `contacts` tables
    Sqlite,
}

impl OutputFormat {
    /// File extension appended to the configured filename
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Sqlite => "sqlite",
        }
    }
}

/// Consumer of the ordered page results of a run
///
/// Sinks write every record they are given, in order; an empty result list
/// still produces a valid, empty file.
pub trait ResultSink {
    fn format(&self) -> OutputFormat;

    /// Writes all results to `path`
    fn write(&self, results: &[PageResult], path: &Path) -> OutputResult<()>;
}
