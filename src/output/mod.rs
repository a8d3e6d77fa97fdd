//! Output module for writing scrape results and summaries
//!
//! This module handles:
//! - Writing page results through a [`ResultSink`] (CSV, JSON or SQLite)
//! - Computing and printing the run summary

mod csv_output;
mod json_output;
mod sqlite_output;
pub mod stats;
mod traits;

pub use csv_output::{CsvSink, CSV_HEADER};
pub use json_output::JsonSink;
pub use sqlite_output::{SqliteSink, SCHEMA_SQL};
pub use stats::{format_summary, print_summary, CrawlSummary, SummaryReport};
pub use traits::{OutputError, OutputFormat, OutputResult, ResultSink};

use crate::state::PageResult;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Run metadata recorded by sinks that keep it
#[derive(Debug, Clone)]
pub struct RunInfo {
    pub started_at: DateTime<Utc>,
    pub config_hash: Option<String>,
}

/// Builds the sink for `format`
pub fn sink_for(format: OutputFormat, run: &RunInfo) -> Box<dyn ResultSink> {
    match format {
        OutputFormat::Csv => Box::new(CsvSink),
        OutputFormat::Json => Box::new(JsonSink),
        OutputFormat::Sqlite => Box::new(SqliteSink::new(run.started_at, run.config_hash.clone())),
    }
}

/// Path of the result file: `<filename>.<ext>` inside `dir`
pub fn output_path(dir: &Path, filename: &str, format: OutputFormat) -> PathBuf {
    dir.join(format!("{}.{}", filename, format.extension()))
}

/// Writes all results in `format` and returns the path written
///
/// # Arguments
///
/// * `dir` - Directory the result file is created in
/// * `filename` - Base name without extension
/// * `format` - Output format
/// * `results` - Page results in visit order
/// * `run` - Run metadata
pub fn write_results(
    dir: &Path,
    filename: &str,
    format: OutputFormat,
    results: &[PageResult],
    run: &RunInfo,
) -> OutputResult<PathBuf> {
    if filename.trim().is_empty() {
        return Err(OutputError::Write("output filename is empty".to_string()));
    }

    let path = output_path(dir, filename, format);
    sink_for(format, run).write(results, &path)?;

    tracing::info!(
        path = %path.display(),
        pages = results.len(),
        "Results written"
    );
    Ok(path)
}
