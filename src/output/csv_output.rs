//! Tabular CSV sink: one row per email record

use crate::output::traits::{OutputFormat, OutputResult, ResultSink};
use crate::state::PageResult;
use std::io::Write;
use std::path::Path;

pub const CSV_HEADER: [&str; 5] = ["url", "page_title", "email", "name", "status"];

#[derive(Debug, Default, Clone, Copy)]
pub struct CsvSink;

impl CsvSink {
    /// Writes the header and one row per record to any writer
    pub fn write_to<W: Write>(&self, results: &[PageResult], writer: W) -> OutputResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(CSV_HEADER)?;

        for page in results {
            let status = page.status.to_string();
            for record in &page.records {
                wtr.write_record([
                    page.url.as_str(),
                    page.page_title.as_str(),
                    record.email.as_str(),
                    record.name_str(),
                    status.as_str(),
                ])?;
            }
        }

        wtr.flush()?;
        Ok(())
    }
}

impl ResultSink for CsvSink {
    fn format(&self) -> OutputFormat {
        OutputFormat::Csv
    }

    fn write(&self, results: &[PageResult], path: &Path) -> OutputResult<()> {
        let file = std::fs::File::create(path)?;
        self.write_to(results, file)
    }
}
