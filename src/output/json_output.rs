//! Structured JSON sink: the page result list with its nesting intact

use crate::output::traits::{OutputFormat, OutputResult, ResultSink};
use crate::state::PageResult;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSink;

impl ResultSink for JsonSink {
    fn format(&self) -> OutputFormat {
        OutputFormat::Json
    }

    fn write(&self, results: &[PageResult], path: &Path) -> OutputResult<()> {
        let mut writer = BufWriter::new(std::fs::File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, results)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}
