//! SQLite export
//!
//! Each run appends one row to `runs`, one row per page to `pages` and one
//! row per email record to `contacts`, inside a single transaction.

use crate::output::traits::{OutputFormat, OutputResult, ResultSink};
use crate::state::PageResult;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::Path;

/// SQL schema for the export database
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS runs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    started_at TEXT NOT NULL,
    finished_at TEXT NOT NULL,
    config_hash TEXT,
    pages INTEGER NOT NULL,
    emails INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS pages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    run_id INTEGER NOT NULL REFERENCES runs(id),
    position INTEGER NOT NULL,
    url TEXT NOT NULL,
    page_title TEXT NOT NULL,
    status TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_pages_run ON pages(run_id);

CREATE TABLE IF NOT EXISTS contacts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    page_id INTEGER NOT NULL REFERENCES pages(id),
    position INTEGER NOT NULL,
    email TEXT NOT NULL,
    name TEXT NOT NULL,
    source TEXT NOT NULL,
    UNIQUE(page_id, email)
);

CREATE INDEX IF NOT EXISTS idx_contacts_email ON contacts(email);
"#;

#[derive(Debug, Clone)]
pub struct SqliteSink {
    started_at: DateTime<Utc>,
    config_hash: Option<String>,
}

impl SqliteSink {
    pub fn new(started_at: DateTime<Utc>, config_hash: Option<String>) -> Self {
        Self {
            started_at,
            config_hash,
        }
    }

    /// Writes one run into an open connection, returning the run id
    pub fn write_to(&self, conn: &mut Connection, results: &[PageResult]) -> OutputResult<i64> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA_SQL)?;

        let total_emails: usize = results.iter().map(PageResult::emails_found).sum();
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO runs (started_at, finished_at, config_hash, pages, emails)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                self.started_at.to_rfc3339(),
                Utc::now().to_rfc3339(),
                self.config_hash,
                results.len() as i64,
                total_emails as i64
            ],
        )?;
        let run_id = tx.last_insert_rowid();

        for (position, page) in results.iter().enumerate() {
            tx.execute(
                "INSERT INTO pages (run_id, position, url, page_title, status)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    run_id,
                    position as i64,
                    page.url,
                    page.page_title,
                    page.status.to_string()
                ],
            )?;
            let page_id = tx.last_insert_rowid();

            for (record_position, record) in page.records.iter().enumerate() {
                tx.execute(
                    "INSERT INTO contacts (page_id, position, email, name, source)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        page_id,
                        record_position as i64,
                        record.email,
                        record.name_str(),
                        record.source.as_str()
                    ],
                )?;
            }
        }

        tx.commit()?;
        Ok(run_id)
    }
}

impl Default for SqliteSink {
    fn default() -> Self {
        Self::new(Utc::now(), None)
    }
}

impl ResultSink for SqliteSink {
    fn format(&self) -> OutputFormat {
        OutputFormat::Sqlite
    }

    fn write(&self, results: &[PageResult], path: &Path) -> OutputResult<()> {
        let mut conn = Connection::open(path)?;
        self.write_to(&mut conn, results)?;
        Ok(())
    }
}
