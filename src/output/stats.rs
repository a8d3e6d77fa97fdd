//! Run summary computed from the page results

use crate::state::PageResult;
use std::fmt;

/// Records listed per page in the console report
const RECORDS_PER_PAGE: usize = 5;

/// Totals over one run's page results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Pages attempted, successful or not
    pub pages: usize,
    pub successful_pages: usize,
    pub failed_pages: usize,
    pub total_emails: usize,
    /// Records that carry a name
    pub emails_with_names: usize,
}

impl CrawlSummary {
    pub fn from_results(results: &[PageResult]) -> Self {
        let mut summary = Self {
            pages: results.len(),
            ..Self::default()
        };

        for page in results {
            if page.status.is_success() {
                summary.successful_pages += 1;
            } else {
                summary.failed_pages += 1;
            }
            summary.total_emails += page.emails_found();
            summary.emails_with_names += page.records.iter().filter(|r| r.name.is_some()).count();
        }

        summary
    }
}

/// Console report: totals, then up to five records per page
#[derive(Debug, Clone, Copy)]
pub struct SummaryReport<'a>(pub &'a [PageResult]);

impl fmt::Display for SummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let results = self.0;
        let summary = CrawlSummary::from_results(results);

        writeln!(f, "=== SCRAPING SUMMARY ===")?;
        writeln!(f, "Pages processed: {}", summary.pages)?;
        writeln!(f, "Successful pages: {}", summary.successful_pages)?;
        writeln!(f, "Total emails found: {}", summary.total_emails)?;
        writeln!(f, "Emails with names: {}", summary.emails_with_names)?;

        for page in results {
            writeln!(
                f,
                "\n{}: {} emails ({})",
                page.url,
                page.emails_found(),
                page.status
            )?;
            for record in page.records.iter().take(RECORDS_PER_PAGE) {
                match &record.name {
                    Some(name) => writeln!(f, "  {} - {}", record.email, name)?,
                    None => writeln!(f, "  {}", record.email)?,
                }
            }
            if page.records.len() > RECORDS_PER_PAGE {
                writeln!(f, "  ... and {} more", page.records.len() - RECORDS_PER_PAGE)?;
            }
        }

        Ok(())
    }
}

/// Renders the console report as a string
pub fn format_summary(results: &[PageResult]) -> String {
    SummaryReport(results).to_string()
}

/// Prints the console report to stdout
pub fn print_summary(results: &[PageResult]) {
    println!();
    print!("{}", SummaryReport(results));
}
