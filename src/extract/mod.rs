//! Email/name extraction pipeline
//!
//! Three passes over a parsed page, merged in order with first-wins
//! de-duplication by lower-cased email:
//!
//! 1. structured data (`application/ld+json`)
//! 2. contact-like DOM regions with a proximity name search
//! 3. the remaining emails in the full page text, same name search
//!
//! A record from an earlier pass is kept even when a later pass would have
//! found a name for the same address.

mod email;
mod names;
mod regions;
mod structured;

pub use email::{find_emails, normalize_email, EmailMatch};
pub use names::{NameMatcher, RegexNameMatcher};
pub use regions::extract_from_regions;
pub use structured::extract_structured;

use crate::config::ExtractionConfig;
use crate::crawler::ParsedPage;
use crate::state::{EmailRecord, RecordSource};
use std::collections::HashSet;

/// Runs the extraction passes with a pluggable name heuristic
pub struct Extractor {
    matcher: Box<dyn NameMatcher>,
}

impl Extractor {
    pub fn new(matcher: impl NameMatcher + 'static) -> Self {
        Self {
            matcher: Box::new(matcher),
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(RegexNameMatcher::new(config.context_window))
    }

    /// Extracts deduplicated records from a page
    pub fn extract(&self, page: &ParsedPage) -> Vec<EmailRecord> {
        let mut merged = RecordSet::default();

        for record in extract_structured(&page.json_ld) {
            merged.push(record);
        }

        for record in extract_from_regions(&page.document, self.matcher.as_ref()) {
            merged.push(record);
        }

        for found in find_emails(&page.text) {
            if merged.contains(&found.email) {
                continue;
            }
            let name = self.matcher.find_name(&page.text, found.span);
            merged.push(EmailRecord::new(found.email, name, RecordSource::PageText));
        }

        merged.into_records()
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }
}

impl std::fmt::Debug for Extractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extractor").finish_non_exhaustive()
    }
}

/// Ordered records, unique by email; the first record for an email wins
#[derive(Debug, Default)]
struct RecordSet {
    seen: HashSet<String>,
    records: Vec<EmailRecord>,
}

impl RecordSet {
    fn push(&mut self, record: EmailRecord) -> bool {
        if !self.seen.insert(record.email.clone()) {
            return false;
        }
        self.records.push(record);
        true
    }

    fn contains(&self, email: &str) -> bool {
        self.seen.contains(email)
    }

    fn into_records(self) -> Vec<EmailRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ops::Range;

    fn extract(html: &str) -> Vec<EmailRecord> {
        Extractor::default().extract(&ParsedPage::parse(html))
    }

    fn pairs(records: &[EmailRecord]) -> Vec<(&str, &str)> {
        records.iter().map(|r| (r.email.as_str(), r.name_str())).collect()
    }

    #[test]
    fn test_contact_region_then_page_text() {
        let html = r#"<html><body>
                <div class="contact">Jane Doe jane.doe@example.com</div>
                <p>unrelated text random@spam.test</p>
            </body></html>"#;
        let records = extract(html);

        assert_eq!(
            pairs(&records),
            vec![("jane.doe@example.com", "Jane Doe"), ("random@spam.test", "")]
        );
        assert_eq!(records[0].source, RecordSource::ContactRegion);
        assert_eq!(records[1].source, RecordSource::PageText);
    }

    #[test]
    fn test_contact_block_with_label() {
        let html = r#"<html><body>
            <div class="staff-card">Contact Jane Doe jane@example.com</div>
            <div class="staff-card">Email John Smith js@example.com</div>
            </body></html>"#;
        assert_eq!(
            pairs(&extract(html)),
            vec![("jane@example.com", "Jane Doe"), ("js@example.com", "John Smith")]
        );
    }

    #[test]
    fn test_structured_data_takes_precedence() {
        let html = r#"<html><head>
            <script type="application/ld+json">{"email":"jane@example.com","name":"Jane Doe"}</script>
            </head><body>
            <div class="staff">Mark Twain jane@example.com</div>
            <p>mail jane@example.com</p>
            </body></html>"#;
        let records = extract(html);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name.as_deref(), Some("Jane Doe"));
        assert_eq!(records[0].source, RecordSource::StructuredData);
    }

    #[test]
    fn test_first_record_kept_even_without_name() {
        let html = r#"<html><body>
            <div class="contact">write to press@example.com</div>
            <p>Press Officer Sam Carter press@example.com</p>
            </body></html>"#;
        let records = extract(html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, None);
    }

    #[test]
    fn test_json_ld_case_handling() {
        let html = r#"<html><head><script type="application/ld+json">
            {"email":"Info@Example.com","name":"Support Team"}
            </script></head><body></body></html>"#;
        assert_eq!(pairs(&extract(html)), vec![("info@example.com", "Support Team")]);
    }

    #[test]
    fn test_no_duplicate_emails_across_case() {
        let html = r#"<html><body>
            <div class="member">Ann Lee ANN@example.com</div>
            <div class="member">Ann Lee ann@EXAMPLE.com</div>
            <p>ann@example.com</p>
            </body></html>"#;
        let records = extract(html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].email, "ann@example.com");
    }

    #[test]
    fn test_script_emails_ignored() {
        let html = r#"<html><body><script>var a = "hidden@example.com";</script><p>none</p></body></html>"#;
        assert!(extract(html).is_empty());
    }

    #[test]
    fn test_custom_matcher() {
        let extractor = Extractor::new(|_: &str, _: Range<usize>| Some("Anon Person".to_string()));
        let records = extractor.extract(&ParsedPage::parse("<p>x@example.com</p>"));
        assert_eq!(pairs(&records), vec![("x@example.com", "Anon Person")]);
    }
}
