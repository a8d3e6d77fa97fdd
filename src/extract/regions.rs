//! Contact-region pass
//!
//! Elements whose class or id looks like a contact/staff listing, plus
//! `<address>` and vCard/h-card microformats, are searched on their own text
//! so names are paired with the email inside the same block.

use crate::crawler::parser::collapse_whitespace;
use crate::extract::email::find_emails;
use crate::extract::NameMatcher;
use crate::state::{EmailRecord, RecordSource};
use scraper::{Html, Selector};
use std::sync::LazyLock;

/// Substrings matched against `class` and `id` attributes
pub const REGION_KEYWORDS: &[&str] = &[
    "contact", "staff", "team", "member", "employee", "bio", "profile",
];

static CONTACT_REGION: LazyLock<Selector> = LazyLock::new(|| {
    let mut parts: Vec<String> = REGION_KEYWORDS
        .iter()
        .flat_map(|k| [format!(r#"[class*="{k}"]"#), format!(r#"[id*="{k}"]"#)])
        .collect();
    parts.extend(["address", ".vcard", ".h-card"].map(String::from));

    Selector::parse(&parts.join(", "))
        .expect("Failed to parse contact region selector - this is a bug")
});

/// Extracts records from contact-like regions, in document order
pub fn extract_from_regions(document: &Html, matcher: &dyn NameMatcher) -> Vec<EmailRecord> {
    let mut records = Vec::new();

    for element in document.select(&CONTACT_REGION) {
        let text = collapse_whitespace(element.text());

        for found in find_emails(&text) {
            let name = matcher.find_name(&text, found.span);
            records.push(EmailRecord::new(found.email, name, RecordSource::ContactRegion));
        }
    }

    records
}
