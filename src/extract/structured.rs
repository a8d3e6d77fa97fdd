//! Structured data pass
//!
//! Reads `application/ld+json` blocks and emits every object that carries
//! both an `email` and a `name`. No proximity search is involved.

use crate::extract::email::normalize_email;
use crate::state::{EmailRecord, RecordSource};
use serde_json::Value;
use tracing::debug;

/// Extracts (email, name) pairs from raw JSON-LD block bodies
///
/// Objects are found anywhere in the document: at the top level, inside
/// arrays, under `@graph`, or nested in other objects (an organisation's
/// `employee` list, for example). Blocks that fail to parse are skipped.
pub fn extract_structured(blocks: &[String]) -> Vec<EmailRecord> {
    let mut records = Vec::new();

    for block in blocks {
        match serde_json::from_str::<Value>(block.trim()) {
            Ok(value) => collect(&value, &mut records),
            Err(e) => debug!(error = %e, "Skipping malformed JSON-LD block"),
        }
    }

    records
}

fn collect(value: &Value, records: &mut Vec<EmailRecord>) {
    match value {
        Value::Object(map) => {
            if let (Some(email), Some(name)) = (
                map.get("email").and_then(Value::as_str),
                map.get("name").and_then(Value::as_str),
            ) {
                if let Some(email) = normalize_email(email) {
                    let name = name.trim();
                    records.push(EmailRecord::new(
                        email,
                        Some(name.to_string()),
                        RecordSource::StructuredData,
                    ));
                }
            }

            for child in map.values() {
                collect(child, records);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect(item, records);
            }
        }
        _ => {}
    }
}
