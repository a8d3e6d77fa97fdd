use serde::{Serialize, Serializer};
use std::fmt;

/// Outcome of a single fetch attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStatus {
    Success,
    /// Fetch failed; carries the status code or network reason
    Error(String),
}

impl PageStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Error(reason) => write!(f, "error: {}", reason),
        }
    }
}

impl Serialize for PageStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Extraction pass that produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordSource {
    /// `application/ld+json` blocks
    StructuredData,
    /// Elements that look like contact or staff listings
    ContactRegion,
    /// Anywhere else in the page text
    PageText,
}

impl RecordSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StructuredData => "structured-data",
            Self::ContactRegion => "contact-region",
            Self::PageText => "page-text",
        }
    }
}

/// An email address found on a page, with the name guessed for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailRecord {
    /// Lower-cased address; unique within its page
    pub email: String,

    #[serde(serialize_with = "name_or_empty")]
    pub name: Option<String>,

    #[serde(skip)]
    pub source: RecordSource,
}

impl EmailRecord {
    pub fn new(email: impl Into<String>, name: Option<String>, source: RecordSource) -> Self {
        Self {
            email: email.into(),
            name: name.filter(|n| !n.is_empty()),
            source,
        }
    }

    /// Name for display and tabular output; empty when none was found
    pub fn name_str(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

fn name_or_empty<S: Serializer>(name: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(name.as_deref().unwrap_or(""))
}

/// Result of one fetch attempt, handed to the result sink unchanged
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResult {
    pub url: String,
    pub page_title: String,
    pub status: PageStatus,
    pub records: Vec<EmailRecord>,
}

impl PageResult {
    pub fn success(url: impl Into<String>, page_title: String, records: Vec<EmailRecord>) -> Self {
        Self {
            url: url.into(),
            page_title,
            status: PageStatus::Success,
            records,
        }
    }

    /// A failed fetch: no title, no records
    pub fn failure(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            page_title: String::new(),
            status: PageStatus::Error(reason.into()),
            records: Vec::new(),
        }
    }

    pub fn emails_found(&self) -> usize {
        self.records.len()
    }
}
