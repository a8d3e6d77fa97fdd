//! Email address matching

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// `local-part@domain.tld`: local part of letters, digits and `._%+-`,
/// domain of letters, digits, `.` and `-`, alphabetic TLD of 2+ letters
const EMAIL_PATTERN: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(EMAIL_PATTERN).expect("Failed to compile email regex - this is a bug")
});

static EXACT_EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{}$", EMAIL_PATTERN))
        .expect("Failed to compile exact email regex - this is a bug")
});

/// An email occurrence in a piece of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMatch {
    /// Lower-cased address
    pub email: String,
    /// Byte span of the original occurrence
    pub span: Range<usize>,
}

/// Finds every email in `text`, in order of appearance
///
/// Repeated addresses are reported once, at their first occurrence.
pub fn find_emails(text: &str) -> Vec<EmailMatch> {
    let mut found: Vec<EmailMatch> = Vec::new();

    for m in EMAIL_RE.find_iter(text) {
        let email = m.as_str().to_lowercase();
        if found.iter().any(|f| f.email == email) {
            continue;
        }
        found.push(EmailMatch {
            email,
            span: m.range(),
        });
    }

    found
}

/// Byte spans of every email-shaped token in `text`, repeats included
pub(crate) fn email_spans(text: &str) -> impl Iterator<Item = Range<usize>> + '_ {
    EMAIL_RE.find_iter(text).map(|m| m.range())
}

/// Normalizes a candidate address from structured data
///
/// Strips a `mailto:` prefix and any query, lower-cases, and returns `None`
/// if the result is not a well-formed address.
pub fn normalize_email(raw: &str) -> Option<String> {
    let mut email = raw.trim();
    if email
        .get(..7)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("mailto:"))
    {
        email = &email[7..];
    }
    let email = email.split('?').next().unwrap_or("").trim();

    EXACT_EMAIL_RE
        .is_match(email)
        .then(|| email.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_emails_lowercases() {
        let text = "Write to Jane.Doe@Example.COM today";
        let found = find_emails(text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].email, "jane.doe@example.com");
        assert_eq!(&text[found[0].span.clone()], "Jane.Doe@Example.COM");
    }

    #[test]
    fn test_find_emails_order_and_first_occurrence() {
        let text = "b@example.org then a@example.org then B@EXAMPLE.ORG";
        let found = find_emails(text);
        let emails: Vec<&str> = found.iter().map(|m| m.email.as_str()).collect();
        assert_eq!(emails, vec!["b@example.org", "a@example.org"]);
        assert_eq!(found[0].span.start, 0);
    }

    #[test]
    fn test_local_part_characters() {
        let found = find_emails("x first.last+tag_1%ops-team@mail.example.co.uk y");
        assert_eq!(found[0].email, "first.last+tag_1%ops-team@mail.example.co.uk");
    }

    #[test]
    fn test_rejects_short_or_numeric_tld() {
        assert!(find_emails("user@example.c").is_empty());
        assert!(find_emails("user@192.168.0.1").is_empty());
        assert!(find_emails("no at sign here").is_empty());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email("Info@Example.com"),
            Some("info@example.com".to_string())
        );
        assert_eq!(
            normalize_email(" MAILTO:Sales@Example.com?subject=Hi "),
            Some("sales@example.com".to_string())
        );
        assert_eq!(normalize_email("not an email"), None);
        assert_eq!(normalize_email("two@example.com three@example.com"), None);
        assert_eq!(normalize_email(""), None);
    }
}
