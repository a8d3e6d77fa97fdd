//! Proximity-based name guessing
//!
//! Names are heuristic: a handful of capitalisation shapes searched in a
//! character window around an email address.

use crate::extract::email::email_spans;
use regex::Regex;
use std::cmp::Reverse;
use std::ops::Range;
use std::sync::LazyLock;

/// Finds a personal name for an email occurrence
///
/// `email_span` is the byte range of the address inside `text`. Any closure
/// with the same shape is a `NameMatcher`, so alternative heuristics can be
/// swapped in without touching the crawl loop.
pub trait NameMatcher: Send + Sync {
    fn find_name(&self, text: &str, email_span: Range<usize>) -> Option<String>;
}

impl<F> NameMatcher for F
where
    F: Fn(&str, Range<usize>) -> Option<String> + Send + Sync,
{
    fn find_name(&self, text: &str, email_span: Range<usize>) -> Option<String> {
        self(text, email_span)
    }
}

const NAME_PATTERNS: &[&str] = &[
    // First Last
    r"\b[A-Z][a-z]+\s+[A-Z][a-z]+\b",
    // First M. Last
    r"\b[A-Z][a-z]+\s+[A-Z]\.\s+[A-Z][a-z]+\b",
    // First Middle Last
    r"\b[A-Z][a-z]+\s+[A-Z][a-z]+\s+[A-Z][a-z]+\b",
    // SURNAME First
    r"\b[A-Z]{2,}\s+[A-Z][a-z]+\b",
];

/// Words that mark a capitalised phrase as page furniture rather than a name
const NOISE_WORDS: &[&str] = &[
    "email", "e-mail", "mail", "contact", "phone", "tel", "fax", "address", "office", "website",
    "click", "here", "call", "our", "us", "team", "staff", "support", "department", "directory",
];

static NAME_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    NAME_PATTERNS
        .iter()
        .map(|p| Regex::new(p).expect("Failed to compile name regex - this is a bug"))
        .collect()
});

/// Regex-based [`NameMatcher`] searching ±`window` characters around the email
#[derive(Debug, Clone, Copy)]
pub struct RegexNameMatcher {
    window: usize,
}

impl RegexNameMatcher {
    pub fn new(window: usize) -> Self {
        Self { window }
    }
}

impl Default for RegexNameMatcher {
    fn default() -> Self {
        Self::new(150)
    }
}

impl NameMatcher for RegexNameMatcher {
    fn find_name(&self, text: &str, email_span: Range<usize>) -> Option<String> {
        let window = context_window(text, &email_span, self.window);
        let window = clip_at_other_emails(text, &email_span, window);

        candidates(text, window)
            .into_iter()
            .filter_map(|range| {
                let distance = distance_to(&range, &email_span)?;
                Some((distance, range))
            })
            .filter(|(_, range)| !is_noise(&text[range.clone()]))
            // Nearest first; on a tie prefer text before the email, then the longer name
            .min_by_key(|(distance, range)| {
                (
                    *distance,
                    range.start >= email_span.end,
                    Reverse(range.len()),
                    range.start,
                )
            })
            .map(|(_, range)| collapse(&text[range]))
    }
}

/// Byte range covering `n` characters on each side of `span`, widened to
/// whole words so names at the edge are not cut in half
fn context_window(text: &str, span: &Range<usize>, n: usize) -> Range<usize> {
    let start = text[..span.start]
        .char_indices()
        .rev()
        .take(n)
        .last()
        .map_or(span.start, |(i, _)| i);
    let end = text[span.end..]
        .char_indices()
        .nth(n)
        .map_or(text.len(), |(i, _)| span.end + i);

    let start = text[..start]
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(i, c)| i + c.len_utf8());
    let end = text[end..]
        .find(char::is_whitespace)
        .map_or(text.len(), |i| end + i);

    start..end
}

/// Shrinks the window so it stops at the nearest other address on each side
///
/// A name on the far side of another email belongs to that email.
fn clip_at_other_emails(text: &str, email: &Range<usize>, window: Range<usize>) -> Range<usize> {
    let mut start = window.start;
    let mut end = window.end;

    for other in email_spans(&text[window.clone()]) {
        let other = (window.start + other.start)..(window.start + other.end);
        if other.end <= email.start {
            start = start.max(other.end);
        } else if other.start >= email.end {
            end = end.min(other.start);
        }
    }

    start..end
}

/// Every name-shaped match starting at a capitalised word inside `window`
///
/// Each regex is restarted at every word start, so overlapping candidates
/// are all reported: "Contact Jane Doe" yields "Jane Doe" as well as the
/// noisy "Contact Jane".
fn candidates(text: &str, window: Range<usize>) -> Vec<Range<usize>> {
    let haystack = &text[..window.end];
    let mut prev = text[..window.start].chars().next_back();
    let mut found = Vec::new();

    for (offset, c) in text[window.clone()].char_indices() {
        let pos = window.start + offset;
        if c.is_ascii_uppercase() && !prev.is_some_and(char::is_alphanumeric) {
            found.extend(
                NAME_RES
                    .iter()
                    .filter_map(|re| re.find_at(haystack, pos))
                    .filter(|m| m.start() == pos)
                    .map(|m| m.range()),
            );
        }
        prev = Some(c);
    }

    found
}

/// Gap in bytes between a candidate and the email; `None` if they overlap
fn distance_to(candidate: &Range<usize>, email: &Range<usize>) -> Option<usize> {
    if candidate.end <= email.start {
        Some(email.start - candidate.end)
    } else if candidate.start >= email.end {
        Some(candidate.start - email.end)
    } else {
        None
    }
}

fn is_noise(candidate: &str) -> bool {
    candidate.split_whitespace().any(|word| {
        let word = word.trim_end_matches('.').to_lowercase();
        NOISE_WORDS.contains(&word.as_str())
    })
}

fn collapse(candidate: &str) -> String {
    candidate.split_whitespace().collect::<Vec<_>>().join(" ")
}
