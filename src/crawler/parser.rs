//! HTML parser for fetched pages
//!
//! Produces the document tree used by link discovery and extraction. Structured
//! data blocks are captured first, then `<script>` and `<style>` subtrees are
//! removed so they never leak into page text.

use scraper::{Html, Selector};
use std::sync::LazyLock;

static TITLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("title").expect("Failed to parse title selector - this is a bug")
});
static JSON_LD: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#)
        .expect("Failed to parse JSON-LD selector - this is a bug")
});
static NON_CONTENT: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("script, style").expect("Failed to parse script/style selector - this is a bug")
});

/// A parsed HTML page
///
/// Holds a `scraper::Html`, which is not `Send`; parse, extract and drop it
/// within one crawl step.
#[derive(Debug)]
pub struct ParsedPage {
    /// Document with script and style subtrees removed
    pub document: Html,

    /// Trimmed `<title>` text, empty when absent
    pub title: String,

    /// Whitespace-collapsed text of the whole document
    pub text: String,

    /// Raw bodies of `application/ld+json` blocks, in document order
    pub json_ld: Vec<String>,
}

impl ParsedPage {
    /// Parses HTML content
    ///
    /// # Example
    ///
    /// ```
    /// use contact_sieve::crawler::ParsedPage;
    ///
    /// let page = ParsedPage::parse("<html><head><title>Staff</title></head><body><p>Hi</p></body></html>");
    /// assert_eq!(page.title, "Staff");
    /// ```
    pub fn parse(html: &str) -> Self {
        let mut document = Html::parse_document(html);

        let json_ld = document
            .select(&JSON_LD)
            .map(|element| element.text().collect::<String>())
            .collect();

        strip_non_content(&mut document);

        let title = document
            .select(&TITLE)
            .next()
            .map(|element| collapse_whitespace(element.text()))
            .unwrap_or_default();

        let text = collapse_whitespace(document.root_element().text());

        Self {
            document,
            title,
            text,
            json_ld,
        }
    }
}

/// Detaches every `<script>` and `<style>` subtree from the document
fn strip_non_content(document: &mut Html) {
    let ids: Vec<_> = document.select(&NON_CONTENT).map(|element| element.id()).collect();

    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Joins text nodes with single spaces
///
/// Text nodes are separated so adjacent elements never glue words together
/// (`<b>Jane Doe</b><a>jane@x.org</a>`).
pub(crate) fn collapse_whitespace<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for word in parts.flat_map(str::split_whitespace) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_title() {
        let page =
            ParsedPage::parse("<html><head><title>  Test\n Page  </title></head><body></body></html>");
        assert_eq!(page.title, "Test Page");
    }

    #[test]
    fn test_no_title() {
        let page = ParsedPage::parse("<html><head></head><body><p>x</p></body></html>");
        assert_eq!(page.title, "");
    }

    #[test]
    fn test_script_and_style_removed_from_text() {
        let html = r#"<html><head><style>.a { color: red }</style></head>
            <body><p>Visible</p><script>var hidden = "leak@example.com";</script></body></html>"#;
        let page = ParsedPage::parse(html);
        assert!(page.text.contains("Visible"));
        assert!(!page.text.contains("leak@example.com"));
        assert!(!page.text.contains("color"));
    }

    #[test]
    fn test_json_ld_captured_before_stripping() {
        let html = r#"<html><head>
            <script type="application/ld+json">{"name":"Jane Doe","email":"jane@example.com"}</script>
            </head><body><p>Body</p></body></html>"#;
        let page = ParsedPage::parse(html);
        assert_eq!(page.json_ld.len(), 1);
        assert!(page.json_ld[0].contains("jane@example.com"));
        assert!(!page.text.contains("jane@example.com"));
    }

    #[test]
    fn test_adjacent_elements_do_not_merge() {
        let html = "<html><body><b>Jane Doe</b><a>jane@example.com</a></body></html>";
        let page = ParsedPage::parse(html);
        assert!(page.text.contains("Jane Doe jane@example.com"));
    }

    #[test]
    fn test_collapse_whitespace() {
        let parts = ["  a \n b", "", "\tc  "];
        assert_eq!(collapse_whitespace(parts.into_iter()), "a b c");
    }
}
