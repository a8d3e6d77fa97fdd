use url::Url;

/// Returns the origin of a URL as `scheme://host[:port]`
///
/// Seeds and discovered links are grouped by this key: one domain crawl,
/// one robots.txt entry per origin.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use contact_sieve::url::origin_key;
///
/// let url = Url::parse("https://Example.com/path").unwrap();
/// assert_eq!(origin_key(&url), "https://example.com");
///
/// let url = Url::parse("http://127.0.0.1:8080/team").unwrap();
/// assert_eq!(origin_key(&url), "http://127.0.0.1:8080");
/// ```
pub fn origin_key(url: &Url) -> String {
    url.origin().ascii_serialization()
}

/// Returns true if both URLs share scheme, host and port
pub fn same_origin(a: &Url, b: &Url) -> bool {
    a.origin() == b.origin()
}

/// Location of the robots.txt file governing `url`
pub fn robots_url(url: &Url) -> Option<Url> {
    url.join("/robots.txt").ok()
}
