use crate::{UrlError, UrlResult};
use url::Url;

/// Exact-match tracking query parameters removed during normalization
const TRACKING_PARAMS: &[&str] = &["fbclid", "gclid"];

/// Href prefixes that never point at a fetchable page
const NON_FETCHABLE_PREFIXES: &[&str] = &["mailto:", "tel:", "javascript:", "data:"];

/// Resolves a possibly-relative href against the page it was found on and
/// normalizes the result
///
/// # Normalization Steps
///
/// 1. Reject pure-fragment links and `mailto:`/`tel:`/`javascript:`/`data:` hrefs
/// 2. Resolve against `base`; reject anything that does not parse
/// 3. Reject schemes other than HTTP and HTTPS
/// 4. Lowercase the host (done by the `url` parser)
/// 5. Collapse repeated slashes, drop trailing slash, empty path becomes `/`
/// 6. Remove the fragment
/// 7. Remove tracking query parameters (`utm_*`, `fbclid`, `gclid`),
///    keeping the order of the remaining ones
/// 8. Remove an empty query string
///
/// # Examples
///
/// ```
/// use url::Url;
/// use contact_sieve::url::normalize_href;
///
/// let base = Url::parse("https://Example.com/team/").unwrap();
/// let url = normalize_href("../contact/?utm_source=x#form", &base).unwrap();
/// assert_eq!(url.as_str(), "https://example.com/contact");
/// ```
pub fn normalize_href(href: &str, base: &Url) -> UrlResult<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return Err(UrlError::NotFetchable(href.to_string()));
    }

    let lower = href.to_ascii_lowercase();
    if NON_FETCHABLE_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        return Err(UrlError::NotFetchable(href.to_string()));
    }

    let url = base
        .join(href)
        .map_err(|e| UrlError::Parse(format!("{}: {}", href, e)))?;

    canonicalize(url)
}

/// Normalizes an absolute URL string
///
/// Applies the same rules as [`normalize_href`]. Normalization is idempotent:
/// feeding the output back in yields the same URL.
///
/// ```
/// use contact_sieve::url::normalize_url;
///
/// let url = normalize_url("https://EXAMPLE.COM/Staff/?fbclid=abc").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/Staff");
/// ```
pub fn normalize_url(url_str: &str) -> UrlResult<Url> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;
    canonicalize(url)
}

fn canonicalize(mut url: Url) -> UrlResult<Url> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingDomain);
    }

    let path = normalize_path(url.path());
    url.set_path(&path);
    url.set_fragment(None);
    strip_tracking_params(&mut url);

    Ok(url)
}

/// Collapses repeated slashes and removes the trailing slash
///
/// Dot segments are already resolved by the `url` parser.
fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

/// Removes tracking parameters while preserving the order of the rest
fn strip_tracking_params(url: &mut Url) {
    let Some(query) = url.query() else {
        return;
    };

    if query.is_empty() {
        url.set_query(None);
        return;
    }

    let has_tracking = url.query_pairs().any(|(key, _)| is_tracking_param(&key));
    if !has_tracking {
        return;
    }

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !is_tracking_param(key))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }
}

fn is_tracking_param(key: &str) -> bool {
    key.starts_with("utm_") || TRACKING_PARAMS.contains(&key)
}
