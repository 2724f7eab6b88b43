//! Structured decomposition of an incoming request URL.

use serde::Serialize;
use url::Url;

use locale_router_core::utils::Params;

use crate::query;

/// Origin used to resolve origin-relative request targets such as `/en/blog?x=1`.
const LOCAL_ORIGIN: &str = "http://localhost/";

/// A raw URL split into its path, query mapping, and raw search string.
///
/// The matcher computes this once per request and hands it to the host's
/// fallback handler when no route matches, so the host never parses the
/// URL a second time.
///
/// # Examples
///
/// ```
/// use locale_router_http::ParsedUrl;
///
/// let parsed = ParsedUrl::parse("/en/blog/hello?page=2&tag=a&tag=b");
/// assert_eq!(parsed.pathname, "/en/blog/hello");
/// assert_eq!(parsed.search, "?page=2&tag=a&tag=b");
/// assert_eq!(parsed.query.get_str("page"), Some("2"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedUrl {
    /// The URL exactly as received.
    pub href: String,
    /// The percent-encoded path, always starting with `/`.
    pub pathname: String,
    /// The decoded query parameters. Repeated keys become lists.
    pub query: Params,
    /// The query string exactly as received, including the leading `?`, or
    /// empty. Nothing is re-encoded.
    pub search: String,
}

impl ParsedUrl {
    /// Parses an origin-relative or absolute URL.
    ///
    /// Dot segments are resolved and the fragment is dropped. Input the URL
    /// parser rejects is split on `?` and `#` as-is instead.
    pub fn parse(raw: &str) -> Self {
        match Url::parse(LOCAL_ORIGIN).and_then(|base| base.join(raw)) {
            Ok(url) => Self::from_url(raw, &url),
            Err(err) => {
                tracing::debug!(url = raw, error = %err, "URL parser rejected input, splitting raw");
                Self::split(raw)
            }
        }
    }

    /// Returns the path followed by the raw search string.
    pub fn path(&self) -> String {
        format!("{}{}", self.pathname, self.search)
    }

    fn from_url(raw: &str, url: &Url) -> Self {
        let (_, query_string) = split_raw(raw);
        Self {
            href: raw.to_string(),
            pathname: url.path().to_string(),
            query: query::parse_query(query_string),
            search: search_of(query_string),
        }
    }

    fn split(raw: &str) -> Self {
        let (pathname, query_string) = split_raw(raw);
        let pathname = if pathname.starts_with('/') {
            pathname.to_string()
        } else {
            format!("/{pathname}")
        };

        Self {
            href: raw.to_string(),
            pathname,
            query: query::parse_query(query_string),
            search: search_of(query_string),
        }
    }
}

/// Splits a raw URL into the part before `?` and the query string, ignoring
/// any fragment.
fn split_raw(raw: &str) -> (&str, &str) {
    let without_fragment = raw.split_once('#').map_or(raw, |(before, _)| before);
    without_fragment
        .split_once('?')
        .unwrap_or((without_fragment, ""))
}

fn search_of(query_string: &str) -> String {
    if query_string.is_empty() {
        String::new()
    } else {
        format!("?{query_string}")
    }
}
