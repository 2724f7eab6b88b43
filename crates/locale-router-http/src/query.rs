//! Query string and path-segment encoding.
//!
//! Parsing turns a raw query string into [`Params`], collecting repeated keys
//! into lists. Encoding produces the canonical `key=value&...` form used by
//! generated URLs: every key and value is percent-encoded on its own, and a
//! list is joined with `/` before it is encoded, so `["1", "2"]` becomes the
//! single token `1%2F2`.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use locale_router_core::utils::Params;

/// Characters left untouched when encoding a query key or value.
///
/// Everything except ASCII alphanumerics and `-_.!~*'()` is escaped.
pub const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Characters left untouched when substituting a value into a path segment.
///
/// Like [`COMPONENT`], but the sub-delimiters `;,:@&=+$` stay readable. `/`,
/// `?` and `#` are always escaped so a value never spills into another segment.
pub const PATH_SEGMENT: &AsciiSet = &COMPONENT
    .remove(b';')
    .remove(b',')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$');

/// Characters left untouched in the literal text of a path template.
///
/// Like [`PATH_SEGMENT`], but `/` separates segments and `%` starts an
/// escape the template author already wrote.
pub const PATH_LITERAL: &AsciiSet = &PATH_SEGMENT.remove(b'/').remove(b'%');

/// Percent-encodes a query key or value.
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

/// Percent-encodes a value for use inside one path segment.
pub fn encode_path_segment(input: &str) -> String {
    utf8_percent_encode(input, PATH_SEGMENT).to_string()
}

/// Percent-encodes the literal text of a path template.
pub fn encode_path_literal(input: &str) -> String {
    utf8_percent_encode(input, PATH_LITERAL).to_string()
}

/// Decodes percent sequences. Invalid UTF-8 is replaced rather than rejected.
pub fn decode_component(input: &str) -> String {
    percent_decode_str(input).decode_utf8_lossy().into_owned()
}

/// Decodes a form-encoded query key or value (`+` is a space).
fn decode_form_component(input: &str) -> String {
    decode_component(&input.replace('+', " "))
}

/// Parses a URL query string (without the leading `?`) into [`Params`].
///
/// Repeated keys are collected into [`ParamValue::Many`](locale_router_core::ParamValue::Many)
/// in the order they appear.
///
/// # Examples
///
/// ```
/// use locale_router_http::query::parse_query;
/// use locale_router_core::ParamValue;
///
/// let query = parse_query("b=x&c=c&c=d");
/// assert_eq!(query.get_str("b"), Some("x"));
/// assert_eq!(query.get("c"), Some(&ParamValue::from(vec!["c", "d"])));
/// ```
pub fn parse_query(query_string: &str) -> Params {
    let mut params = Params::new();

    for pair in query_string.split('&') {
        if pair.is_empty() {
            continue;
        }

        let (key, value) = pair
            .find('=')
            .map_or((pair, ""), |eq_pos| (&pair[..eq_pos], &pair[eq_pos + 1..]));

        params.append(decode_form_component(key), decode_form_component(value));
    }

    params
}

/// Encodes params as a query string, in insertion order.
///
/// # Examples
///
/// ```
/// use locale_router_http::query::to_query_string;
/// use locale_router_core::{ParamValue, Params};
///
/// let params = Params::from([
///     ("b", ParamValue::from("b")),
///     ("c", ParamValue::from(vec!["1", "2"])),
/// ]);
/// assert_eq!(to_query_string(&params), "b=b&c=1%2F2");
/// ```
pub fn to_query_string(params: &Params) -> String {
    params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                encode_component(key),
                encode_component(&value.joined("/"))
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use locale_router_core::ParamValue;

    #[test]
    fn test_parse_empty_string() {
        assert!(parse_query("").is_empty());
    }

    #[test]
    fn test_parse_multiple_keys_keeps_order() {
        let query = parse_query("z=1&a=2&m=3");
        let keys: Vec<_> = query.keys().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn test_parse_multiple_values() {
        let query = parse_query("color=red&color=blue&color=green");
        assert_eq!(
            query.get("color"),
            Some(&ParamValue::from(vec!["red", "blue", "green"]))
        );
    }

    #[test]
    fn test_parse_no_value() {
        let query = parse_query("key&other=");
        assert_eq!(query.get_str("key"), Some(""));
        assert_eq!(query.get_str("other"), Some(""));
    }

    #[test]
    fn test_parse_percent_and_plus() {
        let query = parse_query("name=hello%20world&city=New+York&path=1%2F2");
        assert_eq!(query.get_str("name"), Some("hello world"));
        assert_eq!(query.get_str("city"), Some("New York"));
        assert_eq!(query.get_str("path"), Some("1/2"));
    }

    #[test]
    fn test_encode_component_matches_uri_component_rules() {
        assert_eq!(encode_component("a b&c=d/e"), "a%20b%26c%3Dd%2Fe");
        assert_eq!(encode_component("-_.!~*'()"), "-_.!~*'()");
        assert_eq!(encode_component("café"), "caf%C3%A9");
    }

    #[test]
    fn test_encode_path_segment_keeps_sub_delims() {
        assert_eq!(encode_path_segment("a:b@c+d"), "a:b@c+d");
        assert_eq!(encode_path_segment("a/b?c#d"), "a%2Fb%3Fc%23d");
        assert_eq!(encode_path_segment("hello world"), "hello%20world");
    }

    #[test]
    fn test_encode_path_literal_keeps_slashes_and_escapes() {
        assert_eq!(encode_path_literal("/à-propos"), "/%C3%A0-propos");
        assert_eq!(encode_path_literal("/my page/x"), "/my%20page/x");
        assert_eq!(encode_path_literal("/already%20done"), "/already%20done");
    }

    #[test]
    fn test_to_query_string_joins_lists() {
        let params = Params::from([
            ("b", ParamValue::from("b")),
            ("c", ParamValue::from(vec!["1", "2"])),
            ("d", ParamValue::from("d")),
        ]);
        assert_eq!(to_query_string(&params), "b=b&c=1%2F2&d=d");
    }

    #[test]
    fn test_to_query_string_empty() {
        assert_eq!(to_query_string(&Params::new()), "");
    }

    #[test]
    fn test_decode_component_invalid_utf8_is_lossy() {
        assert_eq!(decode_component("%FF"), "\u{FFFD}");
    }
}
