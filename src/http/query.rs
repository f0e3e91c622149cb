//! Request target decoding module
//!
//! Percent-decoding for path segments and `application/x-www-form-urlencoded`
//! query strings.

use percent_encoding::percent_decode_str;

/// Decode a single path segment (`Chess%20Club` -> `Chess Club`)
///
/// Returns `None` when the decoded bytes are not valid UTF-8.
pub fn decode_path_segment(segment: &str) -> Option<String> {
    percent_decode_str(segment)
        .decode_utf8()
        .ok()
        .map(|s| s.into_owned())
}

/// Decode a query component, where `+` encodes a space
fn decode_component(value: &str) -> Option<String> {
    decode_path_segment(&value.replace('+', " "))
}

/// First value of `name` in the query string, decoded
///
/// A bare key (`?email`) yields an empty string.
pub fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    query?
        .split('&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if decode_component(key)? == name {
                decode_component(value)
            } else {
                None
            }
        })
}

/// Match `/{prefix}/{name}/{suffix}` and return the decoded `{name}`
///
/// The name must be a single, non-empty path segment.
pub fn match_resource<'a>(path: &'a str, prefix: &str, suffix: &str) -> Option<&'a str> {
    let name = path.strip_prefix(prefix)?.strip_suffix(suffix)?;
    if name.is_empty() || name.contains('/') {
        return None;
    }
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_path_segment() {
        assert_eq!(decode_path_segment("Chess%20Club").as_deref(), Some("Chess Club"));
        assert_eq!(decode_path_segment("Chess Club").as_deref(), Some("Chess Club"));
        assert_eq!(decode_path_segment("a+b").as_deref(), Some("a+b"));
        assert_eq!(decode_path_segment("%FF"), None);
    }

    #[test]
    fn test_query_param() {
        let q = Some("email=michael%40mergington.edu&x=1");
        assert_eq!(query_param(q, "email").as_deref(), Some("michael@mergington.edu"));
        assert_eq!(query_param(q, "x").as_deref(), Some("1"));
        assert_eq!(query_param(q, "y"), None);
        assert_eq!(query_param(None, "email"), None);
    }

    #[test]
    fn test_query_param_form_encoding() {
        assert_eq!(
            query_param(Some("email=first+last%2Btag%40x.edu"), "email").as_deref(),
            Some("first last+tag@x.edu")
        );
        assert_eq!(query_param(Some("email"), "email").as_deref(), Some(""));
        assert_eq!(
            query_param(Some("email=a@x.edu&email=b@x.edu"), "email").as_deref(),
            Some("a@x.edu")
        );
    }

    #[test]
    fn test_match_resource() {
        let path = "/activities/Chess%20Club/signup";
        assert_eq!(match_resource(path, "/activities/", "/signup"), Some("Chess%20Club"));
        assert_eq!(match_resource("/activities//signup", "/activities/", "/signup"), None);
        assert_eq!(match_resource("/activities/a/b/signup", "/activities/", "/signup"), None);
        assert_eq!(match_resource("/activities", "/activities/", "/signup"), None);
    }
}
