//! HTTP cache validation module
//!
//! `ETag` generation and `If-None-Match` checks for static assets.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Quoted `ETag` for the given content, e.g. `"abc123def"`
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("\"{:x}\"", hasher.finish())
}

/// True when the client's `If-None-Match` covers `etag` (list or `*`)
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|header| {
        header
            .split(',')
            .map(str::trim)
            .any(|candidate| candidate == etag || candidate == "*" || weak_eq(candidate, etag))
    })
}

/// Weak comparison: `W/"x"` matches `"x"`
fn weak_eq(candidate: &str, etag: &str) -> bool {
    candidate.strip_prefix("W/") == Some(etag)
}
