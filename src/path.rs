//! Request-target reconstruction.
//!
//! Gateway events deliver the path and the query separately; handlers expect
//! one request target. The path is percent-encoded just enough to be a valid
//! target again (spaces and delimiters — `/` and existing `%xx` sequences
//! pass through untouched, no re-normalization), and the canonical query map
//! is rendered behind a `?` in `key=value&key2=value2` form.

use std::collections::HashMap;

use percent_encoding::{AsciiSet, CONTROLS, NON_ALPHANUMERIC, utf8_percent_encode};

/// Escaped in the path portion of the target.
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'#');

/// Escaped in query keys and values: everything but ASCII alphanumerics and
/// the unreserved marks `- _ . ! ~ * ' ( )`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Renders `path` plus `query` as a single request target.
///
/// An empty query map contributes nothing, not even the `?`. Pairs are
/// sorted by key so equal inputs always produce equal targets.
pub(crate) fn path_and_query(path: &str, query: &HashMap<String, String>) -> String {
    let mut target: String = utf8_percent_encode(path, PATH).collect();
    if query.is_empty() {
        return target;
    }
    let mut pairs: Vec<(&String, &String)> = query.iter().collect();
    pairs.sort();
    for (i, (key, value)) in pairs.into_iter().enumerate() {
        target.push(if i == 0 { '?' } else { '&' });
        target.extend(utf8_percent_encode(key, QUERY_COMPONENT));
        target.push('=');
        target.extend(utf8_percent_encode(value, QUERY_COMPONENT));
    }
    target
}
