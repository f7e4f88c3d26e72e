//! Canonical map merging.
//!
//! Gateway events carry the same logical map twice: a single-value view and
//! a multi-value view, either of which may be missing. The canonical form
//! has lowercase keys, one value per key, and treats the multi-value view as
//! authoritative — its **last** element wins over whatever the single-value
//! view said. Used identically for headers and for query parameters.

use std::collections::HashMap;

use crate::error::Error;

/// Merges the two views of one logical map into its canonical form.
///
/// Single-value entries are written first, multi-value entries second, so
/// the multi-value view wins regardless of input ordering. Returns a new
/// map each call; neither input is touched.
///
/// An empty multi-value list violates the event contract and is rejected
/// with [`Error::EmptyMultiValue`] rather than silently indexed.
pub(crate) fn merge_single_and_multi(
    single: Option<&HashMap<String, String>>,
    multi: Option<&HashMap<String, Vec<String>>>,
) -> Result<HashMap<String, String>, Error> {
    let mut merged = HashMap::new();
    for (key, value) in single.into_iter().flatten() {
        merged.insert(key.to_ascii_lowercase(), value.clone());
    }
    for (key, values) in multi.into_iter().flatten() {
        let last = values.last().ok_or_else(|| Error::EmptyMultiValue(key.clone()))?;
        merged.insert(key.to_ascii_lowercase(), last.clone());
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn multi(pairs: &[(&str, &[&str])]) -> HashMap<String, Vec<String>> {
        pairs
            .iter()
            .map(|(k, vs)| (k.to_string(), vs.iter().map(|v| v.to_string()).collect()))
            .collect()
    }

    #[test]
    fn keys_are_lowercased_and_unique() {
        let merged = merge_single_and_multi(
            Some(&single(&[("Content-Type", "text/plain"), ("X-Thing", "a")])),
            Some(&multi(&[("CONTENT-TYPE", &["application/json"])])),
        )
        .unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged["content-type"], "application/json");
        assert_eq!(merged["x-thing"], "a");
    }

    #[test]
    fn multi_value_last_element_wins() {
        let merged = merge_single_and_multi(
            Some(&single(&[("accept", "text/html")])),
            Some(&multi(&[("Accept", &["text/html", "application/json"])])),
        )
        .unwrap();
        assert_eq!(merged["accept"], "application/json");
    }

    #[test]
    fn absent_views_merge_to_empty() {
        assert!(merge_single_and_multi(None, None).unwrap().is_empty());
    }

    #[test]
    fn single_view_alone_survives() {
        let merged = merge_single_and_multi(Some(&single(&[("Host", "example.com")])), None).unwrap();
        assert_eq!(merged["host"], "example.com");
    }

    #[test]
    fn empty_multi_value_list_is_rejected() {
        let err = merge_single_and_multi(None, Some(&multi(&[("x-bad", &[])]))).unwrap_err();
        assert!(err.to_string().contains("x-bad"));
    }
}
