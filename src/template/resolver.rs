//! Dotted-path lookup into JSON context values.
//!
//! `a.b.0.c` walks objects by key and arrays by decimal index. Empty segments
//! are skipped. Missing keys, out-of-range indices, non-numeric segments on
//! arrays, descent into scalars and `null` all resolve to absent.

use serde_json::Value;

/// Resolve `path` against `data`.
///
/// # Examples
///
/// ```
/// use pptx_templater::template::resolver::resolve;
/// use serde_json::json;
///
/// let data = json!({"a": {"b": ["x", "y"]}});
/// assert_eq!(resolve(&data, "a.b.1"), Some(&json!("y")));
/// assert_eq!(resolve(&data, "a.c"), None);
/// ```
pub fn resolve<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = data;

    for segment in path.split('.').filter(|s| !s.is_empty()) {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(parse_index(segment)?)?,
            _ => return None,
        };

        if current.is_null() {
            return None;
        }
    }

    Some(current)
}

/// A sequence index: ASCII digits only, no sign.
fn parse_index(segment: &str) -> Option<usize> {
    if !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    atoi_simd::parse::<usize, false, false>(segment.as_bytes()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_nested_lookup() {
        let data = json!({"a": {"b": "X"}, "list": [{"n": 1}, {"n": 2}]});
        assert_eq!(resolve(&data, "a.b"), Some(&json!("X")));
        assert_eq!(resolve(&data, "list.1.n"), Some(&json!(2)));
        assert_eq!(resolve(&data, "a"), Some(&json!({"b": "X"})));
    }

    #[test]
    fn test_empty_segments_ignored() {
        let data = json!({"a": {"b": "X"}});
        assert_eq!(resolve(&data, ".a..b."), Some(&json!("X")));
        assert_eq!(resolve(&data, ""), Some(&data));
    }

    #[test]
    fn test_absent_cases() {
        let data = json!({"a": {"b": null}, "list": [1, 2], "s": "text"});
        assert_eq!(resolve(&data, "missing"), None);
        assert_eq!(resolve(&data, "missing.deeper"), None);
        assert_eq!(resolve(&data, "a.b"), None);
        assert_eq!(resolve(&data, "list.2"), None);
        assert_eq!(resolve(&data, "list.-1"), None);
        assert_eq!(resolve(&data, "list.+1"), None);
        assert_eq!(resolve(&data, "list.first"), None);
        assert_eq!(resolve(&data, "s.0"), None);
    }

    #[test]
    fn test_numeric_keys_on_objects() {
        let data = json!({"2024": {"q1": 10}});
        assert_eq!(resolve(&data, "2024.q1"), Some(&json!(10)));
    }

    proptest! {
        #[test]
        fn prop_present_leaf_resolves(
            keys in proptest::collection::vec("[a-z][a-z0-9_-]{0,8}", 1..5),
            index in 0usize..4,
            leaf in "[ -~]{0,16}",
        ) {
            // Build {k0: {k1: ... [.., leaf, ..]}} and look the leaf up again.
            let mut items = vec![json!(0); index + 1];
            items[index] = json!(leaf.clone());
            let mut value = Value::Array(items);
            for key in keys.iter().rev() {
                value = json!({ key.clone(): value });
            }
            let path = format!("{}.{}", keys.join("."), index);

            prop_assert_eq!(resolve(&value, &path), Some(&json!(leaf)));
        }

        #[test]
        fn prop_missing_key_is_absent(
            key in "[a-z]{1,8}",
            other in "[A-Z]{1,8}",
        ) {
            let data = json!({ key.clone(): {"inner": 1} });
            let missing_path = format!("{}.inner", other);
            let missing_leaf = format!("{}.nope", key);
            prop_assert_eq!(resolve(&data, &missing_path), None);
            prop_assert_eq!(resolve(&data, &missing_leaf), None);
        }
    }
}
