//! Recursive merge of JSON values.

use serde_json::Value;

/// Merge `source` into `target`.
///
/// - two arrays: concatenation, `target` items first;
/// - two objects: keys of both, recursing where a key exists in both;
/// - anything else: `source` wins (including `null`).
///
/// An array merged with an object is a kind mismatch, so the object wins. The
/// JavaScript helper this mirrors would instead spread the array's indices
/// into object keys ("0", "1", ...) and merge those.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Array(mut left), Value::Array(right)) => {
            left.extend(right);
            Value::Array(left)
        }
        (Value::Object(mut merged), Value::Object(right)) => {
            for (key, value) in right {
                let combined = match merged.remove(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value,
                };
                merged.insert(key, combined);
            }
            Value::Object(merged)
        }
        (_, source) => source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_objects() {
        let target = json!({"a": 1, "nested": {"x": 1, "y": 2}, "keep": true});
        let source = json!({"a": 2, "nested": {"y": 3, "z": 4}, "new": "v"});
        assert_eq!(
            deep_merge(target, source),
            json!({"a": 2, "nested": {"x": 1, "y": 3, "z": 4}, "keep": true, "new": "v"})
        );
    }

    #[test]
    fn test_arrays_concatenate() {
        assert_eq!(deep_merge(json!([1, 2]), json!([2, 3])), json!([1, 2, 2, 3]));
        assert_eq!(
            deep_merge(json!({"tags": ["a"]}), json!({"tags": ["b"]})),
            json!({"tags": ["a", "b"]})
        );
    }

    #[test]
    fn test_scalars_and_mismatches_take_source() {
        assert_eq!(deep_merge(json!(1), json!("x")), json!("x"));
        assert_eq!(deep_merge(json!({"a": 1}), json!(null)), json!(null));
        assert_eq!(deep_merge(json!([1]), json!({"a": 1})), json!({"a": 1}));
        assert_eq!(deep_merge(json!({"0": 1}), json!([2])), json!([2]));
        assert_eq!(deep_merge(json!({"a": {"b": 1}}), json!({"a": 5})), json!({"a": 5}));
    }

    #[test]
    fn test_inputs_are_independent() {
        let source = json!({"list": [1]});
        let merged = deep_merge(json!({}), source.clone());
        assert_eq!(merged, source);
    }
}
