//! Page-tag maps and their deep merge.
//!
//! Page tags are a nested, arbitrary-depth bag of contextual properties.
//! The merge never mutates its inputs: the template built at construction
//! time is shared across every event, and an in-place merge would leak one
//! event's tags into the next.

use serde_json::{Map, Value};

/// Nested page-tag container.
pub type TagMap = Map<String, Value>;

/// Deep-merge `incoming` over `base`, returning a new map.
///
/// Nested objects are combined key-by-key; scalar and array leaves from
/// `incoming` replace the base's. Both inputs are left untouched.
pub fn deep_merge(base: &TagMap, incoming: &TagMap) -> TagMap {
    let mut merged = base.clone();
    for (key, value) in incoming {
        let replacement = match (merged.get(key), value) {
            (Some(Value::Object(existing)), Value::Object(update)) => {
                Value::Object(deep_merge(existing, update))
            }
            _ => value.clone(),
        };
        merged.insert(key.clone(), replacement);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> TagMap {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_incoming_leaf_wins() {
        let base = as_map(json!({"env": "prod", "team": "web"}));
        let incoming = as_map(json!({"env": "test"}));

        let merged = deep_merge(&base, &incoming);
        assert_eq!(merged["env"], json!("test"));
        assert_eq!(merged["team"], json!("web"));
    }

    #[test]
    fn test_nested_objects_combine() {
        let base = as_map(json!({"exp": {"variant": "a", "cohort": 3}}));
        let incoming = as_map(json!({"exp": {"variant": "b"}, "extra": true}));

        let merged = deep_merge(&base, &incoming);
        assert_eq!(merged["exp"]["variant"], json!("b"));
        assert_eq!(merged["exp"]["cohort"], json!(3));
        assert_eq!(merged["extra"], json!(true));
    }

    #[test]
    fn test_array_leaves_replace() {
        let base = as_map(json!({"ids": [1, 2, 3]}));
        let incoming = as_map(json!({"ids": [9]}));

        let merged = deep_merge(&base, &incoming);
        assert_eq!(merged["ids"], json!([9]));
    }

    #[test]
    fn test_merge_does_not_mutate_inputs() {
        let base = as_map(json!({"a": {"x": 1}, "b": 2}));
        let incoming = as_map(json!({"a": {"x": 10, "y": 20}}));
        let base_before = base.clone();
        let incoming_before = incoming.clone();

        let _ = deep_merge(&base, &incoming);
        assert_eq!(base, base_before);
        assert_eq!(incoming, incoming_before);
    }

    #[test]
    fn test_precedence_is_associative() {
        let a = as_map(json!({"k": "a", "only_a": 1}));
        let b = as_map(json!({"k": "b", "only_b": 2}));
        let c = as_map(json!({"k": "c"}));

        let merged = deep_merge(&deep_merge(&a, &b), &c);
        // Any leaf present in C takes C's value regardless of A and B.
        assert_eq!(merged["k"], json!("c"));
        assert_eq!(merged["only_a"], json!(1));
        assert_eq!(merged["only_b"], json!(2));
    }
}
