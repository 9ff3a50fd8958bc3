//! Deep flattening of nested mappings into a single level keyed by dotted paths

use crate::error::{ReshapeError, Result};
use crate::tree::walker::{Budget, TreeWalker};
use crate::types::{kind_name, FlattenOptions};
use serde_json::{Map, Value};
use tracing::debug;

/// Flatten `input` into a mapping whose keys are dotted key paths.
///
/// Null values are pruned at every level. Arrays are leaves, never indexed
/// into. With `depth_limit: Some(0)` the input is returned unchanged.
///
/// ```rust
/// use reshape::{deep_flatten_object, FlattenOptions};
/// use serde_json::json;
///
/// let input = json!({"a": {"b": 1, "c": {"d": 2}}});
/// let flat = deep_flatten_object(input.as_object().unwrap(), &FlattenOptions::default());
///
/// assert_eq!(serde_json::Value::Object(flat), json!({"a.b": 1, "a.c.d": 2}));
/// ```
pub fn deep_flatten_object(input: &Map<String, Value>, options: &FlattenOptions<'_>) -> Map<String, Value> {
    let budget = match options.depth_limit {
        Some(0) => return input.clone(),
        Some(levels) => Budget::limited(levels - 1),
        None => Budget::unlimited(),
    };

    let mut out = Map::new();
    TreeWalker::from_options(options, budget).walk(input, |path, value| {
        out.insert(path.into_string(), value);
    });

    debug!(entries = input.len(), leaves = out.len(), ?options, "flattened object");
    out
}

/// Flatten any JSON value; `null` flattens like an empty mapping
pub fn flatten_value(input: &Value, options: &FlattenOptions<'_>) -> Result<Map<String, Value>> {
    match input {
        Value::Object(map) => Ok(deep_flatten_object(map, options)),
        Value::Null => Ok(Map::new()),
        other => Err(ReshapeError::NotAMapping {
            found: kind_name(other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flatten(input: Value, options: &FlattenOptions<'_>) -> Value {
        Value::Object(flatten_value(&input, options).unwrap())
    }

    #[test]
    fn test_dotted_paths() {
        let out = flatten(json!({"a": {"b": 1, "c": {"d": 2}}}), &FlattenOptions::default());
        assert_eq!(out, json!({"a.b": 1, "a.c.d": 2}));
    }

    #[test]
    fn test_depth_zero_is_identity() {
        let input = json!({"a": {"b": null, "c": {"d": 2}}, "e": null});
        let out = flatten(input.clone(), &FlattenOptions::new().with_depth_limit(0));
        assert_eq!(out, input);
    }

    #[test]
    fn test_depth_limit_bounds_path_length() {
        let input = json!({"a": {"b": {"c": 1}}, "x": 2});

        let one = flatten(input.clone(), &FlattenOptions::new().with_depth_limit(1));
        assert_eq!(one, json!({"a": {"b": {"c": 1}}, "x": 2}));

        let two = flatten(input.clone(), &FlattenOptions::new().with_depth_limit(2));
        assert_eq!(two, json!({"a.b": {"c": 1}, "x": 2}));

        let deep = flatten(input, &FlattenOptions::new().with_depth_limit(10));
        assert_eq!(deep, json!({"a.b.c": 1, "x": 2}));
    }

    #[test]
    fn test_filter() {
        let options = FlattenOptions::new().with_filter(|key, _| key != "b");
        assert_eq!(flatten(json!({"a": 1, "b": 2}), &options), json!({"a": 1}));
    }

    #[test]
    fn test_filter_applies_at_every_level() {
        let options = FlattenOptions::new().with_filter(|key, _| !key.starts_with('_'));
        let out = flatten(json!({"a": {"_private": 1, "b": 2}, "_top": 3}), &options);
        assert_eq!(out, json!({"a.b": 2}));
    }

    #[test]
    fn test_key_fn_renames_output_only() {
        let options = FlattenOptions::new()
            .with_key_fn(|key, _| key.to_uppercase())
            .with_filter(|key, _| key != "skip");
        let out = flatten(json!({"a": {"b": 1, "skip": 2}}), &options);
        assert_eq!(out, json!({"A.B": 1}));
    }

    #[test]
    fn test_key_fn_can_read_parent() {
        let options = FlattenOptions::new().with_key_fn(|key, parent| {
            if parent.contains_key("kind") {
                format!("{}!", key)
            } else {
                key.to_string()
            }
        });
        let out = flatten(json!({"a": {"kind": "x"}}), &options);
        assert_eq!(out, json!({"a.kind!": "x"}));
    }

    #[test]
    fn test_empty_rename_keeps_key() {
        let options = FlattenOptions::new().with_key_fn(|_, _| String::new());
        assert_eq!(flatten(json!({"a": {"b": 1}}), &options), json!({"a.b": 1}));
    }

    #[test]
    fn test_nulls_are_pruned_even_when_filter_accepts() {
        let options = FlattenOptions::new().with_filter(|_, _| true);
        let out = flatten(json!({"a": null, "b": {"c": null, "d": 1}}), &options);
        assert_eq!(out, json!({"b.d": 1}));
    }

    #[test]
    fn test_arrays_are_leaves() {
        let out = flatten(json!({"a": [{"b": 1}, 2]}), &FlattenOptions::default());
        assert_eq!(out, json!({"a": [{"b": 1}, 2]}));
    }

    #[test]
    fn test_empty_nested_object_vanishes() {
        let out = flatten(json!({"a": {}, "b": 1}), &FlattenOptions::default());
        assert_eq!(out, json!({"b": 1}));
    }

    #[test]
    fn test_parse_strings_as_json() {
        let options = FlattenOptions::new().with_parse_strings_as_json(true);

        assert_eq!(flatten(json!({"a": "[1,2]"}), &options), json!({"a": [1, 2]}));
        assert_eq!(flatten(json!({"a": "not json"}), &options), json!({"a": "not json"}));
        assert_eq!(
            flatten(json!({"a": "{\"b\": {\"c\": true}}"}), &options),
            json!({"a.b.c": true})
        );
    }

    #[test]
    fn test_filter_applies_after_reparse() {
        let options = FlattenOptions::new()
            .with_parse_strings_as_json(true)
            .with_filter(|key, _| key != "a");

        assert_eq!(flatten(json!({"a": "{\"b\":1}", "c": 2}), &options), json!({"a.b": 1, "c": 2}));
        assert_eq!(flatten(json!({"a": "plain", "c": 2}), &options), json!({"c": 2}));
        assert_eq!(flatten(json!({"a": "[1]", "c": 2}), &options), json!({"c": 2}));
    }

    #[test]
    fn test_parsed_null_is_kept() {
        let options = FlattenOptions::new().with_parse_strings_as_json(true);
        assert_eq!(flatten(json!({"a": "null"}), &options), json!({"a": null}));
    }

    #[test]
    fn test_strings_untouched_without_parse_flag() {
        let out = flatten(json!({"a": "[1,2]"}), &FlattenOptions::default());
        assert_eq!(out, json!({"a": "[1,2]"}));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let out = flatten_value(&json!({"z": 1, "m": {"b": 2, "a": 3}, "a": 4}), &FlattenOptions::default())
            .unwrap();
        let keys: Vec<&String> = out.keys().collect();
        assert_eq!(keys, vec!["z", "m.b", "m.a", "a"]);
    }

    #[test]
    fn test_non_mapping_input() {
        assert!(flatten_value(&Value::Null, &FlattenOptions::default()).unwrap().is_empty());
        let err = flatten_value(&json!([1]), &FlattenOptions::default()).unwrap_err();
        assert!(matches!(err, ReshapeError::NotAMapping { found: "array" }));
    }
}
