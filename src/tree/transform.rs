//! Key/value transformation of mappings under per-entry decisions
//!
//! `transform_object` runs a transformer over the top level only.
//! `deep_transform_object` recurses: nested mappings are always descended into
//! (the transformer is never asked about them), arrays are projected element
//! by element, and only leaves reach the transformer.

use crate::tree::project::try_transform_as_array;
use crate::tree::walker::Budget;
use crate::types::{Decision, Key, TransformOptions};
use serde_json::{Map, Value};
use std::convert::Infallible;
use tracing::{debug, trace};

fn into_ok<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// Shallow transform: the transformer receives `(value, key, index)` for each
/// entry and decides what happens to it.
///
/// ```rust
/// use reshape::{transform_object, Decision};
/// use serde_json::json;
///
/// let input = json!({"a": 1, "b": 2, "c": 3});
/// let out = transform_object(input.as_object().unwrap(), |value, key, _| match key.as_name() {
///     Some("a") => Decision::Keep,
///     Some("b") => Decision::rename("bee", value.clone()),
///     _ => Decision::Drop,
/// });
///
/// assert_eq!(serde_json::Value::Object(out), json!({"a": 1, "bee": 2}));
/// ```
pub fn transform_object<F>(input: &Map<String, Value>, mut transformer: F) -> Map<String, Value>
where
    F: FnMut(&Value, Key<'_>, usize) -> Decision,
{
    into_ok(try_transform_object(input, |value, key, idx| {
        Ok(transformer(value, key, idx))
    }))
}

/// Fallible [`transform_object`]; the first transformer error is returned unchanged
pub fn try_transform_object<F, E>(input: &Map<String, Value>, mut transformer: F) -> Result<Map<String, Value>, E>
where
    F: FnMut(&Value, Key<'_>, usize) -> Result<Decision, E>,
{
    let mut out = Map::new();

    for (idx, (key, value)) in input.iter().enumerate() {
        match transformer(value, Key::Name(key.as_str()), idx)? {
            Decision::Keep => {
                out.insert(key.clone(), value.clone());
            }
            Decision::Rename(new_key, new_value) => {
                out.insert(new_key, new_value);
            }
            Decision::Drop => {
                trace!(key = %key, "entry dropped");
            }
            Decision::Replace(new_value) => {
                out.insert(key.clone(), new_value);
            }
        }
    }

    Ok(out)
}

/// Deep transform with arrays projected and no depth limit
pub fn deep_transform_object<F>(input: &Map<String, Value>, transformer: F) -> Map<String, Value>
where
    F: FnMut(&Value, Key<'_>, usize) -> Decision,
{
    deep_transform_object_with(input, &TransformOptions::default(), transformer)
}

pub fn deep_transform_object_with<F>(
    input: &Map<String, Value>,
    options: &TransformOptions,
    mut transformer: F,
) -> Map<String, Value>
where
    F: FnMut(&Value, Key<'_>, usize) -> Decision,
{
    into_ok(try_deep_transform_object_with(input, options, |value, key, idx| {
        Ok(transformer(value, key, idx))
    }))
}

pub fn try_deep_transform_object<F, E>(input: &Map<String, Value>, transformer: F) -> Result<Map<String, Value>, E>
where
    F: FnMut(&Value, Key<'_>, usize) -> Result<Decision, E>,
{
    try_deep_transform_object_with(input, &TransformOptions::default(), transformer)
}

/// Fallible deep transform. Errors raised by the transformer at any depth
/// abort the whole traversal and are returned unchanged.
pub fn try_deep_transform_object_with<F, E>(
    input: &Map<String, Value>,
    options: &TransformOptions,
    mut transformer: F,
) -> Result<Map<String, Value>, E>
where
    F: FnMut(&Value, Key<'_>, usize) -> Result<Decision, E>,
{
    debug!(entries = input.len(), ?options, "deep transform");
    transform_level(input, options, Budget::from(options.max_depth), &mut transformer)
}

fn transform_level<F, E>(
    input: &Map<String, Value>,
    options: &TransformOptions,
    budget: Budget,
    transformer: &mut F,
) -> Result<Map<String, Value>, E>
where
    F: FnMut(&Value, Key<'_>, usize) -> Result<Decision, E>,
{
    try_transform_object(input, |value, key, idx| match value {
        Value::Object(child) if !budget.is_exhausted() => {
            let nested = transform_level(child, options, budget.descend(), &mut *transformer)?;
            Ok(Decision::Replace(Value::Object(nested)))
        }
        Value::Array(_) if options.transform_arrays => {
            let projected = project_elements(value, options, budget, &mut *transformer)?;
            Ok(Decision::Rename(key.to_string(), Value::Array(projected)))
        }
        _ => transformer(value, key, idx),
    })
}

/// Array elements: mappings recurse, everything else goes through the transformer.
/// `Keep` yields the original element, a rename yields the `[key, value]` pair itself.
fn project_elements<F, E>(
    array: &Value,
    options: &TransformOptions,
    budget: Budget,
    transformer: &mut F,
) -> Result<Vec<Value>, E>
where
    F: FnMut(&Value, Key<'_>, usize) -> Result<Decision, E>,
{
    try_transform_as_array(array, |element, key| match element {
        Value::Object(child) if !budget.is_exhausted() => {
            let nested = transform_level(child, options, budget.descend(), &mut *transformer)?;
            Ok(Some(Value::Object(nested)))
        }
        _ => {
            let idx = key.as_index().unwrap_or_default();
            let output = match transformer(element, key, idx)? {
                Decision::Keep => Some(element.clone()),
                Decision::Rename(new_key, new_value) => Some(Value::Array(vec![Value::String(new_key), new_value])),
                Decision::Drop => None,
                Decision::Replace(new_value) => Some(new_value),
            };
            Ok(output)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_keep_is_identity() {
        let input = obj(json!({"a": 1, "b": {"c": [1, 2]}, "d": null}));
        assert_eq!(transform_object(&input, |_, _, _| Decision::Keep), input);
    }

    #[test]
    fn test_drop_empties() {
        let input = obj(json!({"a": 1, "b": 2}));
        assert!(transform_object(&input, |_, _, _| Decision::Drop).is_empty());
    }

    #[test]
    fn test_rename() {
        let input = obj(json!({"k1": 1, "other": 2}));
        let out = transform_object(&input, |value, key, _| {
            if key == "k1" {
                Decision::rename("k2", "v2")
            } else {
                Decision::Replace(value.clone())
            }
        });
        assert_eq!(Value::Object(out), json!({"k2": "v2", "other": 2}));
    }

    #[test]
    fn test_indices_follow_key_order() {
        let input = obj(json!({"x": 0, "y": 0, "z": 0}));
        let out = transform_object(&input, |_, _, idx| Decision::replace(idx));
        assert_eq!(Value::Object(out), json!({"x": 0, "y": 1, "z": 2}));
    }

    #[test]
    fn test_shapes_through_transformer() {
        let input = obj(json!({"a": 1, "b": 2, "c": 3, "d": 4}));
        let out = transform_object(&input, |value, key, _| {
            Decision::from_shape(match key.as_name() {
                Some("a") => Some(json!(true)),
                Some("b") => Some(json!(["bb", value])),
                Some("c") => None,
                _ => Some(json!([1, 2, 3])),
            })
        });
        assert_eq!(Value::Object(out), json!({"a": 1, "bb": 2, "d": [1, 2, 3]}));
    }

    #[test]
    fn test_deep_transform_into_arrays() {
        let input = obj(json!({"a": [{"b": 1}, {"b": 2}]}));
        let out = deep_transform_object(&input, |value, key, _| {
            if key == "b" {
                Decision::replace(value.as_i64().unwrap_or_default() * 10)
            } else {
                Decision::Keep
            }
        });
        assert_eq!(Value::Object(out), json!({"a": [{"b": 10}, {"b": 20}]}));
    }

    #[test]
    fn test_deep_never_asks_about_mappings() {
        let input = obj(json!({"a": {"b": {"c": 1}}, "d": 2}));
        let mut asked = Vec::new();
        let out = deep_transform_object(&input, |_, key, _| {
            asked.push(key.to_string());
            Decision::Drop
        });
        assert_eq!(asked, vec!["c", "d"]);
        // nested mappings survive even when all their leaves are dropped
        assert_eq!(Value::Object(out), json!({"a": {"b": {}}}));
    }

    #[test]
    fn test_array_elements_follow_keep_filter() {
        let input = obj(json!({"xs": [1, 2, 3, 0, "drop", [9]]}));
        let out = deep_transform_object(&input, |value, key, _| match value {
            Value::Number(_) if key == Key::Index(1) => Decision::Drop,
            Value::Number(n) if n.as_i64() == Some(3) => Decision::Replace(json!(false)),
            Value::String(_) => Decision::rename("k", "v"),
            _ => Decision::Keep,
        });
        assert_eq!(Value::Object(out), json!({"xs": [1, 0, ["k", "v"], [9]]}));
    }

    #[test]
    fn test_arrays_opaque_when_disabled() {
        let input = obj(json!({"a": [{"b": 1}], "c": 2}));
        let options = TransformOptions::default().with_transform_arrays(false);
        let mut seen_array = false;
        let out = deep_transform_object_with(&input, &options, |value, _, _| {
            seen_array |= value.is_array();
            Decision::Keep
        });
        assert!(seen_array);
        assert_eq!(Value::Object(out), json!({"a": [{"b": 1}], "c": 2}));
    }

    #[test]
    fn test_max_depth_hands_mappings_to_transformer() {
        let input = obj(json!({"a": {"b": {"c": 1}}}));
        let options = TransformOptions::default().with_max_depth(1);
        let out = deep_transform_object_with(&input, &options, |value, key, _| {
            assert_eq!(key, Key::Name("b"));
            assert!(value.is_object());
            Decision::replace("cut")
        });
        assert_eq!(Value::Object(out), json!({"a": {"b": "cut"}}));
    }

    #[test]
    fn test_deep_errors_propagate() {
        let input = obj(json!({"a": {"b": 1}, "c": 2}));
        let mut calls = 0;
        let result = try_deep_transform_object(&input, |_, key, _| {
            calls += 1;
            Err(format!("refused {}", key))
        });
        assert_eq!(result.unwrap_err(), "refused b");
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_null_leaves_reach_transformer() {
        let input = obj(json!({"a": null}));
        let out = deep_transform_object(&input, |value, _, _| {
            if value.is_null() {
                Decision::replace(0)
            } else {
                Decision::Keep
            }
        });
        assert_eq!(Value::Object(out), json!({"a": 0}));
    }
}
