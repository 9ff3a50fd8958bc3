//! Projection of a collection's entries into a filtered array

use crate::types::Key;
use serde_json::Value;
use std::convert::Infallible;

/// Whether a projected output is appended: everything except no value,
/// `null`, `false` and the empty string. Zero is always kept.
pub fn is_kept(output: &Option<Value>) -> bool {
    match output {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Map an array's elements (or an object's values) through `projector`,
/// collecting the outputs that pass [`is_kept`]. Scalars project to nothing.
pub fn transform_as_array<F>(input: &Value, mut projector: F) -> Vec<Value>
where
    F: FnMut(&Value, Key<'_>) -> Option<Value>,
{
    match try_transform_as_array(input, |value, key| Ok::<_, Infallible>(projector(value, key))) {
        Ok(out) => out,
        Err(never) => match never {},
    }
}

/// Fallible [`transform_as_array`]; the first error stops the projection and is returned as is
pub fn try_transform_as_array<F, E>(input: &Value, mut projector: F) -> Result<Vec<Value>, E>
where
    F: FnMut(&Value, Key<'_>) -> Result<Option<Value>, E>,
{
    let mut out = Vec::new();

    match input {
        Value::Array(items) => {
            for (idx, item) in items.iter().enumerate() {
                push_kept(&mut out, projector(item, Key::Index(idx))?);
            }
        }
        Value::Object(map) => {
            for (key, value) in map.iter() {
                push_kept(&mut out, projector(value, Key::Name(key.as_str()))?);
            }
        }
        _ => {}
    }

    Ok(out)
}

fn push_kept(out: &mut Vec<Value>, output: Option<Value>) {
    if is_kept(&output) {
        out.extend(output);
    }
}
