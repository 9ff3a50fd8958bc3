use serde_json::{Map, Value};

/// Recursively merge `source` into `target`.
///
/// Object values merge into whatever object `target` holds under the same key
/// (a non-object there is replaced by a fresh mapping first). Arrays, scalars
/// and nulls from `source` overwrite.
pub fn deep_extend(target: &mut Map<String, Value>, source: &Map<String, Value>) {
    for (key, value) in source.iter() {
        match value {
            Value::Object(nested) => {
                let slot = target
                    .entry(key.clone())
                    .or_insert_with(|| Value::Object(Map::new()));
                if !slot.is_object() {
                    *slot = Value::Object(Map::new());
                }
                if let Value::Object(slot) = slot {
                    deep_extend(slot, nested);
                }
            }
            _ => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}
