//! Small helpers around the tree engine: key/value pairs, capitalization,
//! property lookup with getter fallback, type names, composition and
//! error-swallowing wrappers.

pub mod property;
pub mod type_name;
pub mod mixin;
pub mod try_catch;

pub use property::{getter_name, read_property, Bound, PropertySource, PropertyTable};
pub use type_name::{get_type_name, get_type_name_of, TypeName};
pub use mixin::Mixin;
pub use try_catch::with_try_catch;

use serde_json::{Map, Value};

/// A mapping holding exactly one entry
pub fn pair(key: impl Into<String>, value: impl Into<Value>) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(key.into(), value.into());
    map
}

/// Uppercase the first character, leaving the rest untouched
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
