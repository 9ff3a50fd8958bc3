//! Property reads with a getter fallback
//!
//! A property `name` is read directly first. When that yields nothing
//! truthy, the getter registered as `get<Name>` is consulted instead.

use crate::types::is_truthy;
use crate::util::capitalize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

/// Something that exposes named fields and named getters
pub trait PropertySource {
    fn field(&self, name: &str) -> Option<Value>;

    fn getter(&self, name: &str) -> Option<Value> {
        let _ = name;
        None
    }
}

/// A plain mapping has no methods; a getter name is just another key.
impl PropertySource for Map<String, Value> {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }

    fn getter(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

/// `get` followed by the capitalized property name
pub fn getter_name(property: &str) -> String {
    format!("get{}", capitalize(property))
}

/// Read `name` from `source`, falling back to its `get<Name>` getter when the
/// field is missing or falsy. Returns `None` when neither yields a value.
pub fn read_property<S>(source: &S, name: &str) -> Option<Value>
where
    S: PropertySource + ?Sized,
{
    match source.field(name) {
        Some(value) if is_truthy(&value) => Some(value),
        _ => source.getter(&getter_name(name)),
    }
}

type FieldReader<T> = fn(&T) -> Option<Value>;
type GetterFn<T> = fn(&T) -> Value;

/// Typed lookup table of the fields and getters of `T`
pub struct PropertyTable<T> {
    fields: HashMap<String, FieldReader<T>>,
    getters: HashMap<String, GetterFn<T>>,
}

impl<T> PropertyTable<T> {
    pub fn new() -> Self {
        PropertyTable {
            fields: HashMap::new(),
            getters: HashMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, read: FieldReader<T>) -> Self {
        self.fields.insert(name.into(), read);
        self
    }

    /// Register a getter under its full name, e.g. `getTitle`
    pub fn with_getter(mut self, name: impl Into<String>, get: GetterFn<T>) -> Self {
        self.getters.insert(name.into(), get);
        self
    }

    /// Pair the table with a value so it can be read from
    pub fn bind<'a>(&'a self, target: &'a T) -> Bound<'a, T> {
        Bound { table: self, target }
    }

    pub fn read(&self, target: &T, name: &str) -> Option<Value> {
        read_property(&self.bind(target), name)
    }
}

impl<T> Default for PropertyTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for PropertyTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyTable")
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("getters", &self.getters.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A value paired with its property table
pub struct Bound<'a, T> {
    table: &'a PropertyTable<T>,
    target: &'a T,
}

impl<T> PropertySource for Bound<'_, T> {
    fn field(&self, name: &str) -> Option<Value> {
        self.table.fields.get(name).and_then(|read| read(self.target))
    }

    fn getter(&self, name: &str) -> Option<Value> {
        self.table.getters.get(name).map(|get| get(self.target))
    }
}
