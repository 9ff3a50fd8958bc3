use serde_json::{Map, Value};
use std::fmt;

/// Renames a key segment; receives the original key and its parent mapping
pub type KeyFn<'a> = Box<dyn Fn(&str, &Map<String, Value>) -> String + 'a>;

/// Decides whether a leaf entry is kept; receives the original key and its parent mapping
pub type FilterFn<'a> = Box<dyn Fn(&str, &Map<String, Value>) -> bool + 'a>;

/// The key a callback is invoked with: a mapping key or a sequence index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key<'a> {
    Name(&'a str),
    Index(usize),
}

impl Key<'_> {
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Name(name) => Some(*name),
            Key::Index(_) => None,
        }
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            Key::Name(_) => None,
            Key::Index(idx) => Some(*idx),
        }
    }
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => f.write_str(name),
            Key::Index(idx) => write!(f, "{}", idx),
        }
    }
}

impl PartialEq<&str> for Key<'_> {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, Key::Name(name) if name == other)
    }
}

/// Outcome of a transformer callback for one entry
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Copy the original key/value pair verbatim
    Keep,
    /// Replace the entry with a new key/value pair
    Rename(String, Value),
    /// Omit the entry
    Drop,
    /// Keep the key, use a new value
    Replace(Value),
}

impl Decision {
    pub fn rename(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Decision::Rename(key.into(), value.into())
    }

    pub fn replace(value: impl Into<Value>) -> Self {
        Decision::Replace(value.into())
    }

    /// Interpret a loosely shaped callback result.
    ///
    /// Precedence:
    /// - `true` keeps the entry
    /// - a two element array `[key, value]` renames it
    /// - `false` or no value drops it
    /// - anything else (`null` and arrays of any other length included)
    ///   replaces the value under the original key
    ///
    /// Non-string rename keys are rendered as compact JSON text, so an object
    /// or array key becomes its JSON form (`{"k":1}`), not `[object Object]`.
    pub fn from_shape(shape: Option<Value>) -> Self {
        match shape {
            Some(Value::Bool(true)) => Decision::Keep,
            Some(Value::Array(mut arr)) if arr.len() == 2 => {
                let value = arr.pop().unwrap_or(Value::Null);
                let key = match arr.pop() {
                    Some(Value::String(s)) => s,
                    Some(other) => other.to_string(),
                    None => String::new(),
                };
                Decision::Rename(key, value)
            }
            Some(Value::Bool(false)) | None => Decision::Drop,
            Some(other) => Decision::Replace(other),
        }
    }
}

impl From<bool> for Decision {
    fn from(keep: bool) -> Self {
        if keep {
            Decision::Keep
        } else {
            Decision::Drop
        }
    }
}

impl From<Option<Value>> for Decision {
    fn from(shape: Option<Value>) -> Self {
        Decision::from_shape(shape)
    }
}

/// Configuration for deep flattening
#[derive(Default)]
pub struct FlattenOptions<'a> {
    /// Maximum number of key segments in an output path (`Some(0)` = return input unchanged,
    /// `None` = unlimited)
    pub depth_limit: Option<usize>,

    /// Rewrites each key segment before it is joined into the output path
    pub key_fn: Option<KeyFn<'a>>,

    /// Leaf entries for which this returns false are omitted
    pub filter: Option<FilterFn<'a>>,

    /// Whether string values are opportunistically parsed as JSON
    pub parse_strings_as_json: bool,
}

impl<'a> FlattenOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_depth_limit(mut self, depth: usize) -> Self {
        self.depth_limit = Some(depth);
        self
    }

    pub fn with_key_fn(mut self, key_fn: impl Fn(&str, &Map<String, Value>) -> String + 'a) -> Self {
        self.key_fn = Some(Box::new(key_fn));
        self
    }

    pub fn with_filter(mut self, filter: impl Fn(&str, &Map<String, Value>) -> bool + 'a) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    pub fn with_parse_strings_as_json(mut self, parse: bool) -> Self {
        self.parse_strings_as_json = parse;
        self
    }
}

impl fmt::Debug for FlattenOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlattenOptions")
            .field("depth_limit", &self.depth_limit)
            .field("key_fn", &self.key_fn.is_some())
            .field("filter", &self.filter.is_some())
            .field("parse_strings_as_json", &self.parse_strings_as_json)
            .finish()
    }
}

/// Configuration for deep transformation
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Whether array values are projected element by element
    pub transform_arrays: bool,

    /// Nesting levels to recurse into before nested mappings are treated as leaves
    /// (`None` = unlimited)
    pub max_depth: Option<usize>,
}

impl Default for TransformOptions {
    fn default() -> Self {
        TransformOptions {
            transform_arrays: true,
            max_depth: None,
        }
    }
}

impl TransformOptions {
    pub fn with_transform_arrays(mut self, transform_arrays: bool) -> Self {
        self.transform_arrays = transform_arrays;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

/// Loose truthiness: `null`, `false`, zero and `""` are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Name of a value's JSON kind, for error messages and traces
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shape_precedence() {
        assert_eq!(Decision::from_shape(Some(json!(true))), Decision::Keep);
        assert_eq!(Decision::from_shape(Some(json!(false))), Decision::Drop);
        assert_eq!(Decision::from_shape(None), Decision::Drop);
        assert_eq!(
            Decision::from_shape(Some(json!(["b", 2]))),
            Decision::Rename("b".to_string(), json!(2))
        );
        assert_eq!(Decision::from_shape(Some(json!(null))), Decision::Replace(json!(null)));
        assert_eq!(Decision::from_shape(Some(json!(0))), Decision::Replace(json!(0)));
    }

    #[test]
    fn test_odd_length_arrays_replace() {
        assert_eq!(
            Decision::from_shape(Some(json!([1, 2, 3]))),
            Decision::Replace(json!([1, 2, 3]))
        );
        assert_eq!(Decision::from_shape(Some(json!(["x"]))), Decision::Replace(json!(["x"])));
    }

    #[test]
    fn test_rename_key_rendering() {
        assert_eq!(
            Decision::from_shape(Some(json!([7, "v"]))),
            Decision::Rename("7".to_string(), json!("v"))
        );
        assert_eq!(
            Decision::from_shape(Some(json!([{"k": 1}, 2]))),
            Decision::Rename(r#"{"k":1}"#.to_string(), json!(2))
        );
    }

    #[test]
    fn test_key_display() {
        assert_eq!(Key::Name("a").to_string(), "a");
        assert_eq!(Key::Index(3).to_string(), "3");
        assert!(Key::Name("a") == "a");
        assert!(Key::Index(0) != "0");
    }

    #[test]
    fn test_truthiness() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&falsy), "{} should be falsy", falsy);
        }
        for truthy in [json!(true), json!(-1), json!("0"), json!([]), json!({})] {
            assert!(is_truthy(&truthy), "{} should be truthy", truthy);
        }
    }

    #[test]
    fn test_default_options() {
        let options = FlattenOptions::default();
        assert!(options.depth_limit.is_none());
        assert!(!options.parse_strings_as_json);

        let transform = TransformOptions::default();
        assert!(transform.transform_arrays);
        assert!(transform.max_depth.is_none());
    }
}
