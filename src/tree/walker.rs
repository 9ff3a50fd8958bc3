//! Depth-first traversal shared by the flattener
//!
//! The walker visits every entry of a mapping in key order, threads a
//! decrementing depth budget and a dotted key path, and hands each accepted
//! leaf to a sink. Nested mappings are descended into until the budget runs
//! out; everything else (arrays included) is a leaf.

use crate::types::FlattenOptions;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;
use tracing::trace;

/// Strings that could start a JSON text. Anything else is known to fail parsing.
static JSON_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*(?:[\[{"]|-?\d|true\b|false\b|null\b)"#).unwrap()
});

type KeyFnRef<'w> = &'w dyn Fn(&str, &Map<String, Value>) -> String;
type FilterFnRef<'w> = &'w dyn Fn(&str, &Map<String, Value>) -> bool;

/// Remaining depth a traversal may descend; `None` is unlimited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Budget(Option<usize>);

impl Budget {
    pub fn unlimited() -> Self {
        Budget(None)
    }

    pub fn limited(levels: usize) -> Self {
        Budget(Some(levels))
    }

    pub fn is_exhausted(&self) -> bool {
        self.0 == Some(0)
    }

    /// Budget for the next nesting level
    pub fn descend(self) -> Self {
        Budget(self.0.map(|n| n.saturating_sub(1)))
    }
}

impl From<Option<usize>> for Budget {
    fn from(levels: Option<usize>) -> Self {
        Budget(levels)
    }
}

/// Location of a node from the root: an ordered list of key segments,
/// rendered by joining them with `.`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    pub fn root() -> Self {
        KeyPath(Vec::new())
    }

    pub fn child(&self, segment: &str) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend(self.0.iter().cloned());
        segments.push(segment.to_string());
        KeyPath(segments)
    }

    /// Segments as given, dots inside a key included
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Dot-joined rendering
    pub fn into_string(self) -> String {
        self.to_string()
    }
}

/// An empty prefix gets no separator
impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote_any = false;
        for segment in &self.0 {
            if wrote_any {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
            wrote_any |= !segment.is_empty();
        }
        Ok(())
    }
}

impl Serialize for KeyPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Try to read a string as JSON, keeping the original on failure
pub fn reparse_json(value: &Value) -> Cow<'_, Value> {
    match value {
        Value::String(s) if JSON_PREFIX.is_match(s) => match serde_json::from_str::<Value>(s) {
            Ok(parsed) => Cow::Owned(parsed),
            Err(e) => {
                trace!(error = %e, "string is not JSON, keeping it");
                Cow::Borrowed(value)
            }
        },
        _ => Cow::Borrowed(value),
    }
}

/// Depth-first walker over nested mappings
#[derive(Clone, Copy, Default)]
pub struct TreeWalker<'w> {
    budget: Budget,
    key_fn: Option<KeyFnRef<'w>>,
    filter: Option<FilterFnRef<'w>>,
    parse_strings_as_json: bool,
}

impl<'w> TreeWalker<'w> {
    pub fn new(budget: Budget) -> Self {
        TreeWalker {
            budget,
            ..Default::default()
        }
    }

    /// Build a walker that honours the callbacks and flags of `options`
    pub fn from_options(options: &'w FlattenOptions<'_>, budget: Budget) -> Self {
        TreeWalker {
            budget,
            key_fn: options.key_fn.as_deref(),
            filter: options.filter.as_deref(),
            parse_strings_as_json: options.parse_strings_as_json,
        }
    }

    pub fn with_key_fn(mut self, key_fn: KeyFnRef<'w>) -> Self {
        self.key_fn = Some(key_fn);
        self
    }

    pub fn with_filter(mut self, filter: FilterFnRef<'w>) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_parse_strings_as_json(mut self, parse: bool) -> Self {
        self.parse_strings_as_json = parse;
        self
    }

    /// Visit every leaf of `map`, calling `sink` with its key path and value
    pub fn walk<F>(&self, map: &Map<String, Value>, mut sink: F)
    where
        F: FnMut(KeyPath, Value),
    {
        self.walk_level(map, &KeyPath::root(), self.budget, &mut sink);
    }

    fn walk_level<F>(&self, map: &Map<String, Value>, prefix: &KeyPath, budget: Budget, sink: &mut F)
    where
        F: FnMut(KeyPath, Value),
    {
        for (key, value) in map.iter() {
            let path = prefix.child(&self.segment_for(key.as_str(), map));

            if value.is_null() {
                trace!(path = %path, "skipping null entry");
                continue;
            }

            let value = if self.parse_strings_as_json {
                reparse_json(value)
            } else {
                Cow::Borrowed(value)
            };

            if let Value::Object(child) = value.as_ref() {
                if !budget.is_exhausted() {
                    self.walk_level(child, &path, budget.descend(), sink);
                    continue;
                }
            }

            if self.filter.map_or(true, |filter| filter(key.as_str(), map)) {
                sink(path, value.into_owned());
            } else {
                trace!(path = %path, "entry rejected by filter");
            }
        }
    }

    /// Output segment for `key`; an empty rename falls back to the original key
    fn segment_for<'k>(&self, key: &'k str, parent: &Map<String, Value>) -> Cow<'k, str> {
        match self.key_fn {
            Some(key_fn) => {
                let renamed = key_fn(key, parent);
                if renamed.is_empty() {
                    Cow::Borrowed(key)
                } else {
                    Cow::Owned(renamed)
                }
            }
            None => Cow::Borrowed(key),
        }
    }
}
