//! # Reshape - nested JSON object graph toolkit
//!
//! Generic operations over arbitrary nested `serde_json` values: flattening a
//! tree into a single level keyed by dotted paths, recursively transforming
//! keys and values under caller-supplied decisions, and projecting a
//! collection's entries into a filtered array.
//!
//! ## Modules
//!
//! - **tree**: the traversal engine (flatten, transform, project, extend)
//! - **util**: property lookup with getter fallback, type names, composition helpers
//! - **events**: logger and event-emitter capabilities
//!
//! ## Quick Start
//!
//! ### Flattening
//!
//! ```rust
//! use reshape::{deep_flatten_object, FlattenOptions};
//! use serde_json::json;
//!
//! let data = json!({
//!     "id": 1,
//!     "author": {"name": "Alice", "meta": "{\"karma\": 12}"},
//!     "draft": null
//! });
//!
//! let options = FlattenOptions::new()
//!     .with_parse_strings_as_json(true)
//!     .with_filter(|key, _| key != "id");
//! let flat = deep_flatten_object(data.as_object().unwrap(), &options);
//!
//! assert_eq!(
//!     serde_json::Value::Object(flat),
//!     json!({"author.name": "Alice", "author.meta.karma": 12})
//! );
//! ```
//!
//! ### Deep transformation
//!
//! ```rust
//! use reshape::{deep_transform_object, Decision};
//! use serde_json::json;
//!
//! let data = json!({"posts": [{"views": 1}, {"views": 2}], "secret": "x"});
//!
//! let out = deep_transform_object(data.as_object().unwrap(), |value, key, _| {
//!     match key.as_name() {
//!         Some("views") => Decision::replace(value.as_i64().unwrap_or(0) * 10),
//!         Some("secret") => Decision::Drop,
//!         _ => Decision::Keep,
//!     }
//! });
//!
//! assert_eq!(serde_json::Value::Object(out), json!({"posts": [{"views": 10}, {"views": 20}]}));
//! ```

use anyhow::{Context, Result};
use serde_json::Value;
use std::io::{BufRead, Write};

pub mod error;
pub mod events;
pub mod input;
pub mod tree;
pub mod types;
pub mod util;
pub mod writer;

// Re-export commonly used types for convenience
pub use error::ReshapeError;
pub use input::read_documents;
pub use tree::{
    deep_extend, deep_flatten_object, deep_transform_object, deep_transform_object_with, flatten_value,
    transform_as_array, transform_object, try_deep_transform_object, try_transform_as_array,
    try_transform_object, Budget, KeyPath, TreeWalker,
};
pub use types::{is_truthy, Decision, FlattenOptions, Key, TransformOptions};
pub use util::{capitalize, pair, read_property, with_try_catch};
pub use writer::RecordWriter;

/// Flatten a stream of newline-delimited JSON objects, one output record per input line.
/// Blank lines are skipped. Returns the number of records written.
pub fn flatten_json<R: BufRead, W: Write>(
    reader: R,
    writer: &mut RecordWriter<W>,
    options: &FlattenOptions<'_>,
) -> Result<usize> {
    let mut count = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read line")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let value: Value = serde_json::from_str(line)
            .with_context(|| format!("Failed to parse JSON on line {}", idx + 1))?;
        let flat = flatten_value(&value, options)
            .with_context(|| format!("Cannot flatten line {}", idx + 1))?;

        writer.write_record(&flat)?;
        count += 1;
    }

    writer.flush()?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_json_stream() {
        let input = "{\"a\": {\"b\": 1}}\n\n{\"c\": null, \"d\": [1]}\n";
        let mut writer = RecordWriter::new(Vec::new());

        let count = flatten_json(input.as_bytes(), &mut writer, &FlattenOptions::default()).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(output, "{\"a.b\":1}\n{\"d\":[1]}\n");
    }

    #[test]
    fn test_flatten_json_rejects_non_objects() {
        let mut writer = RecordWriter::new(Vec::new());
        let err = flatten_json("[1, 2]".as_bytes(), &mut writer, &FlattenOptions::default()).unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }
}
