//! Loading JSON documents from files or stdin

use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Read;
use tracing::debug;

/// Read every JSON document from `reader`.
///
/// The whole input is first parsed as a single document with simd-json. A
/// top-level array is treated as a stream of documents unless
/// `keep_arrays` is set. Input that is not one document is read as
/// newline-delimited JSON instead.
pub fn read_documents<R: Read>(reader: R, keep_arrays: bool) -> Result<Vec<Value>> {
    let mut content = Vec::new();
    let mut reader = reader;
    reader.read_to_end(&mut content).context("Failed to read input")?;

    if content.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    // simd-json parses in place, so keep the original bytes for the fallback
    let mut scratch = content.clone();
    match simd_json::serde::from_slice::<Value>(&mut scratch) {
        Ok(Value::Array(items)) if !keep_arrays => {
            debug!(documents = items.len(), "read top-level array");
            Ok(items)
        }
        Ok(value) => Ok(vec![value]),
        Err(e) => {
            debug!(error = %e, "not a single document, reading as NDJSON");
            read_lines(&content)
        }
    }
}

fn read_lines(content: &[u8]) -> Result<Vec<Value>> {
    let text = String::from_utf8_lossy(content);
    let mut documents = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line)
            .with_context(|| format!("Failed to parse JSON on line {}", idx + 1))?;
        documents.push(value);
    }

    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_document() {
        let docs = read_documents(r#"{"a": {"b": 1}}"#.as_bytes(), false).unwrap();
        assert_eq!(docs, vec![json!({"a": {"b": 1}})]);
    }

    #[test]
    fn test_top_level_array_is_a_stream() {
        let docs = read_documents(r#"[{"a": 1}, {"b": 2}]"#.as_bytes(), false).unwrap();
        assert_eq!(docs.len(), 2);

        let kept = read_documents(r#"[{"a": 1}, {"b": 2}]"#.as_bytes(), true).unwrap();
        assert_eq!(kept, vec![json!([{"a": 1}, {"b": 2}])]);
    }

    #[test]
    fn test_ndjson_fallback() {
        let docs = read_documents("{\"a\": 1}\n\n{\"b\": 2}\n".as_bytes(), false).unwrap();
        assert_eq!(docs, vec![json!({"a": 1}), json!({"b": 2})]);
    }

    #[test]
    fn test_empty_input() {
        assert!(read_documents("  \n".as_bytes(), false).unwrap().is_empty());
    }

    #[test]
    fn test_bad_line_reports_position() {
        let err = read_documents("{\"a\": 1}\n{oops\n".as_bytes(), false).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
