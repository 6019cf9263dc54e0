//! Format data as JSON blocks for LLM prompts.
//!
//! Prompts embed both the expected output shape and the caller's input as
//! indented JSON. The indentation is part of the prompt text, so it has to be
//! stable: the same value always renders to the same bytes.
//!
//! # Example
//!
//! ```rust
//! use gptyped_core::format::{format_as_json_with_options, JsonFormatOptions};
//!
//! let data = serde_json::json!({ "name": "John", "tags": ["a"] });
//!
//! let json = format_as_json_with_options(&data, &JsonFormatOptions::new()).unwrap();
//! assert_eq!(json, "{\n    \"name\": \"John\",\n    \"tags\": [\n        \"a\"\n    ]\n}");
//! ```

use serde::Serialize;
use serde_json::ser::{CompactFormatter, PrettyFormatter};
use thiserror::Error;

/// Default indentation for prompt blocks.
pub const DEFAULT_INDENT: &str = "    ";

/// Options for JSON formatting.
#[derive(Debug, Clone)]
pub struct JsonFormatOptions {
    /// Indentation string (None for compact output).
    pub indent: Option<String>,
}

impl Default for JsonFormatOptions {
    fn default() -> Self {
        Self {
            indent: Some(DEFAULT_INDENT.to_string()),
        }
    }
}

impl JsonFormatOptions {
    /// Create new options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation string.
    #[must_use]
    pub fn with_indent(mut self, indent: Option<String>) -> Self {
        self.indent = indent;
        self
    }

    /// Use compact output (no indentation).
    #[must_use]
    pub fn compact(mut self) -> Self {
        self.indent = None;
        self
    }
}

/// Error type for JSON formatting operations.
#[derive(Debug, Error)]
pub enum JsonFormatError {
    /// The value could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The serializer produced bytes that are not UTF-8.
    #[error("Invalid UTF-8 in formatted output: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Format a serializable value as JSON indented with four spaces.
pub fn format_as_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsonFormatError> {
    format_as_json_with_options(value, &JsonFormatOptions::default())
}

/// Format a serializable value as JSON with custom options.
pub fn format_as_json_with_options<T: Serialize + ?Sized>(
    value: &T,
    options: &JsonFormatOptions,
) -> Result<String, JsonFormatError> {
    let mut buf = Vec::with_capacity(128);

    match &options.indent {
        Some(indent) => {
            let formatter = PrettyFormatter::with_indent(indent.as_bytes());
            let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
            value.serialize(&mut ser)?;
        }
        None => {
            let mut ser = serde_json::Serializer::with_formatter(&mut buf, CompactFormatter);
            value.serialize(&mut ser)?;
        }
    }

    Ok(String::from_utf8(buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    #[test]
    fn test_four_space_indent() {
        let data = serde_json::json!({"a": 1, "b": {"c": true}});
        let json = format_as_json(&data).unwrap();
        assert_eq!(json, "{\n    \"a\": 1,\n    \"b\": {\n        \"c\": true\n    }\n}");
    }

    #[test]
    fn test_preserves_insertion_order() {
        let data = serde_json::json!({"zeta": 1, "alpha": 2});
        let json = format_as_json(&data).unwrap();
        assert!(json.find("zeta").unwrap() < json.find("alpha").unwrap());
    }

    #[test]
    fn test_compact_output() {
        let data = serde_json::json!({"a": [1, 2]});
        let json = format_as_json_with_options(&data, &JsonFormatOptions::new().compact()).unwrap();
        assert_eq!(json, r#"{"a":[1,2]}"#);
    }

    #[test]
    fn test_custom_indent() {
        let data = serde_json::json!([1]);
        let options = JsonFormatOptions::new().with_indent(Some("\t".to_string()));
        let json = format_as_json_with_options(&data, &options).unwrap();
        assert_eq!(json, "[\n\t1\n]");
    }

    #[test]
    fn test_scalar_value() {
        assert_eq!(format_as_json("hello").unwrap(), "\"hello\"");
        assert_eq!(format_as_json(&42).unwrap(), "42");
    }

    #[test]
    fn test_non_string_keys_fail() {
        let mut map = BTreeMap::new();
        map.insert(vec![1u8], "value");
        assert!(matches!(
            format_as_json(&map),
            Err(JsonFormatError::Serialization(_))
        ));
    }
}
