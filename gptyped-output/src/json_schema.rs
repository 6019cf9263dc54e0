//! Validation against a JSON Schema document.

use jsonschema::error::ValidationErrorKind;
use jsonschema::JSONSchema;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::fmt;
use std::marker::PhantomData;
use thiserror::Error;

use crate::error::{IssueCode, SchemaValidationError, ValidationIssue};
use crate::schema::ValidationSchema;

/// The schema document itself is invalid.
#[derive(Debug, Error)]
#[error("Invalid JSON schema: {0}")]
pub struct JsonSchemaCompileError(String);

/// Validates with a compiled JSON Schema, then deserializes into `T`.
pub struct JsonSchemaValidator<T> {
    compiled: JSONSchema,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> JsonSchemaValidator<T> {
    /// Compile a schema document.
    pub fn new(schema: &JsonValue) -> Result<Self, JsonSchemaCompileError> {
        let compiled =
            JSONSchema::compile(schema).map_err(|e| JsonSchemaCompileError(e.to_string()))?;
        Ok(Self {
            compiled,
            _phantom: PhantomData,
        })
    }
}

impl<T> fmt::Debug for JsonSchemaValidator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSchemaValidator").finish_non_exhaustive()
    }
}

impl<T: DeserializeOwned> ValidationSchema<T> for JsonSchemaValidator<T> {
    fn validate(&self, value: JsonValue) -> Result<T, SchemaValidationError> {
        if let Err(errors) = self.compiled.validate(&value) {
            let issues = errors
                .map(|e| {
                    let path = pointer_to_path(&e.instance_path.to_string());
                    match &e.kind {
                        ValidationErrorKind::Required { property } => {
                            let name = property
                                .as_str()
                                .map_or_else(|| property.to_string(), str::to_string);
                            ValidationIssue::missing_field(format!("{path}.{name}"))
                        }
                        ValidationErrorKind::Type { .. } => {
                            ValidationIssue::new(path, IssueCode::InvalidType, e.to_string())
                        }
                        ValidationErrorKind::AdditionalProperties { .. } => {
                            ValidationIssue::new(path, IssueCode::UnrecognizedKey, e.to_string())
                        }
                        _ => ValidationIssue::new(path, IssueCode::InvalidValue, e.to_string()),
                    }
                })
                .collect();
            return Err(SchemaValidationError::new(issues));
        }
        serde_json::from_value(value).map_err(|e| SchemaValidationError::from_serde(&e))
    }
}

/// `/items/0/name` becomes `$.items[0].name`.
fn pointer_to_path(pointer: &str) -> String {
    pointer
        .split('/')
        .filter(|s| !s.is_empty())
        .fold(String::from("$"), |mut path, segment| {
            if segment.chars().all(|c| c.is_ascii_digit()) {
                path.push_str(&format!("[{segment}]"));
            } else {
                path.push('.');
                path.push_str(&segment.replace("~1", "/").replace("~0", "~"));
            }
            path
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Person {
        name: String,
        age: u32,
    }

    fn person_schema() -> JsonValue {
        json!({
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "age": {"type": "integer", "minimum": 0}
            },
            "required": ["name", "age"]
        })
    }

    #[test]
    fn test_pointer_to_path() {
        assert_eq!(pointer_to_path(""), "$");
        assert_eq!(pointer_to_path("/items/0/name"), "$.items[0].name");
        assert_eq!(pointer_to_path("/a~1b"), "$.a/b");
    }

    #[test]
    fn test_valid_value() {
        let validator = JsonSchemaValidator::<Person>::new(&person_schema()).unwrap();
        let person = validator.validate(json!({"name": "Ada", "age": 36})).unwrap();
        assert_eq!(person.name, "Ada");
        assert_eq!(person.age, 36);
    }

    #[test]
    fn test_missing_and_invalid() {
        let validator = JsonSchemaValidator::<Person>::new(&person_schema()).unwrap();
        let err = validator.validate(json!({"age": "x"})).unwrap_err();
        assert!(err.has_issue_at("$.name"));
        assert!(err.has_issue_at("$.age"));
    }

    #[test]
    fn test_invalid_schema() {
        let result = JsonSchemaValidator::<Person>::new(&json!({"type": 5}));
        assert!(result.is_err());
    }
}
