//! Schema descriptors.
//!
//! A descriptor tells the model what the reply should look like. It is
//! rendered verbatim into the prompt after `output =`, so field order and
//! labels are preserved exactly as they were declared.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Human/machine-readable description of the expected output shape.
///
/// Keys are field names; values are free-form type labels (`"string"`,
/// `"number"`, `"YYYY-MM-DD"`), nested descriptors, or lists of either.
///
/// # Example
///
/// ```rust
/// use gptyped_core::SchemaDescriptor;
///
/// let address = SchemaDescriptor::new()
///     .field("street", "string")
///     .field("city", "string");
///
/// let person = SchemaDescriptor::new()
///     .field("name", "string")
///     .nested("address", address)
///     .list_of("nicknames", "string");
///
/// assert_eq!(person.len(), 3);
/// assert_eq!(person.get("nicknames"), Some(&serde_json::json!(["string"])));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaDescriptor(Map<String, JsonValue>);

impl SchemaDescriptor {
    /// Create an empty descriptor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a descriptor from a JSON object.
    ///
    /// Returns `None` when the value is not an object.
    #[must_use]
    pub fn from_value(value: JsonValue) -> Option<Self> {
        match value {
            JsonValue::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Add a field with a type label or example value.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, label: impl Into<JsonValue>) -> Self {
        self.0.insert(name.into(), label.into());
        self
    }

    /// Add a nested object field.
    #[must_use]
    pub fn nested(mut self, name: impl Into<String>, descriptor: SchemaDescriptor) -> Self {
        self.0.insert(name.into(), JsonValue::Object(descriptor.0));
        self
    }

    /// Add a list field whose items are described by `item`.
    #[must_use]
    pub fn list_of(mut self, name: impl Into<String>, item: impl Into<JsonValue>) -> Self {
        self.0
            .insert(name.into(), JsonValue::Array(vec![item.into()]));
        self
    }

    /// Look up the description for a field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.0.get(name)
    }

    /// Number of top-level fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the descriptor has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over top-level field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Borrow the underlying map.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, JsonValue> {
        &self.0
    }

    /// Convert into a JSON value.
    #[must_use]
    pub fn into_value(self) -> JsonValue {
        JsonValue::Object(self.0)
    }
}

impl From<Map<String, JsonValue>> for SchemaDescriptor {
    fn from(map: Map<String, JsonValue>) -> Self {
        Self(map)
    }
}

impl TryFrom<JsonValue> for SchemaDescriptor {
    type Error = JsonValue;

    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        match value {
            JsonValue::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

impl From<SchemaDescriptor> for JsonValue {
    fn from(descriptor: SchemaDescriptor) -> Self {
        descriptor.into_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_order_is_preserved() {
        let descriptor = SchemaDescriptor::new()
            .field("zeta", "string")
            .field("alpha", "number");
        let names: Vec<_> = descriptor.field_names().collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_from_value_object() {
        let descriptor = SchemaDescriptor::from_value(json!({"a": "string"})).unwrap();
        assert_eq!(descriptor.get("a"), Some(&json!("string")));
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        assert!(SchemaDescriptor::from_value(json!(["a"])).is_none());
        assert!(SchemaDescriptor::try_from(json!(1)).is_err());
    }

    #[test]
    fn test_nested_and_list() {
        let descriptor = SchemaDescriptor::new()
            .nested("inner", SchemaDescriptor::new().field("x", "number"))
            .list_of("items", json!({"id": "number"}));

        assert_eq!(
            descriptor.into_value(),
            json!({"inner": {"x": "number"}, "items": [{"id": "number"}]})
        );
    }

    #[test]
    fn test_serializes_transparently() {
        let descriptor = SchemaDescriptor::new().field("name", "string");
        let text = serde_json::to_string(&descriptor).unwrap();
        assert_eq!(text, r#"{"name":"string"}"#);

        let parsed: SchemaDescriptor = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, descriptor);
    }
}
