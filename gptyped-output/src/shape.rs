//! Declarative structural schemas.
//!
//! A [`Shape`] describes the JSON a model should return: types, required
//! fields, enums, bounds. Validation walks the whole value and reports every
//! problem with its path instead of stopping at the first one. The validated
//! value is then normalized (defaults filled in, unknown keys stripped,
//! optional coercions applied) and handed to serde for the final conversion.
//!
//! The same shape can produce the [`SchemaDescriptor`] that goes into the
//! prompt, so the two never drift apart.

use gptyped_core::SchemaDescriptor;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value as JsonValue};
use std::fmt;
use std::marker::PhantomData;

use crate::error::{IssueCode, SchemaValidationError, ValidationIssue};
use crate::schema::ValidationSchema;

/// Root path used in issue locations.
const ROOT: &str = "$";

/// Structural description of a JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Any value.
    Any,
    /// A string with optional length bounds (in characters).
    String {
        /// Minimum length.
        min_length: Option<usize>,
        /// Maximum length.
        max_length: Option<usize>,
    },
    /// A number, optionally restricted to integers.
    Number {
        /// Only accept integral values.
        integer: bool,
        /// Inclusive lower bound.
        minimum: Option<f64>,
        /// Inclusive upper bound.
        maximum: Option<f64>,
    },
    /// `true` or `false`.
    Boolean,
    /// One of a fixed set of strings.
    Enum(Vec<String>),
    /// A homogeneous array.
    Array {
        /// Item shape.
        items: Box<Shape>,
        /// Minimum number of items.
        min_items: Option<usize>,
        /// Maximum number of items.
        max_items: Option<usize>,
    },
    /// An object with declared fields.
    Object(ObjectShape),
    /// The inner shape, or `null`.
    Nullable(Box<Shape>),
}

impl Shape {
    /// Any value.
    #[must_use]
    pub fn any() -> Self {
        Self::Any
    }

    /// A string.
    #[must_use]
    pub fn string() -> Self {
        Self::String {
            min_length: None,
            max_length: None,
        }
    }

    /// An integer.
    #[must_use]
    pub fn integer() -> Self {
        Self::Number {
            integer: true,
            minimum: None,
            maximum: None,
        }
    }

    /// Any number.
    #[must_use]
    pub fn number() -> Self {
        Self::Number {
            integer: false,
            minimum: None,
            maximum: None,
        }
    }

    /// A boolean.
    #[must_use]
    pub fn boolean() -> Self {
        Self::Boolean
    }

    /// One of the given strings.
    #[must_use]
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Enum(values.into_iter().map(Into::into).collect())
    }

    /// An array of `items`.
    #[must_use]
    pub fn array(items: Shape) -> Self {
        Self::Array {
            items: Box::new(items),
            min_items: None,
            max_items: None,
        }
    }

    /// An object.
    #[must_use]
    pub fn object(shape: ObjectShape) -> Self {
        Self::Object(shape)
    }

    /// Allow `null` in addition to this shape.
    #[must_use]
    pub fn nullable(self) -> Self {
        match self {
            Self::Nullable(_) | Self::Any => self,
            other => Self::Nullable(Box::new(other)),
        }
    }

    /// Set a lower bound: characters for strings, items for arrays.
    #[must_use]
    pub fn min_length(mut self, min: usize) -> Self {
        match &mut self {
            Self::String { min_length, .. } => *min_length = Some(min),
            Self::Array { min_items, .. } => *min_items = Some(min),
            _ => {}
        }
        self
    }

    /// Set an upper bound: characters for strings, items for arrays.
    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        match &mut self {
            Self::String { max_length, .. } => *max_length = Some(max),
            Self::Array { max_items, .. } => *max_items = Some(max),
            _ => {}
        }
        self
    }

    /// Set an inclusive lower bound for numbers.
    #[must_use]
    pub fn minimum(mut self, min: f64) -> Self {
        if let Self::Number { minimum, .. } = &mut self {
            *minimum = Some(min);
        }
        self
    }

    /// Set an inclusive upper bound for numbers.
    #[must_use]
    pub fn maximum(mut self, max: f64) -> Self {
        if let Self::Number { maximum, .. } = &mut self {
            *maximum = Some(max);
        }
        self
    }

    /// The label used for this shape in a prompt descriptor.
    #[must_use]
    pub fn label(&self) -> JsonValue {
        match self {
            Self::Any => JsonValue::from("any"),
            Self::String { .. } => JsonValue::from("string"),
            Self::Number { integer: true, .. } => JsonValue::from("integer"),
            Self::Number { .. } => JsonValue::from("number"),
            Self::Boolean => JsonValue::from("boolean"),
            Self::Enum(values) => JsonValue::from(values.join(" | ")),
            Self::Array { items, .. } => JsonValue::Array(vec![items.label()]),
            Self::Object(obj) => obj.descriptor().into_value(),
            Self::Nullable(inner) => match inner.label() {
                JsonValue::String(s) => JsonValue::String(format!("{s} | null")),
                other => other,
            },
        }
    }

    fn expected(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::String { .. } | Self::Enum(_) => "string",
            Self::Number { integer: true, .. } => "integer",
            Self::Number { .. } => "number",
            Self::Boolean => "boolean",
            Self::Array { .. } => "array",
            Self::Object(_) => "object",
            Self::Nullable(inner) => inner.expected(),
        }
    }
}

impl From<ObjectShape> for Shape {
    fn from(shape: ObjectShape) -> Self {
        Self::Object(shape)
    }
}

/// What to do with object keys that are not declared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownKeys {
    /// Drop them from the validated value.
    #[default]
    Strip,
    /// Keep them as they are.
    Passthrough,
    /// Report each one as an issue.
    Reject,
}

/// A declared object field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    shape: Shape,
    required: bool,
    description: Option<String>,
    default: Option<JsonValue>,
}

impl Field {
    /// A required field of the given shape.
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            required: true,
            description: None,
            default: None,
        }
    }

    /// Make the field optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Attach a description shown in the prompt descriptor.
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Value used when the field is absent. Implies optional.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<JsonValue>) -> Self {
        self.default = Some(value.into());
        self.required = false;
        self
    }

    /// Whether the field must be present.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The field's shape.
    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    fn label(&self) -> JsonValue {
        match self.shape.label() {
            JsonValue::String(mut label) => {
                if let Some(desc) = &self.description {
                    label = format!("{label} - {desc}");
                }
                if !self.required {
                    label.push_str(" (optional)");
                }
                JsonValue::String(label)
            }
            other => other,
        }
    }
}

/// Object shape with ordered fields.
///
/// ```rust
/// use gptyped_output::{Field, ObjectShape, Shape};
///
/// let shape = ObjectShape::new()
///     .required("name", Shape::string().min_length(1))
///     .field("age", Field::new(Shape::integer().minimum(0.0)).describe("years"))
///     .optional("email", Shape::string());
///
/// let descriptor = shape.descriptor();
/// assert_eq!(descriptor.get("age"), Some(&serde_json::json!("integer - years")));
/// assert_eq!(descriptor.get("email"), Some(&serde_json::json!("string (optional)")));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectShape {
    fields: IndexMap<String, Field>,
    unknown_keys: UnknownKeys,
}

impl ObjectShape {
    /// Create an empty object shape.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required field.
    #[must_use]
    pub fn required(self, name: impl Into<String>, shape: Shape) -> Self {
        self.field(name, Field::new(shape))
    }

    /// Add an optional field.
    #[must_use]
    pub fn optional(self, name: impl Into<String>, shape: Shape) -> Self {
        self.field(name, Field::new(shape).optional())
    }

    /// Add a fully configured field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, field: Field) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    /// Set the unknown-key policy.
    #[must_use]
    pub fn unknown_keys(mut self, policy: UnknownKeys) -> Self {
        self.unknown_keys = policy;
        self
    }

    /// Reject undeclared keys.
    #[must_use]
    pub fn strict(self) -> Self {
        self.unknown_keys(UnknownKeys::Reject)
    }

    /// Keep undeclared keys.
    #[must_use]
    pub fn passthrough(self) -> Self {
        self.unknown_keys(UnknownKeys::Passthrough)
    }

    /// Look up a field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build the prompt descriptor for this shape.
    #[must_use]
    pub fn descriptor(&self) -> SchemaDescriptor {
        self.fields
            .iter()
            .fold(SchemaDescriptor::new(), |descriptor, (name, field)| {
                descriptor.field(name.clone(), field.label())
            })
    }
}

/// Walks a value against a shape, collecting issues.
struct Checker {
    coerce: bool,
    issues: Vec<ValidationIssue>,
}

impl Checker {
    fn new(coerce: bool) -> Self {
        Self {
            coerce,
            issues: Vec::new(),
        }
    }

    fn invalid_type(&mut self, path: &str, shape: &Shape, found: &JsonValue) {
        self.issues.push(ValidationIssue::invalid_type(
            path,
            shape.expected(),
            json_type_name(found),
        ));
    }

    fn check(&mut self, shape: &Shape, value: JsonValue, path: &str) -> Option<JsonValue> {
        match shape {
            Shape::Any => Some(value),
            Shape::Nullable(inner) => {
                if value.is_null() {
                    Some(JsonValue::Null)
                } else {
                    self.check(inner, value, path)
                }
            }
            Shape::String {
                min_length,
                max_length,
            } => {
                let text = match value {
                    JsonValue::String(s) => s,
                    JsonValue::Number(n) if self.coerce => n.to_string(),
                    JsonValue::Bool(b) if self.coerce => b.to_string(),
                    other => {
                        self.invalid_type(path, shape, &other);
                        return None;
                    }
                };
                let len = text.chars().count();
                if !self.check_len(path, len, *min_length, *max_length, "character") {
                    return None;
                }
                Some(JsonValue::String(text))
            }
            Shape::Number {
                integer,
                minimum,
                maximum,
            } => self.check_number(shape, value, path, *integer, *minimum, *maximum),
            Shape::Boolean => match value {
                JsonValue::Bool(b) => Some(JsonValue::Bool(b)),
                JsonValue::String(s) if self.coerce => {
                    let flag = s.trim().to_ascii_lowercase();
                    match flag.as_str() {
                        "true" => Some(JsonValue::Bool(true)),
                        "false" => Some(JsonValue::Bool(false)),
                        _ => {
                            self.invalid_type(path, shape, &JsonValue::String(s));
                            None
                        }
                    }
                }
                other => {
                    self.invalid_type(path, shape, &other);
                    None
                }
            },
            Shape::Enum(values) => match value {
                JsonValue::String(s) if values.iter().any(|v| *v == s) => {
                    Some(JsonValue::String(s))
                }
                JsonValue::String(s) => {
                    self.issues.push(ValidationIssue::new(
                        path,
                        IssueCode::InvalidValue,
                        format!("Expected one of {}, received '{s}'", values.join(" | ")),
                    ));
                    None
                }
                other => {
                    self.invalid_type(path, shape, &other);
                    None
                }
            },
            Shape::Array {
                items,
                min_items,
                max_items,
            } => {
                let elements = match value {
                    JsonValue::Array(elements) => elements,
                    other => {
                        self.invalid_type(path, shape, &other);
                        return None;
                    }
                };
                let len_ok = self.check_len(path, elements.len(), *min_items, *max_items, "item");

                let mut out = Vec::with_capacity(elements.len());
                let mut ok = len_ok;
                for (i, element) in elements.into_iter().enumerate() {
                    match self.check(items, element, &format!("{path}[{i}]")) {
                        Some(v) => out.push(v),
                        None => ok = false,
                    }
                }
                ok.then_some(JsonValue::Array(out))
            }
            Shape::Object(obj) => self.check_object(obj, value, path),
        }
    }

    fn check_number(
        &mut self,
        shape: &Shape,
        value: JsonValue,
        path: &str,
        integer: bool,
        minimum: Option<f64>,
        maximum: Option<f64>,
    ) -> Option<JsonValue> {
        let number = match value {
            JsonValue::Number(n) => n,
            JsonValue::String(s) if self.coerce => match s.trim().parse::<f64>() {
                Ok(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Number::from(f as i64),
                Ok(f) => match Number::from_f64(f) {
                    Some(n) => n,
                    None => {
                        self.invalid_type(path, shape, &JsonValue::String(s));
                        return None;
                    }
                },
                Err(_) => {
                    self.invalid_type(path, shape, &JsonValue::String(s));
                    return None;
                }
            },
            other => {
                self.invalid_type(path, shape, &other);
                return None;
            }
        };

        let as_f64 = number.as_f64().unwrap_or(f64::NAN);

        let normalized = if !integer || number.is_i64() || number.is_u64() {
            number
        } else if as_f64.fract() == 0.0 && as_f64.abs() < i64::MAX as f64 {
            // 3.0 is an integer for validation purposes; serde needs it as one.
            Number::from(as_f64 as i64)
        } else {
            self.issues.push(ValidationIssue::invalid_type(path, "integer", "float"));
            return None;
        };

        if let Some(min) = minimum {
            if as_f64 < min {
                self.issues.push(ValidationIssue::new(
                    path,
                    IssueCode::TooSmall,
                    format!("Number must be greater than or equal to {min}"),
                ));
                return None;
            }
        }
        if let Some(max) = maximum {
            if as_f64 > max {
                self.issues.push(ValidationIssue::new(
                    path,
                    IssueCode::TooBig,
                    format!("Number must be less than or equal to {max}"),
                ));
                return None;
            }
        }

        Some(JsonValue::Number(normalized))
    }

    fn check_len(
        &mut self,
        path: &str,
        len: usize,
        min: Option<usize>,
        max: Option<usize>,
        unit: &str,
    ) -> bool {
        if let Some(min) = min {
            if len < min {
                self.issues.push(ValidationIssue::new(
                    path,
                    IssueCode::TooSmall,
                    format!("Must contain at least {min} {unit}(s)"),
                ));
                return false;
            }
        }
        if let Some(max) = max {
            if len > max {
                self.issues.push(ValidationIssue::new(
                    path,
                    IssueCode::TooBig,
                    format!("Must contain at most {max} {unit}(s)"),
                ));
                return false;
            }
        }
        true
    }

    fn check_object(&mut self, obj: &ObjectShape, value: JsonValue, path: &str) -> Option<JsonValue> {
        let mut map = match value {
            JsonValue::Object(map) => map,
            other => {
                self.issues
                    .push(ValidationIssue::invalid_type(path, "object", json_type_name(&other)));
                return None;
            }
        };

        let unknown: Vec<String> = map
            .keys()
            .filter(|k| !obj.fields.contains_key(k.as_str()))
            .cloned()
            .collect();

        let mut out = Map::new();
        let mut ok = true;

        for (name, field) in &obj.fields {
            let child = format!("{path}.{name}");
            // Models tend to write `null` for fields they have no value for.
            let present = map
                .remove(name)
                .filter(|v| field.required || !v.is_null() || accepts_null(&field.shape));

            match present {
                Some(v) => match self.check(&field.shape, v, &child) {
                    Some(v) => {
                        out.insert(name.clone(), v);
                    }
                    None => ok = false,
                },
                None => {
                    if let Some(default) = &field.default {
                        out.insert(name.clone(), default.clone());
                    } else if field.required {
                        self.issues.push(ValidationIssue::missing_field(child));
                        ok = false;
                    }
                }
            }
        }

        match obj.unknown_keys {
            UnknownKeys::Strip => {}
            UnknownKeys::Passthrough => {
                for key in unknown {
                    if let Some(v) = map.remove(&key) {
                        out.insert(key, v);
                    }
                }
            }
            UnknownKeys::Reject => {
                for key in unknown {
                    self.issues.push(ValidationIssue::new(
                        format!("{path}.{key}"),
                        IssueCode::UnrecognizedKey,
                        "Unrecognized key",
                    ));
                    ok = false;
                }
            }
        }

        ok.then_some(JsonValue::Object(out))
    }
}

fn accepts_null(shape: &Shape) -> bool {
    matches!(shape, Shape::Nullable(_) | Shape::Any)
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// [`ValidationSchema`] built from a [`Shape`] plus serde conversion into `T`.
///
/// ```rust
/// use gptyped_output::{ObjectShape, Shape, ShapeSchema, ValidationSchema};
/// use serde_json::json;
///
/// let schema: ShapeSchema<serde_json::Value> = ShapeSchema::new(
///     ObjectShape::new()
///         .required("name", Shape::string())
///         .required("age", Shape::integer()),
/// );
///
/// let err = schema.validate(json!({"age": "ten"})).unwrap_err();
/// assert!(err.has_issue_at("$.name"));
/// assert!(err.has_issue_at("$.age"));
/// ```
pub struct ShapeSchema<T> {
    shape: Shape,
    coerce: bool,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> ShapeSchema<T> {
    /// Create a schema from a shape.
    #[must_use]
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self {
            shape: shape.into(),
            coerce: false,
            _phantom: PhantomData,
        }
    }

    /// Coerce strings to numbers/booleans and scalars to strings where needed.
    #[must_use]
    pub fn with_coercion(mut self, coerce: bool) -> Self {
        self.coerce = coerce;
        self
    }

    /// The underlying shape.
    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Prompt descriptor for object shapes.
    #[must_use]
    pub fn descriptor(&self) -> Option<SchemaDescriptor> {
        match &self.shape {
            Shape::Object(obj) => Some(obj.descriptor()),
            _ => None,
        }
    }

    /// Validate and normalize without converting into `T`.
    pub fn check(&self, value: JsonValue) -> Result<JsonValue, SchemaValidationError> {
        let mut checker = Checker::new(self.coerce);
        let normalized = checker.check(&self.shape, value, ROOT);
        match normalized {
            Some(v) if checker.issues.is_empty() => Ok(v),
            _ => Err(SchemaValidationError::new(checker.issues)),
        }
    }
}

impl<T> Clone for ShapeSchema<T> {
    fn clone(&self) -> Self {
        Self {
            shape: self.shape.clone(),
            coerce: self.coerce,
            _phantom: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ShapeSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeSchema")
            .field("shape", &self.shape)
            .field("coerce", &self.coerce)
            .finish()
    }
}

impl<T: DeserializeOwned> ValidationSchema<T> for ShapeSchema<T> {
    fn validate(&self, value: JsonValue) -> Result<T, SchemaValidationError> {
        let normalized = self.check(value)?;
        serde_json::from_value(normalized).map_err(|e| SchemaValidationError::from_serde(&e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Person {
        name: String,
        age: u32,
        #[serde(default)]
        email: Option<String>,
    }

    fn person_shape() -> ObjectShape {
        ObjectShape::new()
            .required("name", Shape::string())
            .required("age", Shape::integer().minimum(0.0))
            .optional("email", Shape::string())
    }

    fn person_schema() -> ShapeSchema<Person> {
        ShapeSchema::new(person_shape())
    }

    #[test]
    fn test_valid_object() {
        let person = person_schema()
            .validate(json!({"name": "Ada", "age": 36}))
            .unwrap();
        assert_eq!(
            person,
            Person {
                name: "Ada".into(),
                age: 36,
                email: None
            }
        );
    }

    #[test]
    fn test_missing_required_field() {
        let err = person_schema().validate(json!({"name": "Ada"})).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.issues[0].path, "$.age");
        assert_eq!(err.issues[0].code, IssueCode::MissingField);
        assert_eq!(err.issues[0].field(), Some("age"));
    }

    #[test]
    fn test_collects_all_issues() {
        let err = person_schema()
            .validate(json!({"age": "old", "email": 5}))
            .unwrap_err();
        let paths: Vec<_> = err.issues.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["$.name", "$.age", "$.email"]);
    }

    #[test]
    fn test_unknown_keys_stripped_by_default() {
        let value = person_schema()
            .check(json!({"name": "Ada", "age": 1, "extra": true}))
            .unwrap();
        assert_eq!(value, json!({"name": "Ada", "age": 1}));
    }

    #[test]
    fn test_unknown_keys_passthrough() {
        let schema: ShapeSchema<JsonValue> = ShapeSchema::new(person_shape().passthrough());
        let value = schema
            .check(json!({"extra": true, "name": "Ada", "age": 1}))
            .unwrap();
        assert_eq!(value, json!({"name": "Ada", "age": 1, "extra": true}));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let schema: ShapeSchema<JsonValue> = ShapeSchema::new(person_shape().strict());
        let err = schema
            .check(json!({"name": "Ada", "age": 1, "extra": true}))
            .unwrap_err();
        assert_eq!(err.issues[0].code, IssueCode::UnrecognizedKey);
        assert_eq!(err.issues[0].path, "$.extra");
    }

    #[test]
    fn test_null_optional_is_absent() {
        let person = person_schema()
            .validate(json!({"name": "Ada", "age": 1, "email": null}))
            .unwrap();
        assert_eq!(person.email, None);
    }

    #[test]
    fn test_null_required_is_invalid() {
        let err = person_schema()
            .validate(json!({"name": null, "age": 1}))
            .unwrap_err();
        assert_eq!(err.issues[0].code, IssueCode::InvalidType);
        assert!(err.issues[0].message.contains("received null"));
    }

    #[test]
    fn test_default_value() {
        let schema: ShapeSchema<JsonValue> = ShapeSchema::new(
            ObjectShape::new().field("count", Field::new(Shape::integer()).default_value(0)),
        );
        assert_eq!(schema.check(json!({})).unwrap(), json!({"count": 0}));
    }

    #[test]
    fn test_integral_float_becomes_integer() {
        let person = person_schema()
            .validate(json!({"name": "Ada", "age": 36.0}))
            .unwrap();
        assert_eq!(person.age, 36);

        let err = person_schema()
            .validate(json!({"name": "Ada", "age": 36.5}))
            .unwrap_err();
        assert!(err.issues[0].message.contains("float"));
    }

    #[test]
    fn test_bounds() {
        let err = person_schema()
            .validate(json!({"name": "Ada", "age": -1}))
            .unwrap_err();
        assert_eq!(err.issues[0].code, IssueCode::TooSmall);

        let schema: ShapeSchema<JsonValue> =
            ShapeSchema::new(Shape::string().min_length(2).max_length(3));
        assert!(schema.check(json!("ab")).is_ok());
        assert_eq!(schema.check(json!("a")).unwrap_err().issues[0].code, IssueCode::TooSmall);
        assert_eq!(schema.check(json!("abcd")).unwrap_err().issues[0].code, IssueCode::TooBig);
    }

    #[test]
    fn test_coercion() {
        let schema = person_schema().with_coercion(true);
        let person = schema.validate(json!({"name": 42, "age": " 7 "})).unwrap();
        assert_eq!(person.name, "42");
        assert_eq!(person.age, 7);

        let flags: ShapeSchema<bool> = ShapeSchema::new(Shape::boolean()).with_coercion(true);
        assert!(flags.validate(json!("TRUE")).unwrap());
        assert!(flags.validate(json!("yes")).is_err());
    }

    #[test]
    fn test_no_coercion_by_default() {
        let err = person_schema()
            .validate(json!({"name": "Ada", "age": "7"}))
            .unwrap_err();
        assert_eq!(err.issues[0].path, "$.age");
    }

    #[test]
    fn test_enum() {
        let schema: ShapeSchema<String> =
            ShapeSchema::new(Shape::enumeration(["low", "medium", "high"]));
        assert_eq!(schema.validate(json!("low")).unwrap(), "low");

        let err = schema.validate(json!("urgent")).unwrap_err();
        assert_eq!(err.issues[0].code, IssueCode::InvalidValue);
        assert!(err.issues[0].message.contains("low | medium | high"));
    }

    #[test]
    fn test_array_item_paths() {
        let schema: ShapeSchema<Vec<i64>> =
            ShapeSchema::new(Shape::array(Shape::integer()).min_length(1));
        assert_eq!(schema.validate(json!([1, 2])).unwrap(), vec![1, 2]);

        let err = schema.validate(json!([1, "x", 3, true])).unwrap_err();
        let paths: Vec<_> = err.issues.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["$[1]", "$[3]"]);

        let err = schema.validate(json!([])).unwrap_err();
        assert_eq!(err.issues[0].code, IssueCode::TooSmall);
    }

    #[test]
    fn test_nested_paths() {
        let schema: ShapeSchema<JsonValue> = ShapeSchema::new(ObjectShape::new().required(
            "address",
            Shape::object(ObjectShape::new().required("city", Shape::string())),
        ));
        let err = schema.check(json!({"address": {}})).unwrap_err();
        assert_eq!(err.issues[0].path, "$.address.city");
    }

    #[test]
    fn test_nullable() {
        let schema: ShapeSchema<Option<String>> = ShapeSchema::new(Shape::string().nullable());
        assert_eq!(schema.validate(json!(null)).unwrap(), None);
        assert_eq!(schema.validate(json!("x")).unwrap(), Some("x".to_string()));
        assert!(schema.validate(json!(1)).is_err());
    }

    #[test]
    fn test_descriptor_from_shape() {
        let shape = ObjectShape::new()
            .field("name", Field::new(Shape::string()).describe("full name"))
            .required("tags", Shape::array(Shape::string()))
            .required("level", Shape::enumeration(["a", "b"]))
            .optional("note", Shape::string().nullable())
            .required(
                "origin",
                Shape::object(ObjectShape::new().required("x", Shape::number())),
            );

        assert_eq!(
            shape.descriptor().into_value(),
            json!({
                "name": "string - full name",
                "tags": ["string"],
                "level": "a | b",
                "note": "string | null (optional)",
                "origin": {"x": "number"}
            })
        );
    }

    #[test]
    fn test_root_type_mismatch() {
        let err = person_schema().validate(json!([1, 2])).unwrap_err();
        assert_eq!(err.issues[0].path, "$");
        assert!(err.issues[0].message.contains("Expected object, received array"));
    }
}
