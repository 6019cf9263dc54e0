//! Validation schema trait and core implementations.

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::{SchemaValidationError, ValidationIssue};

/// Parses an untyped JSON value into `T`, or explains why it cannot.
///
/// Implementations may coerce values (e.g. `"42"` into `42`) and strip
/// unknown keys before producing `T`.
pub trait ValidationSchema<T>: Send + Sync {
    /// Validate `value` and convert it into `T`.
    fn validate(&self, value: JsonValue) -> Result<T, SchemaValidationError>;
}

/// Boxed schema for dynamic dispatch.
pub type BoxedSchema<T> = Arc<dyn ValidationSchema<T>>;

impl<T, S: ValidationSchema<T> + ?Sized> ValidationSchema<T> for Arc<S> {
    fn validate(&self, value: JsonValue) -> Result<T, SchemaValidationError> {
        (**self).validate(value)
    }
}

impl<T, S: ValidationSchema<T> + ?Sized> ValidationSchema<T> for Box<S> {
    fn validate(&self, value: JsonValue) -> Result<T, SchemaValidationError> {
        (**self).validate(value)
    }
}

/// Schema that relies on `T`'s `Deserialize` implementation alone.
///
/// Reports at most one issue, since serde stops at the first error. Issue
/// paths are root-relative: a missing `address.city` is reported as
/// `$.city`. Use [`ShapeSchema`](crate::ShapeSchema) when nested paths matter.
pub struct SerdeSchema<T> {
    _phantom: PhantomData<fn() -> T>,
}

impl<T> SerdeSchema<T> {
    /// Create a new serde-backed schema.
    #[must_use]
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<T> Default for SerdeSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SerdeSchema<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SerdeSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerdeSchema")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: DeserializeOwned> ValidationSchema<T> for SerdeSchema<T> {
    fn validate(&self, value: JsonValue) -> Result<T, SchemaValidationError> {
        serde_json::from_value(value).map_err(|e| SchemaValidationError::from_serde(&e))
    }
}

/// Schema backed by a closure.
pub struct FnSchema<F> {
    func: F,
}

impl<F> FnSchema<F> {
    /// Create a new closure schema.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F, T> ValidationSchema<T> for FnSchema<F>
where
    F: Fn(JsonValue) -> Result<T, SchemaValidationError> + Send + Sync,
{
    fn validate(&self, value: JsonValue) -> Result<T, SchemaValidationError> {
        (self.func)(value)
    }
}

impl<F> fmt::Debug for FnSchema<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSchema").finish()
    }
}

/// A schema followed by an extra check on the typed value.
pub struct Refined<S, F> {
    inner: S,
    check: F,
}

impl<S, F, T> ValidationSchema<T> for Refined<S, F>
where
    S: ValidationSchema<T>,
    F: Fn(&T) -> Result<(), ValidationIssue> + Send + Sync,
{
    fn validate(&self, value: JsonValue) -> Result<T, SchemaValidationError> {
        let typed = self.inner.validate(value)?;
        (self.check)(&typed)?;
        Ok(typed)
    }
}

impl<S: fmt::Debug, F> fmt::Debug for Refined<S, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Refined")
            .field("inner", &self.inner)
            .finish()
    }
}

/// Combinators for schemas.
pub trait SchemaExt<T>: ValidationSchema<T> + Sized {
    /// Add a check that runs after structural validation succeeds.
    ///
    /// ```rust
    /// use gptyped_output::{SchemaExt, SerdeSchema, ValidationIssue, ValidationSchema};
    ///
    /// let schema = SerdeSchema::<i64>::new().refine(|n: &i64| {
    ///     if *n > 0 {
    ///         Ok(())
    ///     } else {
    ///         Err(ValidationIssue::custom("$", "must be positive"))
    ///     }
    /// });
    ///
    /// assert_eq!(schema.validate(serde_json::json!(5)).unwrap(), 5);
    /// assert!(schema.validate(serde_json::json!(-1)).is_err());
    /// ```
    fn refine<F>(self, check: F) -> Refined<Self, F>
    where
        F: Fn(&T) -> Result<(), ValidationIssue> + Send + Sync,
    {
        Refined { inner: self, check }
    }

    /// Erase the concrete schema type.
    fn boxed(self) -> BoxedSchema<T>
    where
        Self: 'static,
    {
        Arc::new(self)
    }
}

impl<T, S: ValidationSchema<T>> SchemaExt<T> for S {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IssueCode;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Person {
        name: String,
        age: u32,
    }

    #[test]
    fn test_serde_schema_accepts_valid() {
        let schema = SerdeSchema::<Person>::new();
        let person = schema.validate(json!({"name": "Ada", "age": 36})).unwrap();
        assert_eq!(
            person,
            Person {
                name: "Ada".into(),
                age: 36
            }
        );
    }

    #[test]
    fn test_serde_schema_missing_field() {
        let schema = SerdeSchema::<Person>::new();
        let err = schema.validate(json!({"name": "Ada"})).unwrap_err();
        assert_eq!(err.missing_fields().collect::<Vec<_>>(), vec!["$.age"]);
    }

    #[test]
    fn test_serde_schema_nested_missing_field_is_root_relative() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Address {
            city: String,
        }
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Resident {
            address: Address,
        }

        let err = SerdeSchema::<Resident>::new()
            .validate(json!({"address": {}}))
            .unwrap_err();
        assert_eq!(err.missing_fields().collect::<Vec<_>>(), vec!["$.city"]);
    }

    #[test]
    fn test_fn_schema() {
        let schema = FnSchema::new(|value: JsonValue| -> Result<String, SchemaValidationError> {
            value
                .as_str()
                .map(str::to_uppercase)
                .ok_or_else(|| ValidationIssue::invalid_type("$", "string", "other").into())
        });
        assert_eq!(schema.validate(json!("abc")).unwrap(), "ABC");
        assert!(schema.validate(json!(1)).is_err());
    }

    #[test]
    fn test_refine_runs_after_structure() {
        let schema = SerdeSchema::<Person>::new().refine(|p: &Person| {
            if p.age < 150 {
                Ok(())
            } else {
                Err(ValidationIssue::new("$.age", IssueCode::TooBig, "unrealistic age"))
            }
        });

        assert!(schema.validate(json!({"name": "Ada", "age": 36})).is_ok());

        let err = schema.validate(json!({"name": "Ada", "age": 200})).unwrap_err();
        assert_eq!(err.issues[0].code, IssueCode::TooBig);

        let err = schema.validate(json!({"age": 200})).unwrap_err();
        assert_eq!(err.issues[0].code, IssueCode::MissingField);
    }

    #[test]
    fn test_boxed_schema() {
        let schema: BoxedSchema<Person> = SerdeSchema::<Person>::new().boxed();
        assert!(schema.validate(json!({"name": "Ada", "age": 1})).is_ok());
    }
}
