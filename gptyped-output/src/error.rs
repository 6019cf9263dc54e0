//! Error types for schema validation.

use thiserror::Error;

/// Category of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueCode {
    /// A required field is absent.
    MissingField,
    /// The value has the wrong JSON type.
    InvalidType,
    /// The value has the right type but is not acceptable (enum, pattern).
    InvalidValue,
    /// Number, string, or array is below its lower bound.
    TooSmall,
    /// Number, string, or array is above its upper bound.
    TooBig,
    /// A key that the schema does not allow.
    UnrecognizedKey,
    /// Custom refinement failure.
    Custom,
}

impl IssueCode {
    /// Short snake_case name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidType => "invalid_type",
            Self::InvalidValue => "invalid_value",
            Self::TooSmall => "too_small",
            Self::TooBig => "too_big",
            Self::UnrecognizedKey => "unrecognized_key",
            Self::Custom => "custom",
        }
    }
}

/// A single field-level validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {message} ({})", .code.as_str())]
pub struct ValidationIssue {
    /// Location of the offending value, e.g. `$.address.city` or `$.items[2]`.
    pub path: String,
    /// Issue category.
    pub code: IssueCode,
    /// Human-readable explanation.
    pub message: String,
}

impl ValidationIssue {
    /// Create a new issue.
    pub fn new(path: impl Into<String>, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            code,
            message: message.into(),
        }
    }

    /// Create a missing field issue.
    pub fn missing_field(path: impl Into<String>) -> Self {
        Self::new(path, IssueCode::MissingField, "Required field is missing")
    }

    /// Create an invalid type issue.
    pub fn invalid_type(path: impl Into<String>, expected: &str, found: &str) -> Self {
        Self::new(
            path,
            IssueCode::InvalidType,
            format!("Expected {expected}, received {found}"),
        )
    }

    /// Create a custom issue.
    pub fn custom(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(path, IssueCode::Custom, message)
    }

    /// The last segment of the path, if the issue concerns an object field.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        let (_, last) = self.path.rsplit_once('.')?;
        if last.ends_with(']') {
            return None;
        }
        Some(last)
    }
}

/// Structured validation failure.
///
/// Carries every issue found, not only the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Schema validation failed{}", summary(.issues))]
pub struct SchemaValidationError {
    /// Issues in the order they were found.
    pub issues: Vec<ValidationIssue>,
}

impl SchemaValidationError {
    /// Create an error from a list of issues.
    #[must_use]
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    /// Create an error with a single issue.
    #[must_use]
    pub fn single(issue: ValidationIssue) -> Self {
        Self {
            issues: vec![issue],
        }
    }

    /// Convert a serde deserialization error into a validation error.
    ///
    /// Serde reports one problem at a time and without a path, except for
    /// missing fields whose name is part of the message. That name is placed
    /// directly under the root, whatever its real depth.
    #[must_use]
    pub fn from_serde(err: &serde_json::Error) -> Self {
        let message = err.to_string();
        let issue = match missing_field_name(&message) {
            Some(name) => ValidationIssue::missing_field(format!("$.{name}")),
            None => ValidationIssue::new("$", IssueCode::InvalidType, message),
        };
        Self::single(issue)
    }

    /// Paths of all missing required fields.
    pub fn missing_fields(&self) -> impl Iterator<Item = &str> {
        self.issues
            .iter()
            .filter(|i| i.code == IssueCode::MissingField)
            .map(|i| i.path.as_str())
    }

    /// Whether any issue points at `path`.
    #[must_use]
    pub fn has_issue_at(&self, path: &str) -> bool {
        self.issues.iter().any(|i| i.path == path)
    }

    /// Number of issues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Whether there are no issues.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

impl From<ValidationIssue> for SchemaValidationError {
    fn from(issue: ValidationIssue) -> Self {
        Self::single(issue)
    }
}

/// Result type for schema validation.
pub type ValidationResult<T> = Result<T, SchemaValidationError>;

fn summary(issues: &[ValidationIssue]) -> String {
    match issues {
        [] => String::new(),
        [only] => format!(": {only}"),
        [first, rest @ ..] => format!(": {first} (and {} more)", rest.len()),
    }
}

/// Pull the field name out of serde's "missing field `name`" message.
fn missing_field_name(message: &str) -> Option<&str> {
    let rest = message.strip_prefix("missing field `")?;
    let end = rest.find('`')?;
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Person {
        name: String,
        age: u32,
    }

    #[test]
    fn test_issue_display() {
        let issue = ValidationIssue::invalid_type("$.age", "integer", "string");
        assert_eq!(
            issue.to_string(),
            "$.age: Expected integer, received string (invalid_type)"
        );
    }

    #[test]
    fn test_issue_field() {
        assert_eq!(ValidationIssue::missing_field("$.name").field(), Some("name"));
        assert_eq!(ValidationIssue::missing_field("$.a.b").field(), Some("b"));
        assert_eq!(ValidationIssue::missing_field("$.items[0]").field(), None);
        assert_eq!(ValidationIssue::missing_field("$").field(), None);
    }

    #[test]
    fn test_error_display_counts_extra_issues() {
        let err = SchemaValidationError::new(vec![
            ValidationIssue::missing_field("$.a"),
            ValidationIssue::missing_field("$.b"),
            ValidationIssue::missing_field("$.c"),
        ]);
        let text = err.to_string();
        assert!(text.contains("$.a"));
        assert!(text.contains("and 2 more"));
        assert_eq!(err.missing_fields().collect::<Vec<_>>(), vec!["$.a", "$.b", "$.c"]);
    }

    #[test]
    fn test_from_serde_missing_field() {
        let err = serde_json::from_value::<Person>(serde_json::json!({"name": "Ada"})).unwrap_err();
        let err = SchemaValidationError::from_serde(&err);
        assert!(err.has_issue_at("$.age"));
        assert_eq!(err.issues[0].code, IssueCode::MissingField);
    }

    #[test]
    fn test_from_serde_type_error() {
        let err = serde_json::from_value::<Person>(serde_json::json!({"name": 1, "age": 2}))
            .unwrap_err();
        let err = SchemaValidationError::from_serde(&err);
        assert_eq!(err.issues[0].path, "$");
        assert_eq!(err.issues[0].code, IssueCode::InvalidType);
    }
}
