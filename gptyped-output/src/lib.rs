//! # gptyped-output
//!
//! Turns a free-form model reply into a validated, typed value.
//!
//! ## Core Concepts
//!
//! - **[`QuoteSanitizer`]**: normalizes typographic quotes that break strict JSON
//! - **[`extract_code_block`]**: unwraps the first Markdown code fence, if any
//! - **[`JsonExtraction`]**: how the JSON candidate is located in the reply
//! - **[`ValidationSchema`]**: parses an untyped JSON value into `T` or reports issues
//! - **[`ShapeSchema`]**: a declarative structural schema with field-level diagnostics
//!
//! ## Example
//!
//! ```rust
//! use gptyped_output::{extract_code_block, sanitize_quotes, ObjectShape, Shape, ShapeSchema, ValidationSchema};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! let reply = "Sure!\n```json\n{\u{201C}name\u{201D}: \u{201C}Ada\u{201D}, \u{201C}age\u{201D}: 36}\n```";
//! let clean = sanitize_quotes(reply);
//! let candidate = extract_code_block(&clean).unwrap();
//! let value: serde_json::Value = serde_json::from_str(&candidate).unwrap();
//!
//! let schema: ShapeSchema<Person> = ShapeSchema::new(
//!     ObjectShape::new()
//!         .required("name", Shape::string())
//!         .required("age", Shape::integer()),
//! );
//! let person = schema.validate(value).unwrap();
//! assert_eq!(person.name, "Ada");
//! assert_eq!(person.age, 36);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod code_block;
pub mod error;
pub mod parser;
pub mod sanitize;
pub mod schema;
pub mod shape;

/// JSON Schema backed validation.
#[cfg(feature = "strict-validation")]
#[cfg_attr(docsrs, doc(cfg(feature = "strict-validation")))]
pub mod json_schema;

// Re-exports
pub use code_block::extract_code_block;
pub use error::{IssueCode, SchemaValidationError, ValidationIssue, ValidationResult};
pub use parser::{find_embedded_json, parse_json, JsonExtraction};
pub use sanitize::{sanitize_quotes, QuoteSanitizer};
pub use schema::{BoxedSchema, FnSchema, Refined, SchemaExt, SerdeSchema, ValidationSchema};
pub use shape::{Field, ObjectShape, Shape, ShapeSchema, UnknownKeys};

#[cfg(feature = "strict-validation")]
pub use json_schema::{JsonSchemaCompileError, JsonSchemaValidator};
