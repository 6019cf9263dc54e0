//! # gptyped - Typed Structured Output for LLMs
//!
//! gptyped turns a language model into a function from a serializable input
//! to a validated Rust value. You describe the output you want, hand over an
//! input payload, and get back either a `T` or an error that says exactly
//! which stage failed.
//!
//! ## Quick Start
//!
//! ```rust
//! use gptyped::prelude::*;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), PromptError> {
//! let schema = ShapeSchema::<Person>::new(
//!     ObjectShape::new()
//!         .required("name", Shape::string())
//!         .required("age", Shape::integer().minimum(0.0)),
//! );
//!
//! // Any `TextTransport` works; this one replies with a canned answer.
//! let transport = FunctionTransport::constant("```json\n{\"name\": \"Ada\", \"age\": 36}\n```");
//!
//! let prompter = ObjectPrompter::for_shape(transport, schema)
//!     .metaprompt("Extract the person described in the input.")
//!     .build();
//!
//! let person = prompter.send("Ada Lovelace, aged 36").await?;
//! assert_eq!(person.name, "Ada");
//! assert_eq!(person.age, 36);
//! # Ok(())
//! # }
//! ```
//!
//! ## Pipeline
//!
//! Every `send` runs the same stages, in order:
//!
//! | Stage | What happens |
//! |-------|--------------|
//! | prompt | metaprompt, memory, reminder, output descriptor, input, `[JSON ONLY]` |
//! | request | request interceptor, then the transport |
//! | response | response interceptor |
//! | sanitize | typographic quotes become ASCII quotes |
//! | extract | first fenced code block, else the whole reply |
//! | parse | JSON interceptor, `serde_json`, object interceptor |
//! | validate | the schema produces `T` |
//!
//! Nothing is retried, and a failure never turns into a default value.
//!
//! ## Feature Flags
//!
//! | Feature | Description | Default |
//! |---------|-------------|--------|
//! | `openai` | OpenAI chat completions transport | ✅ |
//! | `strict-validation` | JSON Schema validation via `jsonschema` | ❌ |
//! | `full` | All features | ❌ |
//!
//! ## Architecture
//!
//! gptyped is organized as a workspace of focused crates:
//!
//! - [`core`] - schema descriptors, JSON formatting, diagnostics, options
//! - [`output`] - sanitization, code-block extraction, parsing, schemas
//! - [`transport`] - the `TextTransport` trait, OpenAI and mock transports
//! - [`prompter`] - prompt templates, interceptors, and the orchestrator

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// ============================================================================
// Crate Re-exports
// ============================================================================

/// Descriptors, formatting, diagnostics, and options.
pub use gptyped_core as core;

/// Reply processing and schema validation.
pub use gptyped_output as output;

/// Text transports.
pub use gptyped_transport as transport;

/// Prompt construction and orchestration.
pub use gptyped_prompter as prompter;

// ============================================================================
// Flat Re-exports
// ============================================================================

// Core
pub use gptyped_core::{
    format_as_json, DiagnosticEvent, DiagnosticLevel, DiagnosticSink, FnSink, JsonFormatError,
    NoopSink, PrompterOptions, SchemaDescriptor, SharedSink, Stage, TracingSink,
};

// Output
pub use gptyped_output::{
    extract_code_block, parse_json, sanitize_quotes, Field, FnSchema, JsonExtraction, ObjectShape,
    QuoteSanitizer, SchemaExt, SchemaValidationError, SerdeSchema, Shape, ShapeSchema,
    UnknownKeys, ValidationIssue, ValidationSchema,
};

#[cfg(feature = "strict-validation")]
#[cfg_attr(docsrs, doc(cfg(feature = "strict-validation")))]
pub use gptyped_output::JsonSchemaValidator;

// Transport
pub use gptyped_transport::{
    BoxedTransport, CompletionSettings, FunctionTransport, MockTransport, TextTransport,
    TransportError,
};

#[cfg(feature = "openai")]
#[cfg_attr(docsrs, doc(cfg(feature = "openai")))]
pub use gptyped_transport::OpenAIChatTransport;

// Prompter
pub use gptyped_prompter::{
    Interceptors, ObjectPrompter, PromptError, PromptResult, PromptTemplate, Prompter,
    PrompterBuilder,
};

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```rust
/// use gptyped::prelude::*;
/// ```
pub mod prelude {
    pub use gptyped_core::{PrompterOptions, SchemaDescriptor};
    pub use gptyped_output::{
        Field, JsonExtraction, ObjectShape, QuoteSanitizer, SchemaExt, SerdeSchema, Shape,
        ShapeSchema, ValidationSchema,
    };
    pub use gptyped_prompter::{ObjectPrompter, PromptError, PromptResult, Prompter};
    pub use gptyped_transport::{FunctionTransport, MockTransport, TextTransport, TransportError};

    #[cfg(feature = "openai")]
    pub use gptyped_transport::OpenAIChatTransport;
}
