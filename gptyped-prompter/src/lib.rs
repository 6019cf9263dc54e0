//! # gptyped-prompter
//!
//! Prompt a model, get a validated Rust value back.
//!
//! [`ObjectPrompter`] composes the pieces from the other gptyped crates into
//! one pipeline:
//!
//! 1. render the prompt from a [`SchemaDescriptor`](gptyped_core::SchemaDescriptor)
//!    and the input payload ([`PromptTemplate`])
//! 2. request interceptor, then the [`TextTransport`](gptyped_transport::TextTransport)
//! 3. response interceptor, then quote sanitization
//! 4. first fenced code block, or the whole reply
//! 5. JSON interceptor, parse, object interceptor
//! 6. schema validation into `T`
//!
//! Failures surface as [`PromptError`]; nothing is retried and no default is
//! substituted.
//!
//! ## Example
//!
//! ```rust
//! use gptyped_output::{ObjectShape, Shape, ShapeSchema};
//! use gptyped_prompter::ObjectPrompter;
//! use gptyped_transport::FunctionTransport;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct Sentiment {
//!     label: String,
//!     score: f64,
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let schema = ShapeSchema::<Sentiment>::new(
//!     ObjectShape::new()
//!         .required("label", Shape::enumeration(["positive", "negative"]))
//!         .required("score", Shape::number().minimum(0.0).maximum(1.0)),
//! );
//!
//! let transport = FunctionTransport::constant(r#"{"label": "positive", "score": 0.9}"#);
//! let prompter = ObjectPrompter::for_shape(transport, schema)
//!     .metaprompt("Classify the sentiment of the input.")
//!     .build();
//!
//! let result = prompter.send("What a lovely day").await.unwrap();
//! assert_eq!(result.label, "positive");
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod builder;
pub mod error;
pub mod hooks;
pub mod prompt;
pub mod prompter;

// Re-exports
pub use builder::PrompterBuilder;
pub use error::{PromptError, PromptResult};
pub use hooks::{CodeBlockParser, Interceptors, ObjectHook, TextHook};
pub use prompt::PromptTemplate;
pub use prompter::{ObjectPrompter, Prompter};
