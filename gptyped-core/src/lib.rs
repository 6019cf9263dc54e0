//! # gptyped-core
//!
//! Core types shared by every gptyped crate.
//!
//! - **Descriptor**: the shape description injected into prompts
//! - **Format**: deterministic JSON rendering for prompt blocks
//! - **Options**: runtime flags for a prompter (`verbose`, `log_prompt`)
//! - **Diagnostics**: stage-tagged trace events and the sinks that receive them
//!
//! ## Example
//!
//! ```rust
//! use gptyped_core::{format_as_json, SchemaDescriptor};
//!
//! let descriptor = SchemaDescriptor::new()
//!     .field("name", "string")
//!     .field("age", "number");
//!
//! let rendered = format_as_json(&descriptor).unwrap();
//! assert!(rendered.starts_with("{\n    \"name\""));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod descriptor;
pub mod diagnostics;
pub mod format;
pub mod options;

// Re-exports for convenience
pub use descriptor::SchemaDescriptor;
pub use diagnostics::{
    DiagnosticEvent, DiagnosticLevel, DiagnosticSink, FnSink, NoopSink, SharedSink, Stage,
    TracingSink,
};
pub use format::{format_as_json, format_as_json_with_options, JsonFormatError, JsonFormatOptions};
pub use options::PrompterOptions;
