//! Prompter error types.

use gptyped_core::JsonFormatError;
use gptyped_output::{SchemaValidationError, ValidationIssue};
use gptyped_transport::TransportError;
use thiserror::Error;

/// Why a `send` produced no value.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The transport failed. Passed through unchanged.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The reply (or its code block) is not valid JSON.
    #[error("Response is not valid JSON: {source}")]
    MalformedResponse {
        /// The text that failed to parse.
        text: String,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },

    /// The JSON does not match the schema.
    #[error(transparent)]
    SchemaMismatch(#[from] SchemaValidationError),

    /// The input payload could not be serialized into the prompt.
    #[error("Failed to serialize input: {0}")]
    Serialization(#[from] JsonFormatError),
}

impl PromptError {
    /// Create a malformed response error.
    pub fn malformed(text: impl Into<String>, source: serde_json::Error) -> Self {
        Self::MalformedResponse {
            text: text.into(),
            source,
        }
    }

    /// Whether the transport failed.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Whether a caller-level retry could help: retryable transport errors,
    /// and replies the model may get right on a second attempt.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_retryable(),
            Self::MalformedResponse { .. } | Self::SchemaMismatch(_) => true,
            Self::Serialization(_) => false,
        }
    }

    /// Validation issues, for schema mismatches.
    #[must_use]
    pub fn issues(&self) -> Option<&[ValidationIssue]> {
        match self {
            Self::SchemaMismatch(e) => Some(&e.issues),
            _ => None,
        }
    }
}

/// Result type for prompter operations.
pub type PromptResult<T> = Result<T, PromptError>;
