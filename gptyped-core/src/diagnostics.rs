//! Stage-tagged diagnostics.
//!
//! A prompter reports what it is doing through a single [`DiagnosticSink`]
//! instead of writing to an output stream directly. The default sink,
//! [`TracingSink`], forwards events to `tracing`; tests and applications can
//! capture them with [`FnSink`].

use std::fmt;
use std::sync::Arc;

/// Pipeline stage that produced a diagnostic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Prompt construction.
    Prompt,
    /// Outgoing request to the transport.
    Request,
    /// Reply received from the transport.
    Response,
    /// Quote normalization.
    Sanitize,
    /// Code-block extraction.
    Extract,
    /// JSON parsing.
    Parse,
    /// Schema validation.
    Validate,
    /// Request finished.
    Complete,
}

impl Stage {
    /// Short lowercase name, used as a structured field value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prompt => "prompt",
            Self::Request => "request",
            Self::Response => "response",
            Self::Sanitize => "sanitize",
            Self::Extract => "extract",
            Self::Parse => "parse",
            Self::Validate => "validate",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a diagnostic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticLevel {
    /// Normal progress.
    Info,
    /// A stage failed; the error is about to be returned.
    Error,
}

/// A single diagnostic event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticEvent {
    /// Stage that emitted the event.
    pub stage: Stage,
    /// Severity.
    pub level: DiagnosticLevel,
    /// Human-readable message.
    pub message: String,
}

impl DiagnosticEvent {
    /// Create an info event.
    pub fn info(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            stage,
            level: DiagnosticLevel::Info,
            message: message.into(),
        }
    }

    /// Create an error event.
    pub fn error(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            stage,
            level: DiagnosticLevel::Error,
            message: message.into(),
        }
    }

    /// Whether this is an error event.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == DiagnosticLevel::Error
    }
}

impl fmt::Display for DiagnosticEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.stage, self.message)
    }
}

/// Receiver for diagnostic events.
pub trait DiagnosticSink: Send + Sync {
    /// Handle one event.
    fn emit(&self, event: &DiagnosticEvent);
}

/// Shared, type-erased sink.
pub type SharedSink = Arc<dyn DiagnosticSink>;

/// Sink that forwards events to `tracing` under the `gptyped::prompter` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, event: &DiagnosticEvent) {
        match event.level {
            DiagnosticLevel::Info => {
                tracing::info!(target: "gptyped::prompter", stage = %event.stage, "{}", event.message);
            }
            DiagnosticLevel::Error => {
                tracing::error!(target: "gptyped::prompter", stage = %event.stage, "{}", event.message);
            }
        }
    }
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn emit(&self, _event: &DiagnosticEvent) {}
}

/// Sink backed by a closure.
///
/// ```rust
/// use gptyped_core::{DiagnosticEvent, DiagnosticSink, FnSink, Stage};
/// use std::sync::{Arc, Mutex};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let captured = seen.clone();
/// let sink = FnSink::new(move |event: &DiagnosticEvent| {
///     captured.lock().unwrap().push(event.stage);
/// });
///
/// sink.emit(&DiagnosticEvent::info(Stage::Parse, "parsing"));
/// assert_eq!(*seen.lock().unwrap(), vec![Stage::Parse]);
/// ```
pub struct FnSink<F> {
    func: F,
}

impl<F> FnSink<F>
where
    F: Fn(&DiagnosticEvent) + Send + Sync,
{
    /// Create a new closure sink.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> DiagnosticSink for FnSink<F>
where
    F: Fn(&DiagnosticEvent) + Send + Sync,
{
    fn emit(&self, event: &DiagnosticEvent) {
        (self.func)(event);
    }
}

impl<F> fmt::Debug for FnSink<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSink").finish()
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Arc<S> {
    fn emit(&self, event: &DiagnosticEvent) {
        (**self).emit(event);
    }
}
