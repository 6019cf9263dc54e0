//! Interceptors and the pluggable code-block parser.
//!
//! Each interceptor is a pure transform at one fixed stage. An unset hook
//! passes its value through unchanged.

use serde_json::Value as JsonValue;
use std::fmt;
use std::sync::Arc;

/// `String -> String` hook.
pub type TextHook = Arc<dyn Fn(String) -> String + Send + Sync>;

/// `Value -> Value` hook.
pub type ObjectHook = Arc<dyn Fn(JsonValue) -> JsonValue + Send + Sync>;

/// Replacement for the default fenced-block extractor.
///
/// Returns the JSON candidate, or `None` to fall back to the whole reply.
/// `Some("")` falls back the same way.
pub type CodeBlockParser = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// The four interception points of a prompter.
#[derive(Clone, Default)]
pub struct Interceptors {
    request: Option<TextHook>,
    response: Option<TextHook>,
    json: Option<TextHook>,
    object: Option<ObjectHook>,
}

impl Interceptors {
    /// No interceptors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Transform the built prompt before it is sent.
    #[must_use]
    pub fn with_request<F>(mut self, f: F) -> Self
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        self.request = Some(Arc::new(f));
        self
    }

    /// Transform the raw reply before sanitization.
    #[must_use]
    pub fn with_response<F>(mut self, f: F) -> Self
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        self.response = Some(Arc::new(f));
        self
    }

    /// Transform the JSON candidate before parsing.
    #[must_use]
    pub fn with_json<F>(mut self, f: F) -> Self
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        self.json = Some(Arc::new(f));
        self
    }

    /// Transform the parsed value before validation.
    #[must_use]
    pub fn with_object<F>(mut self, f: F) -> Self
    where
        F: Fn(JsonValue) -> JsonValue + Send + Sync + 'static,
    {
        self.object = Some(Arc::new(f));
        self
    }

    /// Apply the request hook.
    pub fn apply_request(&self, prompt: String) -> String {
        apply(&self.request, prompt)
    }

    /// Apply the response hook.
    pub fn apply_response(&self, reply: String) -> String {
        apply(&self.response, reply)
    }

    /// Apply the JSON hook.
    pub fn apply_json(&self, candidate: String) -> String {
        apply(&self.json, candidate)
    }

    /// Apply the object hook.
    pub fn apply_object(&self, value: JsonValue) -> JsonValue {
        match &self.object {
            Some(hook) => hook(value),
            None => value,
        }
    }
}

fn apply(hook: &Option<TextHook>, text: String) -> String {
    match hook {
        Some(hook) => hook(text),
        None => text,
    }
}

impl fmt::Debug for Interceptors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interceptors")
            .field("request", &self.request.is_some())
            .field("response", &self.response.is_some())
            .field("json", &self.json.is_some())
            .field("object", &self.object.is_some())
            .finish()
    }
}
