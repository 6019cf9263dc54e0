//! Mock and function-based transports for testing.
//!
//! - [`MockTransport`]: replies from a pre-configured queue
//! - [`FunctionTransport`]: replies computed from the prompt
//!
//! # Examples
//!
//! ```rust
//! use gptyped_transport::{FunctionTransport, MockTransport};
//!
//! let mock = MockTransport::new()
//!     .with_reply("{\"a\": 1}")
//!     .with_reply("{\"a\": 2}");
//!
//! let echo = FunctionTransport::new(|prompt| Ok(prompt.to_string()));
//! ```

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::TransportError;
use crate::transport::TextTransport;

// ============================================================================
// MockTransport - Simple pre-configured mock
// ============================================================================

/// Returns queued replies in order and records every prompt it receives.
///
/// When the queue is empty the fallback reply is returned; without a
/// fallback, an [`InvalidResponse`](TransportError::InvalidResponse) error.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    replies: Arc<Mutex<VecDeque<Result<String, String>>>>,
    fallback: Option<String>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockTransport {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply.
    #[must_use]
    pub fn with_reply(self, text: impl Into<String>) -> Self {
        self.replies.lock().push_back(Ok(text.into()));
        self
    }

    /// Queue a connection failure.
    #[must_use]
    pub fn with_error(self, message: impl Into<String>) -> Self {
        self.replies.lock().push_back(Err(message.into()));
        self
    }

    /// Reply returned once the queue is exhausted.
    #[must_use]
    pub fn with_fallback(mut self, text: impl Into<String>) -> Self {
        self.fallback = Some(text.into());
        self
    }

    /// Prompts received so far, oldest first.
    pub fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    /// The most recent prompt.
    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().last().cloned()
    }

    /// Number of exchanges so far.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().len()
    }

    /// Clear recorded prompts.
    pub fn clear_prompts(&self) {
        self.prompts.lock().clear();
    }
}

#[async_trait]
impl TextTransport for MockTransport {
    async fn send_text(&self, prompt: &str) -> Result<String, TransportError> {
        self.prompts.lock().push(prompt.to_string());

        let next = self.replies.lock().pop_front();
        match next {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(TransportError::Connection(message)),
            None => self
                .fallback
                .clone()
                .ok_or_else(|| TransportError::invalid_response("MockTransport has no replies left")),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

// ============================================================================
// FunctionTransport - Dynamic function-based transport
// ============================================================================

/// Future returned by async transport functions.
pub type TransportFuture = Pin<Box<dyn Future<Output = Result<String, TransportError>> + Send>>;

/// Synchronous transport function.
pub type FunctionDef = Box<dyn Fn(&str) -> Result<String, TransportError> + Send + Sync>;

/// Asynchronous transport function.
pub type AsyncFunctionDef = Box<dyn Fn(String) -> TransportFuture + Send + Sync>;

#[derive(Clone)]
enum Handler {
    Sync(Arc<FunctionDef>),
    Async(Arc<AsyncFunctionDef>),
}

/// A transport controlled by a local function.
///
/// Wraps an existing client call or computes replies from the prompt.
///
/// ```rust
/// use gptyped_transport::{FunctionTransport, TextTransport};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let transport = FunctionTransport::from_async(|prompt| async move {
///     Ok(format!("{{\"length\": {}}}", prompt.len()))
/// });
/// assert_eq!(transport.send_text("abc").await.unwrap(), "{\"length\": 3}");
/// # }
/// ```
#[derive(Clone)]
pub struct FunctionTransport {
    name: String,
    handler: Handler,
}

impl std::fmt::Debug for FunctionTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.handler {
            Handler::Sync(_) => "sync",
            Handler::Async(_) => "async",
        };
        f.debug_struct("FunctionTransport")
            .field("name", &self.name)
            .field("kind", &kind)
            .finish()
    }
}

impl FunctionTransport {
    /// Create a transport from a synchronous function.
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(&str) -> Result<String, TransportError> + Send + Sync + 'static,
    {
        Self {
            name: "function".to_string(),
            handler: Handler::Sync(Arc::new(Box::new(function))),
        }
    }

    /// Create a transport from an async function.
    pub fn from_async<F, Fut>(function: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, TransportError>> + Send + 'static,
    {
        let boxed: AsyncFunctionDef = Box::new(move |prompt| Box::pin(function(prompt)));
        Self {
            name: "function".to_string(),
            handler: Handler::Async(Arc::new(boxed)),
        }
    }

    /// Set a custom name for logs.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

// ============================================================================
// FunctionTransport convenience constructors
// ============================================================================

impl FunctionTransport {
    /// Always reply with the same text.
    pub fn constant(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(move |_| Ok(text.clone()))
    }

    /// Reply with the prompt itself.
    pub fn echo() -> Self {
        Self::new(|prompt| Ok(prompt.to_string()))
    }

    /// Cycle through replies, starting over when exhausted.
    pub fn cycle(replies: Vec<String>) -> Self {
        let counter = AtomicUsize::new(0);
        Self::new(move |_| {
            if replies.is_empty() {
                return Err(TransportError::invalid_response("No replies configured"));
            }
            let idx = counter.fetch_add(1, Ordering::SeqCst) % replies.len();
            Ok(replies[idx].clone())
        })
    }

    /// Always fail with the given error message.
    pub fn failing(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(move |_| Err(TransportError::Connection(message.clone())))
    }
}

#[async_trait]
impl TextTransport for FunctionTransport {
    async fn send_text(&self, prompt: &str) -> Result<String, TransportError> {
        match &self.handler {
            Handler::Sync(f) => f(prompt),
            Handler::Async(f) => f(prompt.to_string()).await,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_replies_in_order() {
        let mock = MockTransport::new().with_reply("one").with_reply("two");
        assert_eq!(mock.send_text("a").await.unwrap(), "one");
        assert_eq!(mock.send_text("b").await.unwrap(), "two");
        assert!(matches!(
            mock.send_text("c").await,
            Err(TransportError::InvalidResponse(_))
        ));
        assert_eq!(mock.recorded_prompts(), vec!["a", "b", "c"]);
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_fallback_and_errors() {
        let mock = MockTransport::new().with_error("refused").with_fallback("{}");
        assert!(matches!(
            mock.send_text("a").await,
            Err(TransportError::Connection(ref m)) if m == "refused"
        ));
        assert_eq!(mock.send_text("b").await.unwrap(), "{}");
        assert_eq!(mock.send_text("c").await.unwrap(), "{}");
        assert_eq!(mock.last_prompt().as_deref(), Some("c"));

        mock.clear_prompts();
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_clones_share_state() {
        let mock = MockTransport::new().with_reply("x");
        let clone = mock.clone();
        clone.send_text("p").await.unwrap();
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_function_constant_and_echo() {
        assert_eq!(FunctionTransport::constant("hi").send_text("x").await.unwrap(), "hi");
        assert_eq!(FunctionTransport::echo().send_text("x").await.unwrap(), "x");
    }

    #[tokio::test]
    async fn test_function_cycle() {
        let transport = FunctionTransport::cycle(vec!["a".into(), "b".into()]);
        let mut out = Vec::new();
        for _ in 0..3 {
            out.push(transport.send_text("").await.unwrap());
        }
        assert_eq!(out, vec!["a", "b", "a"]);

        assert!(FunctionTransport::cycle(vec![]).send_text("").await.is_err());
    }

    #[tokio::test]
    async fn test_function_async() {
        let transport = FunctionTransport::from_async(|prompt| async move {
            tokio::task::yield_now().await;
            Ok(prompt.to_uppercase())
        })
        .with_name("upper");
        assert_eq!(transport.send_text("abc").await.unwrap(), "ABC");
        assert_eq!(transport.name(), "upper");
    }

    #[tokio::test]
    async fn test_function_failing() {
        let err = FunctionTransport::failing("down").send_text("x").await.unwrap_err();
        assert!(err.is_retryable());
    }
}
