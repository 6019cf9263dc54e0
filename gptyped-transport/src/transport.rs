//! The text transport contract.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::TransportError;

/// Sends a prompt to a model and returns its raw reply text.
///
/// Implementations own everything about the exchange: endpoint, model
/// parameters, timeouts, authentication. Callers only see text in and text
/// out.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use gptyped_transport::{TextTransport, TransportError};
///
/// struct Shouting;
///
/// #[async_trait]
/// impl TextTransport for Shouting {
///     async fn send_text(&self, prompt: &str) -> Result<String, TransportError> {
///         Ok(prompt.to_uppercase())
///     }
/// }
/// ```
#[async_trait]
pub trait TextTransport: Send + Sync {
    /// Send `prompt` and wait for the reply.
    async fn send_text(&self, prompt: &str) -> Result<String, TransportError>;

    /// Short name for logs.
    fn name(&self) -> &str {
        "custom"
    }
}

/// Boxed transport for dynamic dispatch.
pub type BoxedTransport = Arc<dyn TextTransport>;

#[async_trait]
impl<T: TextTransport + ?Sized> TextTransport for Arc<T> {
    async fn send_text(&self, prompt: &str) -> Result<String, TransportError> {
        (**self).send_text(prompt).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[async_trait]
impl<T: TextTransport + ?Sized> TextTransport for Box<T> {
    async fn send_text(&self, prompt: &str) -> Result<String, TransportError> {
        (**self).send_text(prompt).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
