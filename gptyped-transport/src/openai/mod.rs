//! OpenAI transport.
//!
//! ```rust,ignore
//! use gptyped_transport::openai::OpenAIChatTransport;
//! use gptyped_transport::TextTransport;
//!
//! let transport = OpenAIChatTransport::new(std::env::var("OPENAI_API_KEY")?);
//! let reply = transport.send_text("Reply with {\"ok\": true}").await?;
//! ```

pub mod chat;
pub mod types;

// Re-exports
pub use chat::OpenAIChatTransport;
pub use types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// Create an OpenAI chat transport with default settings.
pub fn chat(api_key: impl Into<String>) -> OpenAIChatTransport {
    OpenAIChatTransport::new(api_key)
}
