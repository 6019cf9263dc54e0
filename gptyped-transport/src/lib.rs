//! # gptyped-transport
//!
//! Text transports for gptyped.
//!
//! A transport takes the fully built prompt and returns the model's raw reply.
//! Everything about the endpoint (model, sampling, timeouts, credentials)
//! lives in the transport, so the prompter only deals with text.
//!
//! - **OpenAI**: Chat Completions (feature: `openai`, default)
//! - **Mock**: queued replies for tests
//! - **Function**: replies computed by a closure, sync or async
//!
//! ## Example
//!
//! ```rust,ignore
//! use gptyped_transport::{CompletionSettings, OpenAIChatTransport, TextTransport};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = OpenAIChatTransport::from_env()?
//!         .with_settings(CompletionSettings::new().temperature(0.0));
//!
//!     let reply = transport.send_text("Reply with {\"ok\": true}").await?;
//!     println!("{reply}");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod mock;
pub mod settings;
pub mod transport;

/// OpenAI Chat Completions.
#[cfg(feature = "openai")]
#[cfg_attr(docsrs, doc(cfg(feature = "openai")))]
pub mod openai;

// Re-exports
pub use error::{TransportError, TransportResult};
pub use mock::{FunctionTransport, MockTransport};
pub use settings::CompletionSettings;
pub use transport::{BoxedTransport, TextTransport};

#[cfg(feature = "openai")]
pub use openai::OpenAIChatTransport;
