//! Transport error types.

use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

use crate::settings::DEFAULT_TIMEOUT_SECS;

/// Errors raised while exchanging text with a model endpoint.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The endpoint answered with a non-success status.
    #[error("Endpoint returned HTTP {status}: {body}")]
    Http {
        /// Status code.
        status: u16,
        /// Body text, possibly empty.
        body: String,
        /// Headers worth keeping for diagnostics.
        headers: HashMap<String, String>,
    },

    /// The endpoint reported an error in its own format.
    #[error("Endpoint rejected the request: {message}")]
    Api {
        /// Message from the endpoint.
        message: String,
        /// Machine-readable code, when the endpoint sends one.
        code: Option<String>,
    },

    /// No reply within the configured timeout.
    #[error("No reply within {0:?}")]
    Timeout(Duration),

    /// Too many requests.
    #[error("Rate limited (retry after {retry_after:?})")]
    RateLimited {
        /// Delay suggested by the endpoint.
        retry_after: Option<Duration>,
    },

    /// Missing or rejected credentials.
    #[error("Credentials rejected: {0}")]
    Authentication(String),

    /// The endpoint could not be reached.
    #[error("Could not reach endpoint: {0}")]
    Connection(String),

    /// The endpoint answered, but not with a usable reply.
    #[error("Unusable reply: {0}")]
    InvalidResponse(String),

    /// The transport is not configured correctly.
    #[error("Transport misconfigured: {0}")]
    Configuration(String),

    /// A request or reply body could not be (de)serialized.
    #[error("Malformed body: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Other error, for custom transports.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TransportError {
    /// Whether a caller-level retry has a chance of succeeding.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::RateLimited { .. } | Self::Connection(_) => true,
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Delay suggested by a rate-limit reply.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }

    /// Create an API error.
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
            code: None,
        }
    }

    /// Create an API error carrying the endpoint's code.
    pub fn api_with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
            code: Some(code.into()),
        }
    }

    /// Create a rate-limit error.
    pub fn rate_limited(retry_after: Option<Duration>) -> Self {
        Self::RateLimited { retry_after }
    }

    /// Create an HTTP error.
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
            headers: HashMap::new(),
        }
    }

    /// Create a credentials error.
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    /// Create an unreachable-endpoint error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create an unusable-reply error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// Create a misconfiguration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        // The client does not expose the configured limit; callers that know
        // it map timeouts themselves.
        if err.is_timeout() {
            return Self::Timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        }
        if err.is_connect() {
            return Self::connection(err.to_string());
        }
        match err.status() {
            Some(status) => Self::http(status.as_u16(), err.to_string()),
            None => Self::Other(err.into()),
        }
    }
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;
