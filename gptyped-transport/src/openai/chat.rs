//! OpenAI Chat Completions transport.

use super::types::*;
use crate::error::TransportError;
use crate::settings::{CompletionSettings, DEFAULT_TIMEOUT_SECS};
use crate::transport::TextTransport;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Sends each prompt as a single user message to `/chat/completions` and
/// returns the first choice's content.
#[derive(Debug, Clone)]
pub struct OpenAIChatTransport {
    client: Client,
    api_key: String,
    base_url: String,
    organization: Option<String>,
    settings: CompletionSettings,
    default_timeout: Duration,
}

impl OpenAIChatTransport {
    /// Create a transport with default settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            organization: None,
            settings: CompletionSettings::default(),
            default_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create from `OPENAI_API_KEY`, honoring `OPENAI_BASE_URL` when set.
    pub fn from_env() -> Result<Self, TransportError> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            TransportError::configuration("OPENAI_API_KEY environment variable not set")
        })?;
        let transport = Self::new(api_key);
        Ok(match std::env::var("OPENAI_BASE_URL") {
            Ok(url) if !url.is_empty() => transport.with_base_url(url),
            _ => transport,
        })
    }

    /// Set the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the organization ID.
    #[must_use]
    pub fn with_organization(mut self, org: impl Into<String>) -> Self {
        self.organization = Some(org.into());
        self
    }

    /// Set a custom HTTP client.
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Replace the completion settings.
    #[must_use]
    pub fn with_settings(mut self, settings: CompletionSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the model name.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.settings.model = model.into();
        self
    }

    /// Set the timeout used when the settings carry none.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Current completion settings.
    #[must_use]
    pub fn settings(&self) -> &CompletionSettings {
        &self.settings
    }

    fn build_request(&self, prompt: &str) -> ChatCompletionRequest {
        let mut request =
            ChatCompletionRequest::new(self.settings.model.clone(), vec![ChatMessage::user(prompt)]);
        request.temperature = self.settings.temperature;
        request.top_p = self.settings.top_p;
        request.max_tokens = self.settings.max_tokens;
        request.stop = self.settings.stop.clone();
        request.seed = self.settings.seed;

        match &self.settings.extra {
            Some(serde_json::Value::Object(extra)) => request.extra = extra.clone(),
            Some(other) => debug!(extra = %other, "Ignoring non-object extra settings"),
            None => {}
        }
        request
    }

    fn parse_response(resp: ChatCompletionResponse) -> Result<String, TransportError> {
        let choice = resp
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| TransportError::invalid_response("No choices in response"))?;

        if let Some(refusal) = choice.message.refusal {
            return Err(TransportError::api_with_code(refusal, "refusal"));
        }

        choice
            .message
            .content
            .ok_or_else(|| TransportError::invalid_response("Choice has no message content"))
    }

    fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
        headers
            .get("retry-after")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_secs)
    }

    /// Map a non-success reply onto the error taxonomy.
    fn handle_error_response(status: u16, body: &str, headers: &HeaderMap) -> TransportError {
        if status == 429 {
            return TransportError::rate_limited(Self::parse_retry_after(headers));
        }

        if let Ok(err) = serde_json::from_str::<OpenAIError>(body) {
            if status == 401 {
                return TransportError::auth(err.error.message);
            }
            if status >= 500 {
                return TransportError::http(status, err.error.message);
            }
            return TransportError::Api {
                message: err.error.message,
                code: err.error.code,
            };
        }

        if status == 401 {
            return TransportError::auth(body);
        }

        TransportError::http(status, body)
    }
}

#[async_trait]
impl TextTransport for OpenAIChatTransport {
    async fn send_text(&self, prompt: &str) -> Result<String, TransportError> {
        let body = self.build_request(prompt);
        let timeout = self.settings.timeout.unwrap_or(self.default_timeout);

        debug!(
            model = %body.model,
            prompt_len = prompt.len(),
            timeout_secs = timeout.as_secs_f64(),
            "Sending chat completion request"
        );

        let mut request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .timeout(timeout);

        if let Some(ref org) = self.organization {
            request = request.header("OpenAI-Organization", org);
        }

        let response = request.json(&body).send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(timeout)
            } else {
                TransportError::from(e)
            }
        })?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let headers = response.headers().clone();
            let body = response.text().await.unwrap_or_default();
            debug!(status, "Chat completion request failed");
            return Err(Self::handle_error_response(status, &body, &headers));
        }

        let resp: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| TransportError::invalid_response(e.to_string()))?;

        if let Some(usage) = resp.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Chat completion finished"
            );
        }

        Self::parse_response(resp)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn completion(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "model": "gpt-3.5-turbo",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        })
    }

    #[test]
    fn test_build_request_uses_settings() {
        let transport = OpenAIChatTransport::new("key")
            .with_settings(CompletionSettings::new().model("gpt-4o").seed(7));
        let req = transport.build_request("Hello");

        assert_eq!(req.model, "gpt-4o");
        assert_eq!(req.max_tokens, Some(2000));
        assert_eq!(req.temperature, Some(0.4));
        assert_eq!(req.seed, Some(7));
        assert_eq!(req.messages, vec![ChatMessage::user("Hello")]);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let transport = OpenAIChatTransport::new("key").with_base_url("http://localhost:1234/v1/");
        assert_eq!(transport.base_url, "http://localhost:1234/v1");
    }

    #[tokio::test]
    async fn test_send_text_returns_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-3.5-turbo",
                "max_tokens": 2000,
                "messages": [{"role": "user", "content": "prompt text"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("{\"ok\": true}")))
            .expect(1)
            .mount(&server)
            .await;

        let transport = OpenAIChatTransport::new("sk-test").with_base_url(server.uri());
        let reply = transport.send_text("prompt text").await.unwrap();
        assert_eq!(reply, "{\"ok\": true}");
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Incorrect API key", "type": "invalid_request_error", "code": "invalid_api_key"}
            })))
            .mount(&server)
            .await;

        let transport = OpenAIChatTransport::new("bad").with_base_url(server.uri());
        let err = transport.send_text("x").await.unwrap_err();
        assert!(matches!(err, TransportError::Authentication(ref m) if m == "Incorrect API key"));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_rate_limited_with_retry_after() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "12"))
            .mount(&server)
            .await;

        let transport = OpenAIChatTransport::new("key").with_base_url(server.uri());
        let err = transport.send_text("x").await.unwrap_err();
        assert_eq!(err.retry_after(), Some(Duration::from_secs(12)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_api_error_keeps_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": {"message": "The model does not exist", "code": "model_not_found"}
            })))
            .mount(&server)
            .await;

        let transport = OpenAIChatTransport::new("key").with_base_url(server.uri());
        let err = transport.send_text("x").await.unwrap_err();
        match err {
            TransportError::Api { message, code } => {
                assert_eq!(message, "The model does not exist");
                assert_eq!(code.as_deref(), Some("model_not_found"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_server_error_is_http() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let transport = OpenAIChatTransport::new("key").with_base_url(server.uri());
        let err = transport.send_text("x").await.unwrap_err();
        assert!(matches!(err, TransportError::Http { status: 503, .. }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_no_choices_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let transport = OpenAIChatTransport::new("key").with_base_url(server.uri());
        let err = transport.send_text("x").await.unwrap_err();
        assert!(matches!(err, TransportError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion("late"))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let transport = OpenAIChatTransport::new("key")
            .with_base_url(server.uri())
            .with_timeout(Duration::from_millis(50));
        let err = transport.send_text("x").await.unwrap_err();
        assert!(matches!(err, TransportError::Timeout(d) if d == Duration::from_millis(50)));
    }
}
