//! Completion parameters for HTTP transports.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default model name.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
/// Default completion token limit.
pub const DEFAULT_MAX_TOKENS: u64 = 2000;
/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f64 = 0.4;
/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Settings for a completion request.
///
/// Deserializes from partial documents; missing keys take the defaults.
///
/// ```rust
/// use gptyped_transport::CompletionSettings;
///
/// let settings: CompletionSettings = serde_json::from_str(r#"{"temperature": 0.0}"#).unwrap();
/// assert_eq!(settings.model, "gpt-3.5-turbo");
/// assert_eq!(settings.max_tokens, Some(2000));
/// assert_eq!(settings.temperature, Some(0.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionSettings {
    /// Model name.
    pub model: String,

    /// Completion token limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u64>,

    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Nucleus sampling mass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,

    /// Stop sequences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,

    /// Sampling seed, for endpoints that honor it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Whole-request timeout, in seconds on the wire.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "duration_secs"
    )]
    pub timeout: Option<Duration>,

    /// Extra provider-specific body fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<serde_json::Value>,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: Some(DEFAULT_MAX_TOKENS),
            temperature: Some(DEFAULT_TEMPERATURE),
            top_p: None,
            stop: None,
            seed: None,
            timeout: None,
            extra: None,
        }
    }
}

impl CompletionSettings {
    /// Create settings with the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set max tokens.
    #[must_use]
    pub fn max_tokens(mut self, limit: u64) -> Self {
        self.max_tokens = Some(limit);
        self
    }

    /// Set temperature.
    #[must_use]
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set top-p.
    #[must_use]
    pub fn top_p(mut self, p: f64) -> Self {
        self.top_p = Some(p);
        self
    }

    /// Add a stop sequence.
    #[must_use]
    pub fn add_stop(mut self, sequence: impl Into<String>) -> Self {
        self.stop.get_or_insert_with(Vec::new).push(sequence.into());
        self
    }

    /// Set seed.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    /// Set extra body fields.
    #[must_use]
    pub fn extra(mut self, extra: serde_json::Value) -> Self {
        self.extra = Some(extra);
        self
    }
}

/// Durations as fractional seconds.
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => serializer.serialize_some(&d.as_secs_f64()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = Option::<f64>::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs_f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let settings = CompletionSettings::new();
        assert_eq!(settings.model, "gpt-3.5-turbo");
        assert_eq!(settings.max_tokens, Some(2000));
        assert_eq!(settings.temperature, Some(0.4));
        assert!(settings.timeout.is_none());
    }

    #[test]
    fn test_builder() {
        let settings = CompletionSettings::new()
            .model("gpt-4o-mini")
            .temperature(0.0)
            .add_stop("END")
            .timeout(Duration::from_secs(5));
        assert_eq!(settings.model, "gpt-4o-mini");
        assert_eq!(settings.temperature, Some(0.0));
        assert_eq!(settings.stop, Some(vec!["END".to_string()]));
        assert_eq!(settings.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_timeout_serde_as_seconds() {
        let settings = CompletionSettings::new().timeout(Duration::from_millis(1500));
        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value["timeout"], json!(1.5));

        let back: CompletionSettings = serde_json::from_value(value).unwrap();
        assert_eq!(back.timeout, Some(Duration::from_millis(1500)));
    }
}
