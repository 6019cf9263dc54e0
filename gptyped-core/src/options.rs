//! Prompter runtime options.
//!
//! These flags only control diagnostics. They never change the value a
//! prompter returns.

use serde::{Deserialize, Serialize};

/// Runtime options for a prompter.
///
/// Deserializes from partial configuration; missing keys fall back to
/// `false`.
///
/// ```rust
/// use gptyped_core::PrompterOptions;
///
/// let options: PrompterOptions = serde_json::from_str(r#"{"verbose": true}"#).unwrap();
/// assert!(options.verbose);
/// assert!(!options.log_prompt);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrompterOptions {
    /// Emit a step-by-step trace of each request.
    pub verbose: bool,

    /// Emit the constructed prompt before it is sent.
    pub log_prompt: bool,
}

impl PrompterOptions {
    /// Create options with everything disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbose tracing.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set prompt logging.
    #[must_use]
    pub fn log_prompt(mut self, log_prompt: bool) -> Self {
        self.log_prompt = log_prompt;
        self
    }

    /// Whether any diagnostic output is enabled.
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        !self.verbose && !self.log_prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_quiet() {
        let options = PrompterOptions::new();
        assert!(!options.verbose);
        assert!(!options.log_prompt);
        assert!(options.is_quiet());
    }

    #[test]
    fn test_builder() {
        let options = PrompterOptions::new().verbose(true).log_prompt(true);
        assert!(options.verbose);
        assert!(options.log_prompt);
        assert!(!options.is_quiet());
    }

    #[test]
    fn test_camel_case_config() {
        let options: PrompterOptions = serde_json::from_str(r#"{"logPrompt": true}"#).unwrap();
        assert!(options.log_prompt);
        assert!(!options.verbose);

        let json = serde_json::to_value(options).unwrap();
        assert_eq!(json, serde_json::json!({"verbose": false, "logPrompt": true}));
    }
}
