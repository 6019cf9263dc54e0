//! Prompter builder.
//!
//! The builder provides a fluent interface for configuring an
//! [`ObjectPrompter`]. Everything is fixed at [`build`](PrompterBuilder::build).

use gptyped_core::{PrompterOptions, SchemaDescriptor, SharedSink, TracingSink};
use gptyped_output::{BoxedSchema, JsonExtraction, QuoteSanitizer, ValidationSchema};
use gptyped_transport::{BoxedTransport, TextTransport};
use serde_json::Value as JsonValue;
use std::sync::Arc;

use crate::hooks::{CodeBlockParser, Interceptors};
use crate::prompt::PromptTemplate;
use crate::prompter::ObjectPrompter;

/// Builder for [`ObjectPrompter`].
pub struct PrompterBuilder<T> {
    transport: BoxedTransport,
    schema: BoxedSchema<T>,
    descriptor: SchemaDescriptor,
    template: PromptTemplate,
    options: PrompterOptions,
    interceptors: Interceptors,
    code_block_parser: Option<CodeBlockParser>,
    extraction: JsonExtraction,
    sanitizer: QuoteSanitizer,
    sink: SharedSink,
}

impl<T: 'static> PrompterBuilder<T> {
    /// Start a builder from the three required parts.
    pub fn new<P, S>(transport: P, schema: S, descriptor: SchemaDescriptor) -> Self
    where
        P: TextTransport + 'static,
        S: ValidationSchema<T> + 'static,
    {
        Self {
            transport: Arc::new(transport),
            schema: Arc::new(schema),
            descriptor,
            template: PromptTemplate::default(),
            options: PrompterOptions::default(),
            interceptors: Interceptors::default(),
            code_block_parser: None,
            extraction: JsonExtraction::default(),
            sanitizer: QuoteSanitizer::default(),
            sink: Arc::new(TracingSink),
        }
    }

    /// Set the opening instruction.
    #[must_use]
    pub fn metaprompt(mut self, text: impl Into<String>) -> Self {
        self.template = self.template.metaprompt(text);
        self
    }

    /// Set the reminder.
    #[must_use]
    pub fn reminder(mut self, text: impl Into<String>) -> Self {
        self.template = self.template.reminder(text);
        self
    }

    /// Set context text spliced into the prompt.
    #[must_use]
    pub fn memory(mut self, text: impl Into<String>) -> Self {
        self.template = self.template.memory(text);
        self
    }

    /// Replace the whole prompt template.
    #[must_use]
    pub fn template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    /// Set runtime options.
    #[must_use]
    pub fn options(mut self, options: PrompterOptions) -> Self {
        self.options = options;
        self
    }

    /// Trace every pipeline stage.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.options = self.options.verbose(verbose);
        self
    }

    /// Emit the constructed prompt.
    #[must_use]
    pub fn log_prompt(mut self, log_prompt: bool) -> Self {
        self.options = self.options.log_prompt(log_prompt);
        self
    }

    /// Transform the prompt before it is sent.
    #[must_use]
    pub fn request_interceptor<F>(mut self, f: F) -> Self
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        self.interceptors = self.interceptors.with_request(f);
        self
    }

    /// Transform the raw reply before sanitization.
    #[must_use]
    pub fn response_interceptor<F>(mut self, f: F) -> Self
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        self.interceptors = self.interceptors.with_response(f);
        self
    }

    /// Transform the JSON candidate before parsing.
    #[must_use]
    pub fn json_interceptor<F>(mut self, f: F) -> Self
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        self.interceptors = self.interceptors.with_json(f);
        self
    }

    /// Transform the parsed value before validation.
    #[must_use]
    pub fn object_interceptor<F>(mut self, f: F) -> Self
    where
        F: Fn(JsonValue) -> JsonValue + Send + Sync + 'static,
    {
        self.interceptors = self.interceptors.with_object(f);
        self
    }

    /// Replace the fenced code-block extractor.
    #[must_use]
    pub fn code_block_parser<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.code_block_parser = Some(Arc::new(f));
        self
    }

    /// Set how the JSON candidate is located.
    #[must_use]
    pub fn json_extraction(mut self, extraction: JsonExtraction) -> Self {
        self.extraction = extraction;
        self
    }

    /// Set the quote sanitizer.
    #[must_use]
    pub fn quote_sanitizer(mut self, sanitizer: QuoteSanitizer) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    /// Send diagnostics somewhere other than `tracing`.
    #[must_use]
    pub fn diagnostics(mut self, sink: SharedSink) -> Self {
        self.sink = sink;
        self
    }

    /// Build the prompter.
    pub fn build(self) -> ObjectPrompter<T> {
        ObjectPrompter {
            transport: self.transport,
            schema: self.schema,
            descriptor: self.descriptor,
            template: self.template,
            options: self.options,
            interceptors: self.interceptors,
            code_block_parser: self.code_block_parser,
            extraction: self.extraction,
            sanitizer: self.sanitizer,
            sink: self.sink,
        }
    }
}

impl<T> std::fmt::Debug for PrompterBuilder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrompterBuilder")
            .field("transport", &self.transport.name())
            .field("descriptor", &self.descriptor)
            .field("template", &self.template)
            .field("options", &self.options)
            .field("interceptors", &self.interceptors)
            .field("extraction", &self.extraction)
            .finish_non_exhaustive()
    }
}
