//! The object prompter.

use async_trait::async_trait;
use gptyped_core::{DiagnosticEvent, PrompterOptions, SchemaDescriptor, SharedSink, Stage};
use gptyped_output::{
    extract_code_block, find_embedded_json, parse_json, BoxedSchema, JsonExtraction,
    QuoteSanitizer, ShapeSchema, ValidationSchema,
};
use gptyped_transport::{BoxedTransport, TextTransport};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::builder::PrompterBuilder;
use crate::error::{PromptError, PromptResult};
use crate::hooks::{CodeBlockParser, Interceptors};
use crate::prompt::PromptTemplate;

/// Anything that turns an input payload into a typed value.
#[async_trait]
pub trait Prompter<T>: Send + Sync {
    /// Run one exchange for `input`.
    async fn send<I>(&self, input: &I) -> PromptResult<T>
    where
        I: Serialize + Sync + ?Sized;
}

/// Prompts a model and returns a validated `T`.
///
/// One transport exchange per [`send`](Self::send); no retries. All
/// configuration is fixed at build time and `send` takes `&self`, so a single
/// prompter can serve concurrent calls.
///
/// # Example
///
/// ```rust
/// use gptyped_core::SchemaDescriptor;
/// use gptyped_output::SerdeSchema;
/// use gptyped_prompter::ObjectPrompter;
/// use gptyped_transport::MockTransport;
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize)]
/// struct Answer {
///     value: i64,
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let transport = MockTransport::new().with_reply("```json\n{\"value\": 4}\n```");
/// let prompter = ObjectPrompter::builder(
///     transport,
///     SerdeSchema::<Answer>::new(),
///     SchemaDescriptor::new().field("value", "integer"),
/// )
/// .metaprompt("Add the numbers.")
/// .build();
///
/// let answer = prompter.send(&serde_json::json!([2, 2])).await.unwrap();
/// assert_eq!(answer.value, 4);
/// # }
/// ```
pub struct ObjectPrompter<T> {
    pub(crate) transport: BoxedTransport,
    pub(crate) schema: BoxedSchema<T>,
    pub(crate) descriptor: SchemaDescriptor,
    pub(crate) template: PromptTemplate,
    pub(crate) options: PrompterOptions,
    pub(crate) interceptors: Interceptors,
    pub(crate) code_block_parser: Option<CodeBlockParser>,
    pub(crate) extraction: JsonExtraction,
    pub(crate) sanitizer: QuoteSanitizer,
    pub(crate) sink: SharedSink,
}

impl<T: 'static> ObjectPrompter<T> {
    /// Start building a prompter.
    pub fn builder<P, S>(transport: P, schema: S, descriptor: SchemaDescriptor) -> PrompterBuilder<T>
    where
        P: TextTransport + 'static,
        S: ValidationSchema<T> + 'static,
    {
        PrompterBuilder::new(transport, schema, descriptor)
    }

    /// Start building a prompter whose descriptor is derived from a shape.
    pub fn for_shape<P>(transport: P, schema: ShapeSchema<T>) -> PrompterBuilder<T>
    where
        P: TextTransport + 'static,
        T: DeserializeOwned,
    {
        let descriptor = schema.descriptor().unwrap_or_default();
        PrompterBuilder::new(transport, schema, descriptor)
    }
}

impl<T> ObjectPrompter<T> {
    /// The descriptor embedded in every prompt.
    #[must_use]
    pub fn descriptor(&self) -> &SchemaDescriptor {
        &self.descriptor
    }

    /// Runtime options.
    #[must_use]
    pub fn options(&self) -> &PrompterOptions {
        &self.options
    }

    /// Build the prompt for `input` without sending it.
    pub fn render_prompt<I: Serialize + ?Sized>(&self, input: &I) -> PromptResult<String> {
        Ok(self.template.render(&self.descriptor, input)?)
    }

    /// Prompt the model with `input` and validate the reply.
    ///
    /// # Errors
    ///
    /// - [`PromptError::Serialization`] if `input` cannot be serialized
    /// - [`PromptError::Transport`] if the exchange fails
    /// - [`PromptError::MalformedResponse`] if no JSON can be parsed from the reply
    /// - [`PromptError::SchemaMismatch`] if the JSON does not fit the schema
    pub async fn send<I>(&self, input: &I) -> PromptResult<T>
    where
        I: Serialize + Sync + ?Sized,
    {
        let prompt = self.render_prompt(input)?;
        if self.options.log_prompt {
            self.emit(Stage::Prompt, || format!("Prompt:\n{prompt}"));
        } else {
            self.trace(Stage::Prompt, || format!("Built prompt of {} characters", prompt.len()));
        }

        let prompt = self.interceptors.apply_request(prompt);
        debug!(
            transport = self.transport.name(),
            prompt_len = prompt.len(),
            "Sending prompt"
        );
        self.trace(Stage::Request, || {
            format!("Sending {} characters via {}", prompt.len(), self.transport.name())
        });

        let reply = self.transport.send_text(&prompt).await?;
        self.trace(Stage::Response, || format!("Response:\n{reply}"));

        let reply = self.interceptors.apply_response(reply);
        let sanitized = self.sanitizer.sanitize(&reply).into_owned();
        self.trace(Stage::Sanitize, || format!("Sanitized response:\n{sanitized}"));

        // An empty block carries nothing to parse; use the whole reply instead.
        let block = match &self.code_block_parser {
            Some(parser) => parser(&sanitized),
            None => extract_code_block(&sanitized),
        }
        .filter(|body| !body.is_empty());
        let found_block = block.is_some();
        self.trace(Stage::Extract, || match &block {
            Some(body) => format!("Found code block:\n{body}"),
            None => "No code block found, using the whole response".to_string(),
        });

        let candidate = self
            .interceptors
            .apply_json(block.unwrap_or_else(|| sanitized.clone()));

        let value = match self.parse_candidate(&candidate, found_block) {
            Ok(value) => value,
            Err(source) => {
                self.fail(Stage::Parse, || {
                    format!("Failed to parse JSON from response:\n{sanitized}")
                });
                return Err(PromptError::malformed(candidate, source));
            }
        };
        self.trace(Stage::Parse, || format!("Parsed JSON:\n{value}"));

        let value = self.interceptors.apply_object(value);
        match self.schema.validate(value) {
            Ok(typed) => {
                self.trace(Stage::Complete, || "Validated response".to_string());
                Ok(typed)
            }
            Err(err) => {
                self.fail(Stage::Validate, || err.to_string());
                Err(PromptError::SchemaMismatch(err))
            }
        }
    }

    fn parse_candidate(
        &self,
        candidate: &str,
        found_block: bool,
    ) -> Result<JsonValue, serde_json::Error> {
        match parse_json(candidate) {
            Ok(value) => Ok(value),
            Err(err) if self.extraction == JsonExtraction::Lenient && !found_block => {
                match find_embedded_json(candidate) {
                    Some(embedded) => {
                        self.trace(Stage::Extract, || {
                            format!("Using JSON embedded in prose:\n{embedded}")
                        });
                        parse_json(embedded)
                    }
                    None => Err(err),
                }
            }
            Err(err) => Err(err),
        }
    }

    fn emit(&self, stage: Stage, message: impl FnOnce() -> String) {
        self.sink.emit(&DiagnosticEvent::info(stage, message()));
    }

    fn trace(&self, stage: Stage, message: impl FnOnce() -> String) {
        if self.options.verbose {
            self.emit(stage, message);
        }
    }

    fn fail(&self, stage: Stage, message: impl FnOnce() -> String) {
        if self.options.verbose {
            self.sink.emit(&DiagnosticEvent::error(stage, message()));
        }
    }
}

#[async_trait]
impl<T: Send> Prompter<T> for ObjectPrompter<T> {
    async fn send<I>(&self, input: &I) -> PromptResult<T>
    where
        I: Serialize + Sync + ?Sized,
    {
        ObjectPrompter::send(self, input).await
    }
}

impl<T> std::fmt::Debug for ObjectPrompter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectPrompter")
            .field("transport", &self.transport.name())
            .field("descriptor", &self.descriptor)
            .field("template", &self.template)
            .field("options", &self.options)
            .field("interceptors", &self.interceptors)
            .field("custom_code_block_parser", &self.code_block_parser.is_some())
            .field("extraction", &self.extraction)
            .field("sanitizer", &self.sanitizer)
            .finish_non_exhaustive()
    }
}
