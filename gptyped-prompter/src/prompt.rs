//! Prompt construction.

use gptyped_core::{format_as_json, JsonFormatError, SchemaDescriptor};
use serde::Serialize;
use std::fmt::Write;

/// Lead-in for caller-supplied memory.
pub const MEMORY_PREFIX: &str = "Consider this context for your response: ";

/// Closing directive.
pub const JSON_ONLY: &str = "[JSON ONLY]";

/// The fixed prompt layout plus the optional text blocks around it.
///
/// Rendered prompt, in order:
///
/// ```text
/// {metaprompt}
/// Consider this context for your response: {memory}
/// {reminder}
///
/// output = {descriptor}
///
/// input = {input}
///
/// [JSON ONLY]
/// ```
///
/// Absent blocks are skipped along with their newline. Both JSON blocks use
/// four-space indentation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptTemplate {
    metaprompt: Option<String>,
    reminder: Option<String>,
    memory: Option<String>,
}

impl PromptTemplate {
    /// Create an empty template.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the opening instruction.
    #[must_use]
    pub fn metaprompt(mut self, text: impl Into<String>) -> Self {
        self.metaprompt = Some(text.into());
        self
    }

    /// Set the reminder placed after the memory block.
    #[must_use]
    pub fn reminder(mut self, text: impl Into<String>) -> Self {
        self.reminder = Some(text.into());
        self
    }

    /// Set context text spliced in verbatim.
    #[must_use]
    pub fn memory(mut self, text: impl Into<String>) -> Self {
        self.memory = Some(text.into());
        self
    }

    /// Render the prompt for one input.
    ///
    /// ```rust
    /// use gptyped_core::SchemaDescriptor;
    /// use gptyped_prompter::PromptTemplate;
    ///
    /// let descriptor = SchemaDescriptor::new().field("answer", "string");
    /// let prompt = PromptTemplate::new()
    ///     .metaprompt("Answer the question.")
    ///     .render(&descriptor, &serde_json::json!({"question": "2+2?"}))
    ///     .unwrap();
    ///
    /// assert_eq!(
    ///     prompt,
    ///     "Answer the question.\n\noutput = {\n    \"answer\": \"string\"\n}\n\ninput = {\n    \"question\": \"2+2?\"\n}\n\n[JSON ONLY]"
    /// );
    /// ```
    pub fn render<I: Serialize + ?Sized>(
        &self,
        descriptor: &SchemaDescriptor,
        input: &I,
    ) -> Result<String, JsonFormatError> {
        let output_block = format_as_json(descriptor)?;
        let input_block = format_as_json(input)?;

        let mut prompt = String::with_capacity(output_block.len() + input_block.len() + 64);

        if let Some(metaprompt) = &self.metaprompt {
            prompt.push_str(metaprompt);
            prompt.push('\n');
        }
        if let Some(memory) = &self.memory {
            prompt.push_str(MEMORY_PREFIX);
            prompt.push_str(memory);
            prompt.push('\n');
        }
        if let Some(reminder) = &self.reminder {
            prompt.push_str(reminder);
            prompt.push('\n');
        }

        // Writing to a String cannot fail.
        let _ = write!(
            prompt,
            "\noutput = {output_block}\n\ninput = {input_block}\n\n{JSON_ONLY}"
        );
        Ok(prompt)
    }
}
