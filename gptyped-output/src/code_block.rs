//! Markdown code-fence extraction.
//!
//! Some models wrap structured output in a fenced block:
//!
//! ````text
//! ```json
//! {"a": 1}
//! ```
//! ````
//!
//! The extractor returns the body of the first such block. Not finding one is
//! an ordinary outcome, so it is reported as `None` rather than an error.

use regex::Regex;
use std::sync::LazyLock;

/// Opening fence, optional info string, newline, body, newline, closing fence.
const FENCE_PATTERN: &str = r"```[\s\S]*?\n([\s\S]*?)\n```";

static FENCE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(FENCE_PATTERN).ok());

/// Extract the trimmed body of the first fenced code block in `text`.
///
/// Returns `Some("")` for an empty block and `None` when there is no block.
///
/// ```rust
/// use gptyped_output::extract_code_block;
///
/// assert_eq!(extract_code_block("```json\n{\"a\":1}\n```").as_deref(), Some("{\"a\":1}"));
/// assert_eq!(extract_code_block("{\"a\":1}"), None);
/// ```
pub fn extract_code_block(text: &str) -> Option<String> {
    let body = FENCE.as_ref()?.captures(text)?.get(1)?;
    Some(body.as_str().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_json_fence() {
        let text = "```json\n{\"a\":1}\n```";
        assert_eq!(extract_code_block(text).as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_plain_fence_with_surrounding_prose() {
        let text = "Here you go:\n```\n  {\"key\": \"value\"}  \n```\nAnything else?";
        assert_eq!(
            extract_code_block(text).as_deref(),
            Some(r#"{"key": "value"}"#)
        );
    }

    #[test]
    fn test_first_block_wins() {
        let text = "```json\n{\"first\": true}\n```\nand\n```json\n{\"second\": true}\n```";
        assert_eq!(
            extract_code_block(text).as_deref(),
            Some(r#"{"first": true}"#)
        );
    }

    #[test]
    fn test_multiline_body() {
        let text = "```json\n{\n    \"a\": 1,\n    \"b\": 2\n}\n```";
        assert_eq!(
            extract_code_block(text).as_deref(),
            Some("{\n    \"a\": 1,\n    \"b\": 2\n}")
        );
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "```json\r\n{\"a\":1}\r\n```";
        assert_eq!(extract_code_block(text).as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_empty_block_is_distinct_from_missing() {
        assert_eq!(extract_code_block("```\n\n```").as_deref(), Some(""));
        assert_eq!(extract_code_block("no fences here"), None);
    }

    #[test]
    fn test_single_line_fence_is_not_a_block() {
        assert_eq!(extract_code_block("```{\"a\":1}```"), None);
    }

    #[test]
    fn test_unterminated_fence() {
        assert_eq!(extract_code_block("```json\n{\"a\":1}\n"), None);
    }
}
