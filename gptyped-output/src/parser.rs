//! JSON candidate parsing.
//!
//! The prompter decides *which* text to parse (code block or whole reply);
//! this module parses it, and optionally digs a JSON value out of prose when
//! the reply is not JSON as a whole.

use serde_json::Value as JsonValue;

/// How the JSON candidate is located in a reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonExtraction {
    /// Use the first code block, otherwise the whole reply.
    #[default]
    Strict,
    /// Like [`Strict`](Self::Strict), but when the whole reply is not JSON,
    /// fall back to the first balanced object or array embedded in it.
    Lenient,
}

/// Parse JSON text into an untyped value.
pub fn parse_json(text: &str) -> Result<JsonValue, serde_json::Error> {
    serde_json::from_str(text)
}

/// Find the first balanced, parseable JSON object or array inside `text`.
///
/// Objects are preferred over arrays, so `Items: [1] in {"a": [1]}` yields
/// the object.
///
/// ```rust
/// use gptyped_output::find_embedded_json;
///
/// let text = r#"The answer is {"x": 1, "y": 2} and that's it."#;
/// assert_eq!(find_embedded_json(text), Some(r#"{"x": 1, "y": 2}"#));
/// ```
pub fn find_embedded_json(text: &str) -> Option<&str> {
    find_balanced(text, '{', '}').or_else(|| find_balanced(text, '[', ']'))
}

/// Scan every `open` position and return the first balanced span that parses.
fn find_balanced(text: &str, open: char, close: char) -> Option<&str> {
    let mut offset = 0;
    while let Some(rel) = text[offset..].find(open) {
        let start = offset + rel;
        if let Some(candidate) = balanced_from(&text[start..], open, close) {
            if serde_json::from_str::<JsonValue>(candidate).is_ok() {
                return Some(candidate);
            }
        }
        offset = start + open.len_utf8();
    }
    None
}

/// Match `open` at the start of `text` with its closing delimiter, skipping
/// delimiters inside string literals.
fn balanced_from(text: &str, open: char, close: char) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, c) in text.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[..i + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}
