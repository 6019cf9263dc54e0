//! Typographic quote normalization.
//!
//! Models often emit "smart" quotes inside otherwise valid JSON. Strict
//! parsers reject them, so replies are normalized before parsing.

use std::borrow::Cow;

const LEFT_SINGLE: char = '\u{2018}';
const RIGHT_SINGLE: char = '\u{2019}';
const LEFT_DOUBLE: char = '\u{201C}';
const RIGHT_DOUBLE: char = '\u{201D}';

/// Replaces typographic quotes with plain ASCII quotes.
///
/// Both single and double typographic quotes become `"` by default, so a
/// reply like `{‘name’: ‘Ada’}` parses. [`QuoteSanitizer::apostrophes`] maps
/// single quotes to `'` instead, which keeps contractions like `don’t` intact
/// inside JSON strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteSanitizer {
    single: char,
    double: char,
}

impl Default for QuoteSanitizer {
    fn default() -> Self {
        Self {
            single: '"',
            double: '"',
        }
    }
}

impl QuoteSanitizer {
    /// Create the default sanitizer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sanitizer that turns single typographic quotes into apostrophes.
    ///
    /// Useful when replies carry prose with contractions inside string values.
    #[must_use]
    pub fn apostrophes() -> Self {
        Self::default().with_single_quote('\'')
    }

    /// Set the replacement for single typographic quotes.
    #[must_use]
    pub fn with_single_quote(mut self, replacement: char) -> Self {
        self.single = replacement;
        self
    }

    /// Normalize `text`. Borrows when there is nothing to replace.
    pub fn sanitize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if !text.contains([LEFT_SINGLE, RIGHT_SINGLE, LEFT_DOUBLE, RIGHT_DOUBLE]) {
            return Cow::Borrowed(text);
        }

        let replaced = text
            .chars()
            .map(|c| match c {
                LEFT_SINGLE | RIGHT_SINGLE => self.single,
                LEFT_DOUBLE | RIGHT_DOUBLE => self.double,
                other => other,
            })
            .collect();
        Cow::Owned(replaced)
    }
}

/// Normalize typographic quotes with the default [`QuoteSanitizer`].
pub fn sanitize_quotes(text: &str) -> Cow<'_, str> {
    QuoteSanitizer::default().sanitize(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("\u{201C}a\u{201D}", "\"a\"")]
    #[case("\u{2018}x\u{2019}", "\"x\"")]
    #[case("{\u{2018}a\u{2019}: 1}", r#"{"a": 1}"#)]
    #[case("plain \"text\"", "plain \"text\"")]
    #[case("", "")]
    fn test_default_sanitizer(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_quotes(input), expected);
    }

    #[test]
    fn test_borrows_when_clean() {
        assert!(matches!(sanitize_quotes(r#"{"a": 1}"#), Cow::Borrowed(_)));
    }

    #[test]
    fn test_apostrophe_sanitizer() {
        let sanitizer = QuoteSanitizer::apostrophes();
        assert_eq!(sanitizer.sanitize("don\u{2019}t"), "don't");
        assert_eq!(sanitizer.sanitize("\u{201C}\u{2018}x\u{2019}\u{201D}"), "\"'x'\"");
    }

    #[test]
    fn test_custom_single_quote() {
        let sanitizer = QuoteSanitizer::new().with_single_quote('`');
        assert_eq!(sanitizer.sanitize("\u{2018}x\u{2019}"), "`x`");
    }

    #[test]
    fn test_smart_quoted_json_parses_like_plain() {
        let smart = "{\u{201C}name\u{201D}: \u{201C}Ada\u{201D}, \u{201C}tags\u{201D}: [\u{201C}x\u{201D}]}";
        let plain = r#"{"name": "Ada", "tags": ["x"]}"#;

        let a: serde_json::Value = serde_json::from_str(&sanitize_quotes(smart)).unwrap();
        let b: serde_json::Value = serde_json::from_str(plain).unwrap();
        assert_eq!(a, b);
    }
}
