//! Trusted inline markup.

use serde::Serialize;
use std::fmt;

/// Pre-sanitized rich-text markup.
///
/// Text fields of editor blocks carry inline HTML (`<b>`, `<a>`, `<mark>`...)
/// that was sanitized by the authoring tool before it was stored. Serializers
/// emit a `Markup` verbatim, so the only ways to obtain one are the document
/// decoder, [`Markup::from_trusted`] (an explicit claim that the caller has
/// sanitized the input) and [`Markup::escape`] (which escapes plain text).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Markup(String);

impl Markup {
    /// Wrap markup that has already been sanitized upstream.
    pub fn from_trusted(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    /// Build markup from plain text, escaping every HTML-significant character.
    pub fn escape(text: &str) -> Self {
        Self(html_escape::encode_text(text).into_owned())
    }

    /// Create empty markup.
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Raw markup string, safe to insert without further escaping.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the markup is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Consume and return the raw string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain_text() {
        let m = Markup::escape("a < b & c");
        assert_eq!(m.as_str(), "a &lt; b &amp; c");
    }

    #[test]
    fn test_trusted_is_verbatim() {
        let m = Markup::from_trusted("<b>bold</b>");
        assert_eq!(m.as_str(), "<b>bold</b>");
        assert!(!m.is_blank());
        assert!(Markup::from_trusted("  ").is_blank());
    }
}
