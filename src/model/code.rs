//! Code block source.

use super::fields::str_field;
use serde::Serialize;
use serde_json::Value;

/// Text shown when no readable code can be recovered.
pub const UNEXTRACTABLE_CODE: &str = "Unable to extract code";

/// Where the code of a `code` block comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum CodeSource {
    /// Plain code text
    Literal { code: String },

    /// A rendered element captured from the editor preview
    Element(RenderedElement),
}

impl CodeSource {
    /// Decode the `code` field.
    ///
    /// Objects are treated as rendered elements; scalars become their text;
    /// null or missing is empty code.
    pub fn decode(value: Option<&Value>) -> Self {
        let code = match value {
            Some(Value::String(s)) => s.clone(),
            Some(element @ Value::Object(_)) => {
                return CodeSource::Element(RenderedElement::decode(element))
            }
            Some(v @ (Value::Number(_) | Value::Bool(_))) => v.to_string(),
            _ => String::new(),
        };
        CodeSource::Literal { code }
    }

    /// Displayable code, if any could be recovered.
    pub fn extract(&self) -> Option<&str> {
        match self {
            CodeSource::Literal { code } => Some(code),
            CodeSource::Element(element) => element.extract(),
        }
    }

    /// Displayable code, or [`UNEXTRACTABLE_CODE`].
    pub fn text(&self) -> &str {
        self.extract().unwrap_or(UNEXTRACTABLE_CODE)
    }
}

impl Default for CodeSource {
    fn default() -> Self {
        CodeSource::Literal {
            code: String::new(),
        }
    }
}

/// Text-bearing properties of a rendered element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedElement {
    /// `textContent`
    pub text_content: Option<String>,

    /// `innerText`
    pub inner_text: Option<String>,

    /// `innerHTML`
    pub inner_html: Option<String>,
}

impl RenderedElement {
    fn decode(value: &Value) -> Self {
        let text = |key: &str| str_field(value, key).map(str::to_string);
        Self {
            text_content: text("textContent"),
            inner_text: text("innerText"),
            inner_html: text("innerHTML"),
        }
    }

    /// First non-empty of text content, inner text and inner markup.
    pub fn extract(&self) -> Option<&str> {
        [&self.text_content, &self.inner_text, &self.inner_html]
            .into_iter()
            .filter_map(|s| s.as_deref())
            .find(|s| !s.is_empty())
    }
}
