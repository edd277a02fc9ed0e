//! Lenient field accessors shared by the block decoders.

use super::Markup;
use serde_json::Value;

/// Borrow a string field, ignoring any other JSON type.
pub(crate) fn str_field<'a>(data: &'a Value, key: &str) -> Option<&'a str> {
    data.get(key).and_then(Value::as_str)
}

/// Read a boolean field, ignoring any other JSON type.
pub(crate) fn bool_field(data: &Value, key: &str) -> Option<bool> {
    data.get(key).and_then(Value::as_bool)
}

/// Read a markup field, defaulting to empty markup.
///
/// Numbers and booleans are shown as their JSON text; anything else is empty.
pub(crate) fn markup_field(data: &Value, key: &str) -> Markup {
    match data.get(key) {
        Some(Value::String(s)) => Markup::from_trusted(s.as_str()),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Markup::from_trusted(v.to_string()),
        _ => Markup::empty(),
    }
}

/// Read an optional caption-like markup field that only counts when non-blank.
pub(crate) fn caption_field(data: &Value, key: &str) -> Option<Markup> {
    str_field(data, key)
        .filter(|s| !s.trim().is_empty())
        .map(Markup::from_trusted)
}

/// Best-effort text form of a JSON value.
pub(crate) fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(_) | Value::Bool(_) => Some(value.to_string()),
        Value::Array(_) | Value::Object(_) => serde_json::to_string(value).ok(),
    }
}

/// Name of a JSON value's type, for diagnostics.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_markup_field_defaults() {
        let data = json!({ "text": "<b>x</b>", "n": 3, "o": {} });
        assert_eq!(markup_field(&data, "text").as_str(), "<b>x</b>");
        assert_eq!(markup_field(&data, "n").as_str(), "3");
        assert_eq!(markup_field(&data, "o").as_str(), "");
        assert_eq!(markup_field(&data, "missing").as_str(), "");
    }

    #[test]
    fn test_caption_field_requires_content() {
        let data = json!({ "a": "", "b": "   ", "c": "Photo" });
        assert!(caption_field(&data, "a").is_none());
        assert!(caption_field(&data, "b").is_none());
        assert_eq!(caption_field(&data, "c").unwrap().as_str(), "Photo");
    }

    #[test]
    fn test_stringify() {
        assert_eq!(stringify(&json!(1.5)).as_deref(), Some("1.5"));
        assert_eq!(stringify(&json!({"a": 1})).as_deref(), Some("{\"a\":1}"));
        assert!(stringify(&Value::Null).is_none());
    }
}
