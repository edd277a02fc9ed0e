//! List and checklist types.

use super::fields::{bool_field, markup_field, str_field, stringify};
use super::Markup;
use serde::Serialize;
use serde_json::Value;

/// Maximum list nesting depth honoured by the decoder.
///
/// Items nested deeper decode to [`ListItem::Unrenderable`].
pub const MAX_LIST_DEPTH: usize = 64;

/// List style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    /// Ordered (numbered) list
    Ordered,
    /// Unordered (bulleted) list
    #[default]
    Unordered,
}

impl ListStyle {
    /// Read the `style` field; anything but `"ordered"` is unordered.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str) {
            Some("ordered") => ListStyle::Ordered,
            _ => ListStyle::Unordered,
        }
    }

    /// Check if this is an ordered list.
    pub fn is_ordered(&self) -> bool {
        matches!(self, ListStyle::Ordered)
    }
}

/// A `{checked, text}` checklist entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    /// Whether the entry is ticked
    pub checked: bool,

    /// Entry text
    pub text: Markup,
}

impl ChecklistItem {
    /// Create a checklist entry.
    pub fn new(checked: bool, text: Markup) -> Self {
        Self { checked, text }
    }

    /// Decode an entry of a checklist block.
    ///
    /// A bare string is an unchecked entry; `content` is accepted when `text`
    /// is absent (the nested-list editor stores checklist text there).
    pub fn decode(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::new(false, Markup::from_trusted(s.as_str())),
            Value::Object(_) => {
                let text = if value.get("text").is_some() {
                    markup_field(value, "text")
                } else {
                    markup_field(value, "content")
                };
                Self::new(bool_field(value, "checked").unwrap_or(false), text)
            }
            _ => Self::default(),
        }
    }
}

/// One entry of a `list` block.
///
/// Editor output is heterogeneous; each accepted shape is its own case and
/// the decoder tries them in a fixed order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ListItem {
    /// A bare markup string
    Markup { markup: Markup },

    /// An object carrying a `checked` boolean
    Check { item: ChecklistItem },

    /// An object with its own `content`, optionally followed by nested items
    Content { content: Markup, items: Vec<ListItem> },

    /// An object with nested `items` and no own content
    Nested { items: Vec<ListItem> },

    /// An object with `text`
    Text { text: Markup },

    /// Any other value, shown as its JSON text
    Stringified { text: String },

    /// A value with no textual form
    Unrenderable,
}

impl ListItem {
    /// Decode one list entry.
    pub fn decode(value: &Value) -> Self {
        Self::decode_at(value, 0)
    }

    /// Decode a sequence of list entries; non-arrays yield no entries.
    pub fn decode_items(value: Option<&Value>) -> Vec<ListItem> {
        decode_items_at(value, 0)
    }

    fn decode_at(value: &Value, depth: usize) -> Self {
        if depth > MAX_LIST_DEPTH {
            return ListItem::Unrenderable;
        }

        if let Value::String(s) = value {
            return ListItem::Markup {
                markup: Markup::from_trusted(s.as_str()),
            };
        }

        if value.is_object() {
            if bool_field(value, "checked").is_some() {
                return ListItem::Check {
                    item: ChecklistItem::decode(value),
                };
            }

            let nested = value.get("items").filter(|v| v.is_array());

            if let Some(content) = str_field(value, "content") {
                return ListItem::Content {
                    content: Markup::from_trusted(content),
                    items: decode_items_at(nested, depth + 1),
                };
            }

            if nested.is_some() {
                return ListItem::Nested {
                    items: decode_items_at(nested, depth + 1),
                };
            }

            if let Some(text) = str_field(value, "text") {
                return ListItem::Text {
                    text: Markup::from_trusted(text),
                };
            }
        }

        match stringify(value) {
            Some(text) => ListItem::Stringified { text },
            None => ListItem::Unrenderable,
        }
    }

    /// Check if this entry is checklist-shaped.
    pub fn is_check(&self) -> bool {
        matches!(self, ListItem::Check { .. })
    }

    /// Number of entries in this subtree, including this one.
    pub fn total_items(&self) -> usize {
        1 + self.children().iter().map(ListItem::total_items).sum::<usize>()
    }

    /// Nested entries, if any.
    pub fn children(&self) -> &[ListItem] {
        match self {
            ListItem::Content { items, .. } | ListItem::Nested { items } => items,
            _ => &[],
        }
    }
}

fn decode_items_at(value: Option<&Value>, depth: usize) -> Vec<ListItem> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| ListItem::decode_at(item, depth))
            .collect(),
        _ => Vec::new(),
    }
}
