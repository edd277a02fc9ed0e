//! Block types and the block decoder.

use super::fields::{bool_field, caption_field, markup_field, str_field};
use super::{ChecklistItem, CodeSource, ListItem, ListStyle, Markup, TableData};
use serde::Serialize;
use serde_json::{Map, Value};

/// One typed unit of article content.
///
/// Decoding never fails: missing fields take defaults and unrecognised
/// types become [`Block::Unknown`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Block {
    /// A paragraph of markup
    Paragraph(ParagraphData),

    /// A heading
    Header(HeaderData),

    /// An image with optional caption
    Image(ImageData),

    /// A quotation with optional attribution
    Quote(QuoteData),

    /// An ordered or unordered list
    List(ListData),

    /// A checklist (`checklist` or `todo`)
    Checklist(ChecklistData),

    /// A code listing
    Code(CodeData),

    /// A table
    Table(TableData),

    /// A block of an unrecognised type
    Unknown {
        /// The stored type name
        kind: String,
        /// The stored data, untouched
        data: Value,
    },
}

impl Block {
    /// Decode a stored `{type, data}` block.
    pub fn decode(value: &Value) -> Self {
        let kind = match value.get("type") {
            Some(Value::String(kind)) => kind.clone(),
            None | Some(Value::Null) => String::new(),
            // A non-string type is kept as its JSON text so diagnostics can name it.
            Some(other) => other.to_string(),
        };
        let empty = Value::Object(Map::new());
        let data = value.get("data").filter(|d| d.is_object()).unwrap_or(&empty);

        match kind.as_str() {
            "paragraph" => Block::Paragraph(ParagraphData {
                text: markup_field(data, "text"),
            }),
            "header" => Block::Header(HeaderData {
                text: markup_field(data, "text"),
                level: data.get("level").and_then(HeadingLevel::from_value),
            }),
            "image" => Block::Image(ImageData::decode(data)),
            "quote" => Block::Quote(QuoteData {
                text: markup_field(data, "text"),
                caption: caption_field(data, "caption"),
            }),
            "list" => Block::List(ListData {
                style: ListStyle::from_value(data.get("style")),
                items: ListItem::decode_items(data.get("items")),
            }),
            "checklist" | "todo" => Block::Checklist(ChecklistData {
                items: match data.get("items") {
                    Some(Value::Array(items)) => items.iter().map(ChecklistItem::decode).collect(),
                    _ => Vec::new(),
                },
            }),
            "code" => Block::Code(CodeData {
                code: CodeSource::decode(data.get("code")),
                language: str_field(data, "language")
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(str::to_string),
            }),
            "table" => Block::Table(TableData::decode(data)),
            _ => Block::Unknown {
                kind: kind.to_string(),
                data: value.get("data").cloned().unwrap_or(Value::Null),
            },
        }
    }

    /// The block's type name.
    pub fn kind(&self) -> &str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Header(_) => "header",
            Block::Image(_) => "image",
            Block::Quote(_) => "quote",
            Block::List(_) => "list",
            Block::Checklist(_) => "checklist",
            Block::Code(_) => "code",
            Block::Table(_) => "table",
            Block::Unknown { kind, .. } => kind,
        }
    }

    /// Check if this block has an unrecognised type.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Block::Unknown { .. })
    }
}

/// Paragraph data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParagraphData {
    /// Paragraph markup
    pub text: Markup,
}

/// Heading data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeaderData {
    /// Heading markup
    pub text: Markup,

    /// Heading level, `None` when absent or outside 1..=4
    pub level: Option<HeadingLevel>,
}

/// Heading levels honoured by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum HeadingLevel {
    /// Largest heading
    H1,
    /// Second level
    H2,
    /// Third level
    H3,
    /// Smallest heading
    H4,
}

impl HeadingLevel {
    /// Convert a number to a level; only integers 1 to 4 qualify.
    pub fn from_number(level: f64) -> Option<Self> {
        if level.fract() != 0.0 {
            return None;
        }
        match level as i64 {
            1 => Some(HeadingLevel::H1),
            2 => Some(HeadingLevel::H2),
            3 => Some(HeadingLevel::H3),
            4 => Some(HeadingLevel::H4),
            _ => None,
        }
    }

    /// Read a level from a JSON value; non-numbers are ignored.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_f64().and_then(Self::from_number)
    }

    /// Numeric level (1-4).
    pub fn number(&self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
        }
    }
}

/// Image data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageData {
    /// Image URL
    pub url: Option<String>,

    /// Caption, present only when non-blank
    pub caption: Option<Markup>,

    /// Draw a border around the image
    pub with_border: bool,

    /// Stretch the image to the content width
    pub stretched: bool,

    /// Put the image on a background panel
    pub with_background: bool,
}

impl ImageData {
    fn decode(data: &Value) -> Self {
        let url = data
            .get("file")
            .and_then(|file| str_field(file, "url"))
            .or_else(|| str_field(data, "url"))
            .filter(|url| !url.trim().is_empty())
            .map(str::to_string);

        Self {
            url,
            caption: caption_field(data, "caption"),
            with_border: bool_field(data, "withBorder").unwrap_or(false),
            stretched: bool_field(data, "stretched").unwrap_or(false),
            with_background: bool_field(data, "withBackground").unwrap_or(false),
        }
    }
}

/// Quote data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuoteData {
    /// Quoted markup
    pub text: Markup,

    /// Attribution, present only when non-blank
    pub caption: Option<Markup>,
}

/// List data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListData {
    /// List style, shared by nested lists
    pub style: ListStyle,

    /// List entries
    pub items: Vec<ListItem>,
}

impl ListData {
    /// Check if the list is non-empty and every entry is checklist-shaped.
    pub fn is_checklist(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(ListItem::is_check)
    }
}

/// Checklist data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChecklistData {
    /// Checklist entries
    pub items: Vec<ChecklistItem>,
}

/// Code data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CodeData {
    /// Code source
    pub code: CodeSource,

    /// Language tag, present only when non-blank
    pub language: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_paragraph() {
        let block = Block::decode(&json!({"type": "paragraph", "data": {"text": "Hi <b>there</b>"}}));
        assert_eq!(
            block,
            Block::Paragraph(ParagraphData {
                text: Markup::from_trusted("Hi <b>there</b>")
            })
        );
        assert_eq!(block.kind(), "paragraph");
    }

    #[test]
    fn test_decode_missing_type_and_data() {
        let block = Block::decode(&json!({}));
        assert!(block.is_unknown());
        assert_eq!(block.kind(), "");

        let block = Block::decode(&json!({"type": "paragraph"}));
        assert_eq!(block, Block::Paragraph(ParagraphData::default()));

        let block = Block::decode(&json!("not a block"));
        assert!(block.is_unknown());
    }

    #[test]
    fn test_non_string_type_keeps_its_json_text() {
        let block = Block::decode(&json!({"type": 5, "data": {}}));
        assert!(block.is_unknown());
        assert_eq!(block.kind(), "5");

        let block = Block::decode(&json!({"type": ["paragraph"]}));
        assert_eq!(block.kind(), "[\"paragraph\"]");

        let block = Block::decode(&json!({"type": null}));
        assert_eq!(block.kind(), "");
    }

    #[test]
    fn test_unknown_keeps_data() {
        let block = Block::decode(&json!({"type": "embed", "data": {"service": "youtube"}}));
        match block {
            Block::Unknown { kind, data } => {
                assert_eq!(kind, "embed");
                assert_eq!(data, json!({"service": "youtube"}));
            }
            other => panic!("expected unknown, got {:?}", other),
        }
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(HeadingLevel::from_value(&json!(1)), Some(HeadingLevel::H1));
        assert_eq!(HeadingLevel::from_value(&json!(4)), Some(HeadingLevel::H4));
        assert_eq!(HeadingLevel::from_value(&json!(2.0)), Some(HeadingLevel::H2));
        assert_eq!(HeadingLevel::from_value(&json!(2.5)), None);
        assert_eq!(HeadingLevel::from_value(&json!(0)), None);
        assert_eq!(HeadingLevel::from_value(&json!(-1)), None);
        assert_eq!(HeadingLevel::from_value(&json!(5)), None);
        assert_eq!(HeadingLevel::from_value(&json!("2")), None);
    }

    #[test]
    fn test_checklist_synonyms() {
        let a = Block::decode(&json!({"type": "checklist", "data": {"items": [{"checked": true, "text": "a"}]}}));
        let b = Block::decode(&json!({"type": "todo", "data": {"items": [{"checked": true, "text": "a"}]}}));
        assert_eq!(a, b);
    }

    #[test]
    fn test_image_url_sources() {
        let block = Block::decode(&json!({"type": "image", "data": {"file": {"url": "a.png"}, "url": "b.png"}}));
        let Block::Image(image) = block else {
            panic!("expected image");
        };
        assert_eq!(image.url.as_deref(), Some("a.png"));

        let block = Block::decode(&json!({"type": "image", "data": {"url": "b.png", "stretched": true}}));
        let Block::Image(image) = block else {
            panic!("expected image");
        };
        assert_eq!(image.url.as_deref(), Some("b.png"));
        assert!(image.stretched);
        assert!(image.caption.is_none());
    }

    #[test]
    fn test_list_checklist_shape() {
        let block = Block::decode(&json!({"type": "list", "data": {"items": [
            {"checked": true, "text": "a"},
            {"checked": false, "text": "b"}
        ]}}));
        let Block::List(list) = block else {
            panic!("expected list");
        };
        assert!(list.is_checklist());

        let mixed = ListData {
            style: ListStyle::Unordered,
            items: vec![
                ListItem::decode(&json!({"checked": true, "text": "a"})),
                ListItem::decode(&json!("b")),
            ],
        };
        assert!(!mixed.is_checklist());
        assert!(!ListData::default().is_checklist());
    }

    #[test]
    fn test_code_language_blank() {
        let block = Block::decode(&json!({"type": "code", "data": {"code": "x", "language": "  "}}));
        let Block::Code(code) = block else {
            panic!("expected code");
        };
        assert!(code.language.is_none());
    }
}
