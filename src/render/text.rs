//! Plain text rendering of the render tree.

use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::error::Result;
use crate::model::{Document, Markup};

use super::tree::{Node, TableRow, CHECKED_MARK, UNCHECKED_MARK};
use super::{RenderOptions, Renderer};

/// Convert a document to plain text.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    let nodes = Renderer::new(options.clone()).render(doc);
    Ok(nodes_to_text(&nodes))
}

/// Serialize rendered nodes to plain text.
pub fn nodes_to_text(nodes: &[Node]) -> String {
    TextWriter::new().write(nodes)
}

/// Plain text writer.
///
/// Markup is reduced to its text: tags are dropped, entities decoded and the
/// result normalized to NFC.
pub struct TextWriter {
    tag_regex: &'static Regex,
}

fn tag_regex() -> &'static Regex {
    static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    TAG_REGEX.get_or_init(|| Regex::new(r"<[^>]*>").unwrap())
}

impl TextWriter {
    /// Create a new text writer.
    pub fn new() -> Self {
        Self {
            tag_regex: tag_regex(),
        }
    }

    /// Write top-level nodes separated by blank lines.
    pub fn write(&self, nodes: &[Node]) -> String {
        let blocks: Vec<String> = nodes
            .iter()
            .map(|node| self.block_text(node, 0))
            .filter(|text| !text.trim().is_empty())
            .collect();
        blocks.join("\n\n").nfc().collect::<String>().trim().to_string()
    }

    /// Plain text of a markup string.
    pub fn markup_text(&self, markup: &Markup) -> String {
        let stripped = self.tag_regex.replace_all(markup.as_str(), "");
        html_escape::decode_html_entities(&stripped).into_owned()
    }

    fn block_text(&self, node: &Node, depth: usize) -> String {
        match node {
            Node::Quote { children, caption } => {
                let mut text = self.inline(children);
                if let Some(caption) = caption {
                    text.push('\n');
                    text.push_str(&self.inline(caption));
                }
                text
            }
            Node::Image { url, caption, .. } => match caption {
                Some(caption) => format!("[{}] {}", url, self.inline(caption)),
                None => format!("[{}]", url),
            },
            Node::List { style, items } => {
                let mut lines = Vec::new();
                for (i, item) in items.iter().enumerate() {
                    let marker = if style.is_ordered() {
                        format!("{}.", i + 1)
                    } else {
                        "-".to_string()
                    };
                    lines.push(self.item_text(item, &marker, depth));
                }
                lines.join("\n")
            }
            Node::Checklist { items } => items
                .iter()
                .map(|item| self.item_text(item, "-", depth))
                .collect::<Vec<_>>()
                .join("\n"),
            Node::CodeBlock { code, .. } => code.clone(),
            Node::Table { head, body } => head
                .iter()
                .chain(body)
                .map(|row| self.row_text(row))
                .collect::<Vec<_>>()
                .join("\n"),
            Node::Placeholder { block, message } => format!("[{}: {}]", block, message),
            Node::Markup { .. } | Node::Text { .. } => self.inline(std::slice::from_ref(node)),
            other => self.inline(other.children()),
        }
    }

    fn item_text(&self, item: &Node, marker: &str, depth: usize) -> String {
        let indent = "  ".repeat(depth);
        let (prefix, children) = match item {
            Node::CheckItem { checked, children } => (
                format!("{} ", if *checked { CHECKED_MARK } else { UNCHECKED_MARK }),
                children.as_slice(),
            ),
            other => (String::new(), other.children()),
        };

        let mut own = Vec::new();
        let mut nested = Vec::new();
        for child in children {
            match child {
                Node::List { .. } | Node::Checklist { .. } => {
                    nested.push(self.block_text(child, depth + 1))
                }
                _ => own.push(child.clone()),
            }
        }

        let mut text = format!("{}{} {}{}", indent, marker, prefix, self.inline(&own));
        for list in nested {
            text.push('\n');
            text.push_str(&list);
        }
        text
    }

    fn row_text(&self, row: &TableRow) -> String {
        row.cells
            .iter()
            .map(|cell| self.inline(std::slice::from_ref(cell)))
            .collect::<Vec<_>>()
            .join("\t")
    }

    fn inline(&self, nodes: &[Node]) -> String {
        let mut text = String::new();
        for node in nodes {
            match node {
                Node::Markup { markup } => text.push_str(&self.markup_text(markup)),
                Node::Text { text: literal } => text.push_str(literal),
                other => text.push_str(&self.block_text(other, 0)),
            }
        }
        text
    }
}

impl Default for TextWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(value: serde_json::Value) -> String {
        let doc = Document::from_value(&value).unwrap();
        to_text(&doc, &RenderOptions::default()).unwrap()
    }

    #[test]
    fn test_to_text() {
        let out = text(json!([
            {"type": "paragraph", "data": {"text": "Hello, <b>world</b>!"}},
            {"type": "paragraph", "data": {"text": "Fish &amp; chips"}}
        ]));
        assert_eq!(out, "Hello, world!\n\nFish & chips");
    }

    #[test]
    fn test_list_and_table_text() {
        let out = text(json!([
            {"type": "list", "data": {"items": ["a", {"content": "b", "items": ["c"]}]}},
            {"type": "table", "data": {"content": "x | y\n1 | 2"}}
        ]));
        assert_eq!(out, "- a\n- b\n  - c\n\nx\ty\n1\t2");
    }

    #[test]
    fn test_checklist_text() {
        let out = text(json!([{"type": "checklist", "data": {"items": [
            {"checked": true, "text": "done"}
        ]}}]));
        assert_eq!(out, "- ☑ done");
    }

    #[test]
    fn test_nfc_normalization() {
        let out = text(json!([{"type": "paragraph", "data": {"text": "e\u{0301}"}}]));
        assert_eq!(out, "\u{00e9}");
    }
}
