//! Markdown rendering of the render tree.
//!
//! Markup is passed through as inline HTML, which CommonMark allows.

use crate::error::Result;
use crate::model::{Document, ListStyle};

use super::tree::{Node, ParagraphStyle, TableRow, CHECKED_MARK, UNCHECKED_MARK};
use super::{RenderOptions, RenderResult, Renderer};

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let nodes = Renderer::new(options.clone()).render(doc);
    Ok(MarkdownWriter::new(options).write(&nodes))
}

/// Convert a document to Markdown with statistics.
pub fn to_markdown_with_stats(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    let (nodes, stats) = Renderer::new(options.clone()).render_with_stats(doc);
    let content = MarkdownWriter::new(options).write(&nodes);
    Ok(RenderResult::new(content, doc.meta.clone(), stats))
}

/// Serialize rendered nodes to Markdown.
pub fn nodes_to_markdown(nodes: &[Node], options: &RenderOptions) -> String {
    MarkdownWriter::new(options).write(nodes)
}

/// Markdown writer.
pub struct MarkdownWriter<'a> {
    options: &'a RenderOptions,
}

impl<'a> MarkdownWriter<'a> {
    /// Create a new Markdown writer.
    pub fn new(options: &'a RenderOptions) -> Self {
        Self { options }
    }

    /// Write top-level nodes separated by blank lines.
    pub fn write(&self, nodes: &[Node]) -> String {
        let mut output = String::new();
        for node in nodes {
            self.write_block(&mut output, node);
        }
        output.trim().to_string()
    }

    fn write_block(&self, output: &mut String, node: &Node) {
        match node {
            Node::Paragraph { style, children } => {
                let text = self.inline(children);
                match style {
                    ParagraphStyle::Body => output.push_str(&text),
                    ParagraphStyle::Emphasized => output.push_str(&format!("**{}**", text)),
                }
            }
            Node::Heading { level, children } => {
                output.push_str(&"#".repeat(level.number() as usize));
                output.push(' ');
                output.push_str(&self.inline(children));
            }
            Node::Image { url, caption, .. } => {
                let alt = caption.as_deref().map(|c| self.inline(c)).unwrap_or_default();
                output.push_str(&format!("![{}]({})", alt, link_destination(url)));
                if !alt.is_empty() {
                    output.push_str(&format!("\n*{}*", alt));
                }
            }
            Node::Quote { children, caption } => {
                for line in self.inline(children).lines() {
                    output.push_str(&format!("> {}\n", line));
                }
                if let Some(caption) = caption {
                    output.push_str(">\n");
                    output.push_str(&format!("> {}\n", self.inline(caption)));
                }
            }
            Node::List { .. } | Node::Checklist { .. } => self.write_list(output, node, ""),
            Node::CodeBlock { language, code } => {
                output.push_str("```");
                output.push_str(language.as_deref().unwrap_or(""));
                output.push('\n');
                output.push_str(code);
                if !code.ends_with('\n') {
                    output.push('\n');
                }
                output.push_str("```");
            }
            Node::Table { head, body } => self.write_table(output, head.as_ref(), body),
            Node::Placeholder { block, message } => {
                output.push_str(&format!("*[{}: {}]*", block, message));
            }
            Node::ListItem { .. } | Node::CheckItem { .. } => {
                self.write_item(output, node, ListStyle::Unordered, 1, "")
            }
            Node::Markup { .. } | Node::Text { .. } => {
                output.push_str(&self.inline(std::slice::from_ref(node)))
            }
        }

        if !output.ends_with('\n') {
            output.push('\n');
        }
        output.push('\n');
    }

    fn write_list(&self, output: &mut String, list: &Node, indent: &str) {
        let (style, items) = match list {
            Node::List { style, items } => (*style, items),
            Node::Checklist { items } => (ListStyle::Unordered, items),
            _ => return,
        };
        for (i, item) in items.iter().enumerate() {
            self.write_item(output, item, style, i + 1, indent);
        }
    }

    fn write_item(
        &self,
        output: &mut String,
        item: &Node,
        style: ListStyle,
        number: usize,
        indent: &str,
    ) {
        let marker = match style {
            ListStyle::Ordered => format!("{}.", number),
            ListStyle::Unordered => self.options.list_marker.to_string(),
        };

        let (prefix, children) = match item {
            Node::CheckItem { checked, children } => {
                (if *checked { " [x]" } else { " [ ]" }, children.as_slice())
            }
            other => ("", other.children()),
        };

        let (inline, nested): (Vec<&Node>, Vec<&Node>) = children
            .iter()
            .partition(|child| !matches!(child, Node::List { .. } | Node::Checklist { .. }));
        let inline: Vec<Node> = inline.into_iter().cloned().collect();

        output.push_str(&format!(
            "{}{}{} {}\n",
            indent,
            marker,
            prefix,
            self.inline(&inline)
        ));
        // Nested lists start at the content column of this item's marker.
        let child_indent = format!("{}{}", indent, " ".repeat(marker.len() + 1));
        for list in nested {
            self.write_list(output, list, &child_indent);
        }
    }

    fn write_table(&self, output: &mut String, head: Option<&TableRow>, body: &[TableRow]) {
        let columns = head
            .into_iter()
            .chain(body)
            .map(|row| row.cells.len())
            .max()
            .unwrap_or(0);
        if columns == 0 {
            return;
        }

        let header: Vec<String> = match head {
            Some(row) => self.table_cells(row, columns),
            None => vec![String::new(); columns],
        };
        self.write_table_row(output, &header);
        output.push('|');
        output.push_str(&" --- |".repeat(columns));
        output.push('\n');

        for row in body {
            let cells = self.table_cells(row, columns);
            self.write_table_row(output, &cells);
        }
    }

    fn table_cells(&self, row: &TableRow, columns: usize) -> Vec<String> {
        let mut cells: Vec<String> = row
            .cells
            .iter()
            .map(|cell| {
                self.inline(std::slice::from_ref(cell))
                    .replace('\n', " ")
                    .replace('|', "\\|")
            })
            .collect();
        cells.resize(columns, String::new());
        cells
    }

    fn write_table_row(&self, output: &mut String, cells: &[String]) {
        output.push('|');
        for cell in cells {
            output.push_str(&format!(" {} |", cell.trim()));
        }
        output.push('\n');
    }

    fn inline(&self, nodes: &[Node]) -> String {
        let mut text = String::new();
        for node in nodes {
            match node {
                Node::Markup { markup } => text.push_str(markup.as_str()),
                Node::Text { text: literal } => {
                    if self.options.escape_special_chars {
                        text.push_str(&escape_markdown(literal));
                    } else {
                        text.push_str(literal);
                    }
                }
                Node::CheckItem { checked, children } => {
                    text.push_str(if *checked { CHECKED_MARK } else { UNCHECKED_MARK });
                    text.push(' ');
                    text.push_str(&self.inline(children));
                }
                other => text.push_str(&self.inline(other.children())),
            }
        }
        text
    }
}

/// Format a URL as a link destination, using the `<...>` form when the bare
/// form would end early or break the link.
fn link_destination(url: &str) -> String {
    let needs_brackets = url
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '(' | ')' | '<' | '>'));
    if !needs_brackets {
        return url.to_string();
    }

    let mut result = String::with_capacity(url.len() + 2);
    result.push('<');
    for c in url.chars() {
        match c {
            '<' | '>' | '\\' => {
                result.push('\\');
                result.push(c);
            }
            '\n' => result.push_str("%0A"),
            '\r' => result.push_str("%0D"),
            _ => result.push(c),
        }
    }
    result.push('>');
    result
}

/// Escape special Markdown characters.
/// Only escape characters that could be misinterpreted as Markdown syntax.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            // Core formatting that must be escaped
            '\\' | '`' | '*' | '_' |
            // Brackets for links/images, pipe for tables
            '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn markdown(value: serde_json::Value) -> String {
        let doc = Document::from_value(&value).unwrap();
        to_markdown(&doc, &RenderOptions::default()).unwrap()
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("Hello *world*"), "Hello \\*world\\*");
        assert_eq!(escape_markdown("[link]"), "\\[link\\]");
    }

    #[test]
    fn test_render_heading_and_paragraph() {
        let out = markdown(json!([
            {"type": "header", "data": {"text": "Chapter 1", "level": 1}},
            {"type": "header", "data": {"text": "Aside", "level": 7}},
            {"type": "paragraph", "data": {"text": "Hello, <i>world</i>!"}}
        ]));
        assert_eq!(out, "# Chapter 1\n\n**Aside**\n\nHello, <i>world</i>!");
    }

    #[test]
    fn test_nested_list() {
        let out = markdown(json!([{"type": "list", "data": {"style": "ordered", "items": [
            {"content": "one", "items": ["one.a", "one.b"]},
            "two"
        ]}}]));
        assert_eq!(out, "1. one\n   1. one.a\n   2. one.b\n2. two");
    }

    #[test]
    fn test_nested_list_under_wide_marker() {
        let mut items: Vec<serde_json::Value> = (1..10).map(|i| json!(format!("i{}", i))).collect();
        items.push(json!({"content": "i10", "items": [{"content": "deep", "items": ["deeper"]}]}));
        let out = markdown(json!([{"type": "list", "data": {"style": "ordered", "items": items}}]));
        assert!(out.ends_with("9. i9\n10. i10\n    1. deep\n       1. deeper"), "{}", out);
    }

    #[test]
    fn test_nested_unordered_list() {
        let out = markdown(json!([
            {"type": "list", "data": {"items": [{"content": "a", "items": [{"content": "b", "items": ["c"]}]}]}}
        ]));
        assert_eq!(out, "- a\n  - b\n    - c");
    }

    #[test]
    fn test_checklist() {
        let out = markdown(json!([{"type": "todo", "data": {"items": [
            {"checked": true, "text": "done"},
            {"checked": false, "text": "open"}
        ]}}]));
        assert_eq!(out, "- [x] done\n- [ ] open");
    }

    #[test]
    fn test_table_without_headings() {
        let out = markdown(json!([{"type": "table", "data": {
            "content": [["a", "b"], ["c"]],
            "withHeadings": false
        }}]));
        assert_eq!(out, "|  |  |\n| --- | --- |\n| a | b |\n| c |  |");
    }

    #[test]
    fn test_code_and_quote() {
        let out = markdown(json!([
            {"type": "code", "data": {"code": "let x = 1;", "language": "rust"}},
            {"type": "quote", "data": {"text": "Wise words", "caption": "Someone"}}
        ]));
        assert_eq!(
            out,
            "```rust\nlet x = 1;\n```\n\n> Wise words\n>\n> — Someone"
        );
    }

    #[test]
    fn test_image_url_destination() {
        assert_eq!(link_destination("https://x.test/a.png"), "https://x.test/a.png");
        assert_eq!(
            link_destination("https://x.test/my photo (1).png"),
            "<https://x.test/my photo (1).png>"
        );
        assert_eq!(link_destination("a<b>"), "<a\\<b\\>>");

        let out = markdown(json!([{"type": "image", "data": {"url": "/img/a b.png"}}]));
        assert_eq!(out, "![](</img/a b.png>)");
    }

    #[test]
    fn test_complex_object_is_escaped() {
        let out = markdown(json!([{"type": "list", "data": {"items": [null]}}]));
        assert_eq!(out, "- \\[Complex Object\\]");
    }
}
