//! Block dispatch and the per-variant renderers.

use std::fmt;
use std::sync::Arc;

use super::diagnostics::{Diagnostic, DiagnosticSink, LogSink};
use super::list::{render_checklist, render_list};
use super::table::render_table;
use super::tree::{ImageStyle, Node, ParagraphStyle, CAPTION_MARKER};
use super::visitor::{BlockVisitor, VisitorAction};
use super::{RenderOptions, RenderStats};
use crate::model::{
    Block, CodeData, Document, HeaderData, ImageData, InvalidTable, ListItem, Markup, QuoteData,
    UNEXTRACTABLE_CODE,
};

/// Render a document with the default diagnostic sink.
pub fn render_document(doc: &Document, options: &RenderOptions) -> Vec<Node> {
    Renderer::new(options.clone()).render(doc)
}

/// Why a known block could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BlockError {
    Table(InvalidTable),
    MissingImageSource,
}

impl fmt::Display for BlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockError::Table(reason) => write!(f, "{}", reason),
            BlockError::MissingImageSource => write!(f, "image has no url"),
        }
    }
}

/// Block renderer.
///
/// Rendering is a pure projection of the document: the renderer holds no
/// per-document state, so one instance can render any number of documents,
/// concurrently if needed. The only side effect is reporting diagnostics.
pub struct Renderer {
    options: RenderOptions,
    sink: Arc<dyn DiagnosticSink>,
    visitor: Option<Box<dyn BlockVisitor>>,
}

impl Renderer {
    /// Create a renderer that reports diagnostics to the log.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            sink: Arc::new(LogSink),
            visitor: None,
        }
    }

    /// Report diagnostics to the given sink.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Consult a visitor before each block.
    pub fn with_visitor<V: BlockVisitor + 'static>(self, visitor: V) -> Self {
        self.with_boxed_visitor(Box::new(visitor))
    }

    /// Consult an already boxed visitor before each block.
    pub fn with_boxed_visitor(mut self, visitor: Box<dyn BlockVisitor>) -> Self {
        self.visitor = Some(visitor);
        self
    }

    /// Options in use.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render a document into one node per block that produced output.
    pub fn render(&self, doc: &Document) -> Vec<Node> {
        let mut stats = RenderStats::new();
        self.render_internal(doc, &mut stats, false)
    }

    /// Render a document and collect statistics.
    pub fn render_with_stats(&self, doc: &Document) -> (Vec<Node>, RenderStats) {
        let mut stats = RenderStats::new();
        let nodes = self.render_internal(doc, &mut stats, true);
        stats.count_text(&super::text::nodes_to_text(&nodes));
        (nodes, stats)
    }

    fn render_internal(
        &self,
        doc: &Document,
        stats: &mut RenderStats,
        collect: bool,
    ) -> Vec<Node> {
        let mut nodes = Vec::with_capacity(doc.blocks.len());

        for (index, block) in doc.blocks.iter().enumerate() {
            if collect {
                stats.add_block(block);
            }

            if let Some(visitor) = &self.visitor {
                match visitor.visit_block(index, block) {
                    VisitorAction::Continue => {}
                    VisitorAction::Replace(node) => {
                        if collect {
                            stats.add_visited();
                        }
                        nodes.push(node);
                        continue;
                    }
                    VisitorAction::Skip => {
                        if collect {
                            stats.add_visited();
                        }
                        continue;
                    }
                }
            }

            if let Some(node) = self.render_block(index, block) {
                if collect && node.is_placeholder() {
                    stats.add_placeholder();
                }
                nodes.push(node);
            }
        }

        nodes
    }

    /// Render a single block; `None` means no output.
    ///
    /// Never fails: unknown blocks are reported and dropped, blocks that
    /// cannot be rendered are reported and replaced by a placeholder.
    pub fn render_block(&self, index: usize, block: &Block) -> Option<Node> {
        log::trace!("rendering {} block at index {}", block.kind(), index);

        let node = match block {
            Block::Paragraph(p) => Ok(paragraph(ParagraphStyle::Body, p.text.clone())),
            Block::Header(h) => Ok(self.render_header(h)),
            Block::Image(image) => self.render_image(image),
            Block::Quote(quote) => Ok(self.render_quote(quote)),
            Block::List(list) if list.is_checklist() => Ok(render_checklist(
                list.items.iter().filter_map(|item| match item {
                    ListItem::Check { item } => Some(item),
                    _ => None,
                }),
            )),
            Block::List(list) => Ok(render_list(list.style, &list.items)),
            Block::Checklist(checklist) => Ok(render_checklist(&checklist.items)),
            Block::Code(code) => Ok(self.render_code(index, code)),
            Block::Table(table) => render_table(
                &table.content,
                table.headings(self.options.table_headings),
            )
            .map_err(BlockError::Table),
            Block::Unknown { kind, data } => {
                self.sink.report(Diagnostic::UnknownBlock {
                    index,
                    kind: kind.clone(),
                    data: data.clone(),
                });
                return None;
            }
        };

        Some(node.unwrap_or_else(|err| {
            self.sink.report(Diagnostic::InvalidBlock {
                index,
                kind: block.kind().to_string(),
                reason: err.to_string(),
            });
            Node::placeholder(block.kind())
        }))
    }

    fn render_header(&self, header: &HeaderData) -> Node {
        match header.level {
            Some(level) => Node::Heading {
                level,
                children: vec![Node::markup(header.text.clone())],
            },
            None => paragraph(ParagraphStyle::Emphasized, header.text.clone()),
        }
    }

    fn render_image(&self, image: &ImageData) -> Result<Node, BlockError> {
        let url = image.url.clone().ok_or(BlockError::MissingImageSource)?;
        Ok(Node::Image {
            url,
            style: ImageStyle {
                bordered: image.with_border,
                stretched: image.stretched,
                background: image.with_background,
            },
            caption: image
                .caption
                .as_ref()
                .map(|caption| vec![Node::markup(caption.clone())]),
        })
    }

    fn render_quote(&self, quote: &QuoteData) -> Node {
        Node::Quote {
            children: vec![Node::markup(quote.text.clone())],
            caption: quote
                .caption
                .as_ref()
                .map(|caption| vec![Node::text(CAPTION_MARKER), Node::markup(caption.clone())]),
        }
    }

    fn render_code(&self, index: usize, code: &CodeData) -> Node {
        let text = match code.code.extract() {
            Some(text) => text.to_string(),
            None => {
                self.sink.report(Diagnostic::InvalidBlock {
                    index,
                    kind: "code".to_string(),
                    reason: "rendered element has no readable text".to_string(),
                });
                UNEXTRACTABLE_CODE.to_string()
            }
        };
        Node::CodeBlock {
            language: code.language.clone(),
            code: text,
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

fn paragraph(style: ParagraphStyle, text: Markup) -> Node {
    Node::Paragraph {
        style,
        children: vec![Node::markup(text)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HeadingLevel;
    use crate::render::diagnostics::MemorySink;
    use serde_json::json;

    fn renderer() -> (Renderer, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let renderer = Renderer::default().with_sink(sink.clone());
        (renderer, sink)
    }

    fn render_one(value: serde_json::Value) -> (Option<Node>, Arc<MemorySink>) {
        let (renderer, sink) = renderer();
        let block = Block::decode(&value);
        (renderer.render_block(0, &block), sink)
    }

    #[test]
    fn test_unknown_block_is_dropped_and_reported_once() {
        let (node, sink) = render_one(json!({"type": "warning", "data": {"title": "x"}}));
        assert!(node.is_none());
        assert_eq!(
            sink.diagnostics(),
            vec![Diagnostic::UnknownBlock {
                index: 0,
                kind: "warning".into(),
                data: json!({"title": "x"})
            }]
        );
    }

    #[test]
    fn test_header_levels() {
        for (level, expected) in [
            (1, HeadingLevel::H1),
            (2, HeadingLevel::H2),
            (3, HeadingLevel::H3),
            (4, HeadingLevel::H4),
        ] {
            let (node, _) = render_one(json!({"type": "header", "data": {"text": "T", "level": level}}));
            assert!(matches!(node, Some(Node::Heading { level: l, .. }) if l == expected));
        }

        for level in [json!(0), json!(5), json!(2.5), json!(-1), json!(null)] {
            let (node, _) = render_one(json!({"type": "header", "data": {"text": "T", "level": level}}));
            assert!(matches!(
                node,
                Some(Node::Paragraph {
                    style: ParagraphStyle::Emphasized,
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_quote_caption_marker() {
        let (node, _) = render_one(json!({"type": "quote", "data": {"text": "Q", "caption": "Ada"}}));
        let Some(Node::Quote { caption, .. }) = node else {
            panic!("expected quote");
        };
        assert_eq!(
            caption,
            Some(vec![
                Node::text("— "),
                Node::markup(Markup::from_trusted("Ada"))
            ])
        );

        let (node, _) = render_one(json!({"type": "quote", "data": {"text": "Q", "caption": ""}}));
        assert!(matches!(node, Some(Node::Quote { caption: None, .. })));
    }

    #[test]
    fn test_image_without_url_is_placeholder() {
        let (node, sink) = render_one(json!({"type": "image", "data": {"caption": "c"}}));
        assert_eq!(node, Some(Node::placeholder("image")));
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_invalid_table_is_placeholder() {
        let (node, sink) = render_one(json!({"type": "table", "data": {"content": 42}}));
        assert_eq!(node, Some(Node::placeholder("table")));
        assert!(matches!(
            &sink.diagnostics()[0],
            Diagnostic::InvalidBlock { kind, .. } if kind == "table"
        ));
    }

    #[test]
    fn test_table_heading_policy() {
        let block = Block::decode(&json!({"type": "table", "data": {
            "content": [["a"], ["b"]],
            "withHeadings": false
        }}));

        let explicit = Renderer::default().render_block(0, &block);
        assert!(matches!(explicit, Some(Node::Table { head: None, .. })));

        let legacy = Renderer::new(RenderOptions::new().with_legacy_headings()).render_block(0, &block);
        assert!(matches!(legacy, Some(Node::Table { head: Some(_), .. })));
    }

    #[test]
    fn test_code_extraction_failure() {
        let (node, sink) = render_one(json!({"type": "code", "data": {"code": {"tagName": "PRE"}, "language": "js"}}));
        assert_eq!(
            node,
            Some(Node::CodeBlock {
                language: Some("js".into()),
                code: "Unable to extract code".into()
            })
        );
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_list_of_checks_matches_checklist() {
        let items = json!([{"checked": true, "text": "a"}, {"checked": false, "text": "b"}]);
        let (as_list, _) = render_one(json!({"type": "list", "data": {"style": "ordered", "items": items}}));
        let (as_checklist, _) = render_one(json!({"type": "checklist", "data": {"items": items}}));
        assert_eq!(as_list, as_checklist);
    }

    #[test]
    fn test_malformed_block_does_not_affect_siblings() {
        let doc = Document::from_value(&json!([
            {"type": "paragraph", "data": {"text": "before"}},
            {"type": "table", "data": {}},
            {"type": "nope"},
            {"type": "paragraph", "data": {"text": "after"}}
        ]))
        .unwrap();
        let (renderer, sink) = renderer();
        let nodes = renderer.render(&doc);

        assert_eq!(nodes.len(), 3);
        assert!(nodes[1].is_placeholder());
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_idempotent() {
        let doc = Document::from_value(&json!([
            {"type": "header", "data": {"text": "T", "level": 2}},
            {"type": "list", "data": {"items": ["a", {"items": ["b"]}]}}
        ]))
        .unwrap();
        let renderer = Renderer::default();
        assert_eq!(renderer.render(&doc), renderer.render(&doc));
    }

    #[test]
    fn test_render_with_stats() {
        let doc = Document::from_value(&json!([
            {"type": "paragraph", "data": {"text": "one two"}},
            {"type": "table", "data": {"content": null}},
            {"type": "mystery"}
        ]))
        .unwrap();
        let (renderer, _) = renderer();
        let (_, stats) = renderer.render_with_stats(&doc);

        assert_eq!(stats.block_count, 3);
        assert_eq!(stats.paragraph_count, 1);
        assert_eq!(stats.table_count, 1);
        assert_eq!(stats.unknown_count, 1);
        assert_eq!(stats.placeholder_count, 1);
        assert!(stats.word_count >= 2);
    }
}
