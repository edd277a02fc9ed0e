//! # blockdoc
//!
//! Renderer for block-structured rich text documents.
//!
//! Block editors store an article as a list of typed blocks (paragraphs,
//! headers, images, quotes, lists, checklists, code, tables). This library
//! decodes that JSON into strongly typed blocks once, maps every block to a
//! toolkit-agnostic render tree, and serializes the tree to HTML, Markdown,
//! plain text or JSON.
//!
//! ## Quick Start
//!
//! ```
//! use blockdoc::{parse_str, render};
//!
//! fn main() -> blockdoc::Result<()> {
//!     let doc = parse_str(r#"{"blocks": [
//!         {"type": "header", "data": {"text": "Hello", "level": 2}},
//!         {"type": "paragraph", "data": {"text": "A <b>bold</b> start."}}
//!     ]}"#)?;
//!
//!     let options = render::RenderOptions::default();
//!     let markdown = render::to_markdown(&doc, &options)?;
//!     assert_eq!(markdown, "## Hello\n\nA <b>bold</b> start.");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Closed block model**: every stored shape is decoded once at the boundary
//! - **Fault containment**: a malformed block becomes a placeholder, an
//!   unknown block is reported and skipped, the rest of the article renders
//! - **Multiple output formats**: HTML, Markdown, plain text, JSON
//! - **Pluggable diagnostics**: route warnings to the log, memory or nowhere
//! - **Visitors**: skip or replace blocks before they are rendered

pub mod error;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    Block, ChecklistItem, CodeSource, Document, DocumentMeta, HeadingLevel, ListItem, ListStyle,
    Markup, TableContent, TableData,
};
pub use render::{
    Diagnostic, DiagnosticSink, JsonFormat, MemorySink, Node, RenderOptions, RenderStats,
    Renderer, TableHeadings,
};

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use render::{BlockVisitor, LogSink};
use serde_json::Value;

/// Parse a stored document from a JSON string.
///
/// # Example
///
/// ```
/// use blockdoc::parse_str;
///
/// let doc = parse_str(r#"[{"type": "paragraph", "data": {"text": "Hi"}}]"#).unwrap();
/// assert_eq!(doc.len(), 1);
/// ```
pub fn parse_str(json: &str) -> Result<Document> {
    let value: Value = serde_json::from_str(json)?;
    Document::from_value(&value)
}

/// Parse a stored document from bytes.
pub fn parse_slice(data: &[u8]) -> Result<Document> {
    let value: Value = serde_json::from_slice(data)?;
    Document::from_value(&value)
}

/// Parse a stored document from a reader.
///
/// # Example
///
/// ```no_run
/// use blockdoc::parse_reader;
/// use std::fs::File;
///
/// let file = File::open("article.json").unwrap();
/// let doc = parse_reader(file).unwrap();
/// ```
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    let value: Value = serde_json::from_reader(reader)?;
    Document::from_value(&value)
}

/// Parse a stored document from a file.
///
/// # Example
///
/// ```no_run
/// use blockdoc::parse_file;
///
/// let doc = parse_file("article.json").unwrap();
/// println!("Blocks: {}", doc.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let path = path.as_ref();
    log::debug!("reading document from {}", path.display());
    let file = File::open(path)?;
    parse_reader(BufReader::new(file))
}

/// Convert a stored document to HTML.
///
/// # Example
///
/// ```
/// let html = blockdoc::to_html(r#"[{"type": "paragraph", "data": {"text": "Hi"}}]"#).unwrap();
/// assert_eq!(html, "<p class=\"blockdoc-paragraph\">Hi</p>\n");
/// ```
pub fn to_html(json: &str) -> Result<String> {
    let doc = parse_str(json)?;
    render::to_html(&doc, &RenderOptions::default())
}

/// Convert a stored document to Markdown.
pub fn to_markdown(json: &str) -> Result<String> {
    let doc = parse_str(json)?;
    render::to_markdown(&doc, &RenderOptions::default())
}

/// Convert a stored document to plain text.
pub fn to_text(json: &str) -> Result<String> {
    let doc = parse_str(json)?;
    render::to_text(&doc, &RenderOptions::default())
}

/// Convert a stored document to a JSON render tree.
pub fn to_json(json: &str, format: JsonFormat) -> Result<String> {
    let doc = parse_str(json)?;
    render::to_json(&doc, &RenderOptions::default(), format)
}

/// Builder for parsing and rendering documents.
///
/// The document is rendered once when parsed; every output format is then
/// produced from the same render tree, so diagnostics are reported once.
///
/// # Example
///
/// ```
/// use blockdoc::Blockdoc;
///
/// let html = Blockdoc::new()
///     .with_class_prefix("article-")
///     .parse_str(r#"[{"type": "paragraph", "data": {"text": "Hi"}}]"#)?
///     .to_html();
/// assert_eq!(html, "<p class=\"article-paragraph\">Hi</p>\n");
/// # Ok::<(), blockdoc::Error>(())
/// ```
pub struct Blockdoc {
    options: RenderOptions,
    sink: Arc<dyn DiagnosticSink>,
    visitor: Option<Box<dyn BlockVisitor>>,
}

impl Blockdoc {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: RenderOptions::default(),
            sink: Arc::new(LogSink),
            visitor: None,
        }
    }

    /// Replace all render options.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Treat the first table row as a header regardless of `withHeadings`.
    pub fn with_legacy_headings(mut self) -> Self {
        self.options = self.options.with_legacy_headings();
        self
    }

    /// Set the CSS class prefix used by the HTML output.
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options = self.options.with_class_prefix(prefix);
        self
    }

    /// Report diagnostics to the given sink.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Consult a visitor before each block.
    pub fn with_visitor<V: BlockVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitor = Some(Box::new(visitor));
        self
    }

    /// Parse and render a JSON string.
    pub fn parse_str(self, json: &str) -> Result<BlockdocResult> {
        let document = parse_str(json)?;
        Ok(self.render(document))
    }

    /// Parse and render a file.
    pub fn parse_file<P: AsRef<Path>>(self, path: P) -> Result<BlockdocResult> {
        let document = parse_file(path)?;
        Ok(self.render(document))
    }

    /// Render an already decoded document.
    pub fn render(self, document: Document) -> BlockdocResult {
        let mut renderer = Renderer::new(self.options.clone()).with_sink(self.sink);
        if let Some(visitor) = self.visitor {
            renderer = renderer.with_boxed_visitor(visitor);
        }
        let (nodes, stats) = renderer.render_with_stats(&document);
        BlockdocResult {
            document,
            nodes,
            stats,
            options: self.options,
        }
    }
}

impl Default for Blockdoc {
    fn default() -> Self {
        Self::new()
    }
}

/// A parsed and rendered document.
pub struct BlockdocResult {
    document: Document,
    nodes: Vec<Node>,
    stats: RenderStats,
    options: RenderOptions,
}

impl BlockdocResult {
    /// Convert to HTML.
    pub fn to_html(&self) -> String {
        render::nodes_to_html(&self.nodes, &self.options)
    }

    /// Convert to Markdown.
    pub fn to_markdown(&self) -> String {
        render::nodes_to_markdown(&self.nodes, &self.options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> String {
        render::nodes_to_text(&self.nodes)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::rendered_to_json(&self.document.meta, &self.nodes, format)
    }

    /// The render tree.
    pub fn tree(&self) -> &[Node] {
        &self.nodes
    }

    /// Statistics gathered while rendering.
    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
