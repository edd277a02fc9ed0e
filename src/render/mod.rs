//! Rendering of decoded documents into a render tree and output formats.
//!
//! [`Renderer`] maps each [`Block`](crate::model::Block) to a [`Node`]; the
//! serializers in this module then turn the node tree into HTML, Markdown,
//! plain text or JSON.

mod diagnostics;
mod dispatch;
mod html;
mod json;
mod list;
mod markdown;
mod options;
mod result;
mod table;
mod text;
mod tree;
pub mod visitor;

pub use diagnostics::{Diagnostic, DiagnosticSink, LogSink, MemorySink, NullSink};
pub use dispatch::{render_document, Renderer};
pub use html::{nodes_to_html, to_html, to_html_with_stats, HtmlWriter};
pub use json::{nodes_to_json, rendered_to_json, to_json, JsonFormat};
pub use list::{render_check_item, render_checklist, render_list, resolve_item};
pub use markdown::{nodes_to_markdown, to_markdown, to_markdown_with_stats, MarkdownWriter};
pub use options::{RenderOptions, TableHeadings};
pub use result::{RenderResult, RenderStats};
pub use table::render_table;
pub use text::{nodes_to_text, to_text, TextWriter};
pub use tree::{
    ImageStyle, Node, ParagraphStyle, Stripe, TableRow, CAPTION_MARKER, CHECKED_MARK,
    COMPLEX_OBJECT, PLACEHOLDER_MESSAGE, UNCHECKED_MARK,
};
pub use visitor::{
    BlockVisitor, CompositeVisitor, DefaultVisitor, SkipImagesVisitor, VisitorAction,
};
