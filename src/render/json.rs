//! JSON rendering of the render tree.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{Document, DocumentMeta};

use super::tree::Node;
use super::{RenderOptions, Renderer};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

#[derive(Serialize)]
struct RenderedDocument<'a> {
    meta: &'a DocumentMeta,
    nodes: &'a [Node],
}

/// Convert a document to JSON.
///
/// The output carries the envelope metadata and the rendered node tree, not
/// the decoded blocks.
pub fn to_json(doc: &Document, options: &RenderOptions, format: JsonFormat) -> Result<String> {
    let nodes = Renderer::new(options.clone()).render(doc);
    rendered_to_json(&doc.meta, &nodes, format)
}

/// Serialize already rendered nodes together with their envelope metadata.
pub fn rendered_to_json(meta: &DocumentMeta, nodes: &[Node], format: JsonFormat) -> Result<String> {
    serialize(&RenderedDocument { meta, nodes }, format)
}

/// Serialize rendered nodes to a JSON array.
pub fn nodes_to_json(nodes: &[Node], format: JsonFormat) -> Result<String> {
    serialize(&nodes, format)
}

fn serialize<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
