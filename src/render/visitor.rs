//! Visitor pattern for customizing block rendering.
//!
//! A visitor is consulted once per block before the built-in renderers run.
//! It can keep the default rendering, replace the block with its own node, or
//! drop it. Replacing an unknown block suppresses its diagnostic.
//!
//! # Example
//!
//! ```
//! use blockdoc::render::visitor::{BlockVisitor, VisitorAction};
//! use blockdoc::render::Node;
//! use serde_json::Value;
//!
//! struct EmbedVisitor;
//!
//! impl BlockVisitor for EmbedVisitor {
//!     fn visit_unknown(&self, kind: &str, data: &Value) -> VisitorAction {
//!         match (kind, data.get("source").and_then(Value::as_str)) {
//!             ("embed", Some(source)) => VisitorAction::Replace(Node::text(source)),
//!             _ => VisitorAction::Continue,
//!         }
//!     }
//! }
//! ```

use super::Node;
use crate::model::{Block, CodeData, ImageData, TableData};
use serde_json::Value;

/// Action returned by visitor methods to control rendering behavior.
#[derive(Debug, Clone, Default)]
pub enum VisitorAction {
    /// Continue with default rendering.
    #[default]
    Continue,

    /// Replace the block with custom output.
    Replace(Node),

    /// Skip this block entirely (produce no output).
    Skip,
}

impl VisitorAction {
    /// Check if this action indicates the block should be skipped.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::Skip)
    }

    /// Get replacement content if available.
    pub fn replacement(&self) -> Option<&Node> {
        match self {
            VisitorAction::Replace(node) => Some(node),
            _ => None,
        }
    }
}

/// Trait for visiting blocks during rendering.
///
/// All methods return `VisitorAction::Continue` by default. Visitors take
/// `&self` so a renderer can be reused across documents and threads.
pub trait BlockVisitor: Send + Sync {
    /// Called before rendering any block.
    ///
    /// The default implementation forwards to the per-kind methods below.
    fn visit_block(&self, index: usize, block: &Block) -> VisitorAction {
        let _ = index;
        match block {
            Block::Image(image) => self.visit_image(image),
            Block::Table(table) => self.visit_table(table),
            Block::Code(code) => self.visit_code(code),
            Block::Unknown { kind, data } => self.visit_unknown(kind, data),
            _ => VisitorAction::Continue,
        }
    }

    /// Called before rendering an image.
    fn visit_image(&self, image: &ImageData) -> VisitorAction {
        let _ = image;
        VisitorAction::Continue
    }

    /// Called before rendering a table.
    fn visit_table(&self, table: &TableData) -> VisitorAction {
        let _ = table;
        VisitorAction::Continue
    }

    /// Called before rendering a code block.
    fn visit_code(&self, code: &CodeData) -> VisitorAction {
        let _ = code;
        VisitorAction::Continue
    }

    /// Called for a block of unrecognised type.
    fn visit_unknown(&self, kind: &str, data: &Value) -> VisitorAction {
        let _ = (kind, data);
        VisitorAction::Continue
    }
}

/// Default visitor that performs no customization.
#[derive(Debug, Clone, Default)]
pub struct DefaultVisitor;

impl DefaultVisitor {
    /// Create a new default visitor.
    pub fn new() -> Self {
        Self
    }
}

impl BlockVisitor for DefaultVisitor {}

/// Visitor that skips all images.
#[derive(Debug, Clone, Default)]
pub struct SkipImagesVisitor;

impl BlockVisitor for SkipImagesVisitor {
    fn visit_image(&self, _image: &ImageData) -> VisitorAction {
        VisitorAction::Skip
    }
}

/// Composite visitor that chains multiple visitors.
///
/// Visitors are called in order. The first visitor that returns
/// a non-Continue action determines the result.
pub struct CompositeVisitor {
    visitors: Vec<Box<dyn BlockVisitor>>,
}

impl CompositeVisitor {
    /// Create a new composite visitor.
    pub fn new() -> Self {
        Self {
            visitors: Vec::new(),
        }
    }

    /// Add a visitor to the chain.
    pub fn with_visitor<V: BlockVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitors.push(Box::new(visitor));
        self
    }

    /// Number of chained visitors.
    pub fn len(&self) -> usize {
        self.visitors.len()
    }

    /// Check if the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }
}

impl Default for CompositeVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockVisitor for CompositeVisitor {
    fn visit_block(&self, index: usize, block: &Block) -> VisitorAction {
        for visitor in &self.visitors {
            let action = visitor.visit_block(index, block);
            if !matches!(action, VisitorAction::Continue) {
                return action;
            }
        }
        VisitorAction::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_visitor_action_default() {
        let action = VisitorAction::default();
        assert!(matches!(action, VisitorAction::Continue));
    }

    #[test]
    fn test_visitor_action_should_skip() {
        assert!(!VisitorAction::Continue.should_skip());
        assert!(!VisitorAction::Replace(Node::text("test")).should_skip());
        assert!(VisitorAction::Skip.should_skip());
    }

    #[test]
    fn test_visitor_action_replacement() {
        assert!(VisitorAction::Continue.replacement().is_none());
        assert!(VisitorAction::Skip.replacement().is_none());
        assert_eq!(
            VisitorAction::Replace(Node::text("hello")).replacement(),
            Some(&Node::text("hello"))
        );
    }

    #[test]
    fn test_skip_images_visitor() {
        let visitor = SkipImagesVisitor;
        let block = Block::decode(&json!({"type": "image", "data": {"url": "a.png"}}));
        assert!(visitor.visit_block(0, &block).should_skip());

        let block = Block::decode(&json!({"type": "paragraph", "data": {"text": "a"}}));
        assert!(!visitor.visit_block(0, &block).should_skip());
    }

    #[test]
    fn test_composite_visitor() {
        let composite = CompositeVisitor::new()
            .with_visitor(DefaultVisitor)
            .with_visitor(SkipImagesVisitor);
        assert_eq!(composite.len(), 2);

        let image = Block::decode(&json!({"type": "image", "data": {"url": "a.png"}}));
        assert!(composite.visit_block(0, &image).should_skip());

        let para = Block::decode(&json!({"type": "paragraph", "data": {}}));
        assert!(matches!(
            composite.visit_block(1, &para),
            VisitorAction::Continue
        ));
    }
}
