//! Toolkit-agnostic render tree.
//!
//! The dispatcher turns each block into one [`Node`]. Hosts either walk the
//! tree themselves or hand it to one of the bundled serializers.

use crate::model::{HeadingLevel, ListStyle, Markup};
use serde::Serialize;

/// Indicator drawn in front of a ticked checklist entry.
pub const CHECKED_MARK: &str = "☑";

/// Indicator drawn in front of an open checklist entry.
pub const UNCHECKED_MARK: &str = "☐";

/// Marker placed before a quote attribution.
pub const CAPTION_MARKER: &str = "— ";

/// Text shown for list entries that have no textual form.
pub const COMPLEX_OBJECT: &str = "[Complex Object]";

/// Text shown in place of a block whose content cannot be rendered.
pub const PLACEHOLDER_MESSAGE: &str = "content missing or invalid";

/// A node of the render tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    /// Trusted inline markup, emitted verbatim
    Markup { markup: Markup },

    /// Literal text, escaped by serializers
    Text { text: String },

    /// A paragraph
    Paragraph {
        style: ParagraphStyle,
        children: Vec<Node>,
    },

    /// A heading of level 1 to 4
    Heading {
        level: HeadingLevel,
        children: Vec<Node>,
    },

    /// An image with optional caption
    Image {
        url: String,
        style: ImageStyle,
        caption: Option<Vec<Node>>,
    },

    /// A quotation; the caption starts with [`CAPTION_MARKER`]
    Quote {
        children: Vec<Node>,
        caption: Option<Vec<Node>>,
    },

    /// An ordered or unordered list of [`Node::ListItem`] / [`Node::CheckItem`]
    List { style: ListStyle, items: Vec<Node> },

    /// An entry of a generic list
    ListItem { children: Vec<Node> },

    /// A checklist of [`Node::CheckItem`]
    Checklist { items: Vec<Node> },

    /// A checklist entry; ticked entries show [`CHECKED_MARK`] and struck text
    CheckItem { checked: bool, children: Vec<Node> },

    /// A fixed-width code listing
    CodeBlock {
        language: Option<String>,
        code: String,
    },

    /// A table grid
    Table {
        head: Option<TableRow>,
        body: Vec<TableRow>,
    },

    /// A clearly marked stand-in for a block that could not be rendered
    Placeholder { block: String, message: String },
}

impl Node {
    /// Create a literal text node.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text { text: text.into() }
    }

    /// Create a markup node.
    pub fn markup(markup: Markup) -> Self {
        Node::Markup { markup }
    }

    /// Create a placeholder for a block of the given kind.
    pub fn placeholder(block: impl Into<String>) -> Self {
        Node::Placeholder {
            block: block.into(),
            message: PLACEHOLDER_MESSAGE.to_string(),
        }
    }

    /// Check if this is a placeholder.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Node::Placeholder { .. })
    }

    /// Direct children, in document order.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Paragraph { children, .. }
            | Node::Heading { children, .. }
            | Node::Quote { children, .. }
            | Node::ListItem { children }
            | Node::CheckItem { children, .. } => children,
            Node::List { items, .. } | Node::Checklist { items } => items,
            _ => &[],
        }
    }
}

/// Paragraph styles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphStyle {
    /// Regular body text
    #[default]
    Body,
    /// Emphasized paragraph used for headings without a usable level
    Emphasized,
}

/// Presentation flags of an image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImageStyle {
    /// Draw a border
    pub bordered: bool,
    /// Stretch to the content width
    pub stretched: bool,
    /// Put on a background panel
    pub background: bool,
}

/// A table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<Node>,

    /// Background stripe, `None` for header rows
    pub stripe: Option<Stripe>,
}

impl TableRow {
    /// Create a header row.
    pub fn header(cells: Vec<Node>) -> Self {
        Self {
            cells,
            stripe: None,
        }
    }

    /// Create a body row at the given zero-based body index.
    pub fn body(cells: Vec<Node>, index: usize) -> Self {
        Self {
            cells,
            stripe: Some(Stripe::for_index(index)),
        }
    }

    /// Check if this is a header row.
    pub fn is_header(&self) -> bool {
        self.stripe.is_none()
    }
}

/// Alternating background of body rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stripe {
    /// Zero-indexed even rows
    Even,
    /// Zero-indexed odd rows
    Odd,
}

impl Stripe {
    /// Stripe for a zero-based body row index.
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            Stripe::Even
        } else {
            Stripe::Odd
        }
    }
}
