//! Rendering options and configuration.

pub use crate::model::TableHeadings;

/// Options for rendering document content.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// How the `withHeadings` flag of tables is resolved
    pub table_headings: TableHeadings,

    /// Prefix for CSS class hooks in HTML output
    pub class_prefix: String,

    /// Character to use for unordered list markers in Markdown
    pub list_marker: char,

    /// Escape special Markdown characters in literal text
    pub escape_special_chars: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the table heading policy.
    pub fn with_table_headings(mut self, policy: TableHeadings) -> Self {
        self.table_headings = policy;
        self
    }

    /// Always render the first table row as headings.
    pub fn with_legacy_headings(self) -> Self {
        self.with_table_headings(TableHeadings::Legacy)
    }

    /// Set the CSS class prefix.
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }

    /// Set the list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }

    /// Enable or disable Markdown escaping of literal text.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// Build a prefixed class name.
    pub fn class(&self, name: &str) -> String {
        format!("{}{}", self.class_prefix, name)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            table_headings: TableHeadings::Explicit,
            class_prefix: "blockdoc-".to_string(),
            list_marker: '-',
            escape_special_chars: true,
        }
    }
}
