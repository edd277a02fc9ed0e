//! Rendering result with metadata and statistics.

use crate::model::{Block, DocumentMeta};
use serde::Serialize;

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize)]
pub struct RenderResult {
    /// The rendered content (HTML, Markdown, text...)
    pub content: String,

    /// Document metadata (copied from source document)
    pub meta: DocumentMeta,

    /// Rendering statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, meta: DocumentMeta, stats: RenderStats) -> Self {
        Self {
            content,
            meta,
            stats,
        }
    }
}

/// Statistics collected while rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderStats {
    /// Total number of blocks seen
    pub block_count: u32,

    /// Number of paragraphs
    pub paragraph_count: u32,

    /// Number of headings (including ones rendered with the fallback style)
    pub heading_count: u32,

    /// Number of images
    pub image_count: u32,

    /// Number of quotes
    pub quote_count: u32,

    /// Number of lists
    pub list_count: u32,

    /// Number of list and checklist entries, nested ones included
    pub list_item_count: u32,

    /// Number of checklists
    pub checklist_count: u32,

    /// Number of code blocks
    pub code_count: u32,

    /// Number of tables
    pub table_count: u32,

    /// Number of blocks of unrecognised type
    pub unknown_count: u32,

    /// Number of blocks replaced by a placeholder
    pub placeholder_count: u32,

    /// Number of blocks skipped or replaced by a visitor
    pub visited_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one block by kind.
    pub fn add_block(&mut self, block: &Block) {
        self.block_count += 1;
        match block {
            Block::Paragraph(_) => self.paragraph_count += 1,
            Block::Header(_) => self.heading_count += 1,
            Block::Image(_) => self.image_count += 1,
            Block::Quote(_) => self.quote_count += 1,
            Block::List(list) => {
                self.list_count += 1;
                let items: usize = list.items.iter().map(|i| i.total_items()).sum();
                self.list_item_count += items as u32;
            }
            Block::Checklist(checklist) => {
                self.checklist_count += 1;
                self.list_item_count += checklist.items.len() as u32;
            }
            Block::Code(_) => self.code_count += 1,
            Block::Table(_) => self.table_count += 1,
            Block::Unknown { .. } => self.unknown_count += 1,
        }
    }

    /// Increment placeholder count.
    pub fn add_placeholder(&mut self) {
        self.placeholder_count += 1;
    }

    /// Increment visitor override count.
    pub fn add_visited(&mut self) {
        self.visited_count += 1;
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        // Word count: whitespace-separated tokens
        self.word_count += text.split_whitespace().count() as u32;

        // Character count: non-whitespace characters
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one, e.g. to total a batch.
    pub fn merge(&mut self, other: &RenderStats) {
        self.block_count += other.block_count;
        self.paragraph_count += other.paragraph_count;
        self.heading_count += other.heading_count;
        self.image_count += other.image_count;
        self.quote_count += other.quote_count;
        self.list_count += other.list_count;
        self.list_item_count += other.list_item_count;
        self.checklist_count += other.checklist_count;
        self.code_count += other.code_count;
        self.table_count += other.table_count;
        self.unknown_count += other.unknown_count;
        self.placeholder_count += other.placeholder_count;
        self.visited_count += other.visited_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}
