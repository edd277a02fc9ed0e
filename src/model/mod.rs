//! Document model types for stored editor content.
//!
//! This module defines the decoded representation of an article body. Raw
//! JSON is decoded once, at the boundary, into closed sum types: one case per
//! block variant and one case per list-entry shape. Renderers only ever match
//! on these types and never probe raw fields.

mod block;
mod code;
mod document;
pub(crate) mod fields;
mod list;
mod markup;
mod table;

pub use block::{
    Block, ChecklistData, CodeData, HeaderData, HeadingLevel, ImageData, ListData, ParagraphData,
    QuoteData,
};
pub use code::{CodeSource, RenderedElement, UNEXTRACTABLE_CODE};
pub use document::{Document, DocumentMeta};
pub use list::{ChecklistItem, ListItem, ListStyle, MAX_LIST_DEPTH};
pub use markup::Markup;
pub use table::{parse_delimited, InvalidTable, TableContent, TableData, TableHeadings};
