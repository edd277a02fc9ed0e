//! Document-level types.

use super::Block;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// An article body: an ordered sequence of blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    /// Editor envelope metadata
    pub meta: DocumentMeta,

    /// Blocks in rendering order
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from decoded blocks.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self {
            meta: DocumentMeta::default(),
            blocks,
        }
    }

    /// Decode a stored document.
    ///
    /// Accepts the editor envelope `{time, blocks, version}`, a bare array of
    /// blocks, or `null` (an empty document). Individual blocks never fail to
    /// decode; only a top-level string, number or boolean is rejected.
    pub fn from_value(value: &Value) -> Result<Self> {
        let doc = match value {
            Value::Null => Self::new(),
            Value::Array(blocks) => Self::from_blocks(decode_blocks(blocks)),
            Value::Object(_) => Self {
                meta: DocumentMeta::decode(value),
                blocks: match value.get("blocks") {
                    Some(Value::Array(blocks)) => decode_blocks(blocks),
                    _ => Vec::new(),
                },
            },
            other => {
                return Err(Error::InvalidDocument(format!(
                    "expected object, array or null, found {}",
                    super::fields::type_name(other)
                )))
            }
        };

        log::debug!(
            "decoded document with {} blocks ({} unknown)",
            doc.blocks.len(),
            doc.unknown_count()
        );
        Ok(doc)
    }

    /// Get the number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Add a block to the document.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Count blocks of unrecognised type.
    pub fn unknown_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_unknown()).count()
    }
}

fn decode_blocks(blocks: &[Value]) -> Vec<Block> {
    blocks.iter().map(Block::decode).collect()
}

/// Envelope metadata written by the editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentMeta {
    /// Save time
    pub time: Option<DateTime<Utc>>,

    /// Editor version that produced the document
    pub version: Option<String>,
}

impl DocumentMeta {
    fn decode(value: &Value) -> Self {
        Self {
            time: value
                .get("time")
                .and_then(Value::as_i64)
                .and_then(DateTime::<Utc>::from_timestamp_millis),
            version: value
                .get("version")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }
}
