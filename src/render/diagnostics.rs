//! Diagnostic reporting for blocks that render as nothing or as a placeholder.
//!
//! The renderer never fails; instead it reports what it dropped or replaced
//! to a [`DiagnosticSink`] supplied by the host. The default sink forwards to
//! the `log` facade.

use serde::Serialize;
use serde_json::Value;
use std::sync::{Mutex, PoisonError};

/// A diagnostic record emitted while rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "diagnostic", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A block of unrecognised type produced no output.
    UnknownBlock {
        /// Position of the block in the document
        index: usize,
        /// The stored type name
        kind: String,
        /// The stored data
        data: Value,
    },

    /// A block of a known type was replaced by a fallback.
    InvalidBlock {
        /// Position of the block in the document
        index: usize,
        /// Block type name
        kind: String,
        /// What was wrong with the block
        reason: String,
    },
}

impl Diagnostic {
    /// Position of the offending block.
    pub fn index(&self) -> usize {
        match self {
            Diagnostic::UnknownBlock { index, .. } | Diagnostic::InvalidBlock { index, .. } => {
                *index
            }
        }
    }

    /// Type name of the offending block.
    pub fn kind(&self) -> &str {
        match self {
            Diagnostic::UnknownBlock { kind, .. } | Diagnostic::InvalidBlock { kind, .. } => kind,
        }
    }
}

/// Receiver of render diagnostics.
pub trait DiagnosticSink: Send + Sync {
    /// Record one diagnostic.
    fn report(&self, diagnostic: Diagnostic);
}

/// Sink that forwards diagnostics to `log::warn!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::UnknownBlock { index, kind, data } => {
                log::warn!("unknown block type {:?} at index {}: {}", kind, index, data);
            }
            Diagnostic::InvalidBlock {
                index,
                kind,
                reason,
            } => {
                log::warn!("invalid {} block at index {}: {}", kind, index, reason);
            }
        }
    }
}

/// Sink that discards every diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _diagnostic: Diagnostic) {}
}

/// Sink that keeps diagnostics in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded diagnostics.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return the recorded diagnostics.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.records.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Number of recorded diagnostics.
    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, diagnostic: Diagnostic) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.report(Diagnostic::UnknownBlock {
            index: 0,
            kind: "embed".into(),
            data: json!({}),
        });
        sink.report(Diagnostic::InvalidBlock {
            index: 3,
            kind: "table".into(),
            reason: "table content is missing".into(),
        });

        let records = sink.diagnostics();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind(), "embed");
        assert_eq!(records[1].index(), 3);

        assert_eq!(sink.take().len(), 2);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_null_sink() {
        NullSink.report(Diagnostic::UnknownBlock {
            index: 0,
            kind: String::new(),
            data: Value::Null,
        });
    }
}
