//! Table grid rendering.

use super::tree::{Node, TableRow};
use crate::model::{InvalidTable, Markup, TableContent};

/// Render normalized table content as header and striped body rows.
///
/// With headings the first row becomes the header and is excluded from the
/// striping; without, every row is a body row starting at `Even`.
pub fn render_table(content: &TableContent, with_headings: bool) -> Result<Node, InvalidTable> {
    let rows = match content {
        TableContent::Grid { rows } => rows,
        TableContent::Invalid { reason } => return Err(*reason),
    };

    let (head, body) = match rows.split_first() {
        Some((first, rest)) if with_headings => (Some(TableRow::header(cells(first))), rest),
        _ => (None, rows.as_slice()),
    };

    Ok(Node::Table {
        head,
        body: body
            .iter()
            .enumerate()
            .map(|(i, row)| TableRow::body(cells(row), i))
            .collect(),
    })
}

fn cells(row: &[Markup]) -> Vec<Node> {
    row.iter().map(|cell| Node::markup(cell.clone())).collect()
}
