//! Table types and content normalization.

use super::fields::{stringify, type_name};
use super::Markup;
use serde::Serialize;
use serde_json::Value;

/// How the `withHeadings` flag of a table is resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableHeadings {
    /// Honour an explicit boolean; anything else means headings.
    #[default]
    Explicit,
    /// Always treat the first row as headings, even when `false` was stored.
    ///
    /// Older front ends coalesced the flag with `value || true`, so documents
    /// authored against them always showed a header row.
    Legacy,
}

/// Decoded data of a `table` block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableData {
    /// Normalized content
    pub content: TableContent,

    /// Stored `withHeadings` flag, if it was a boolean
    pub with_headings: Option<bool>,
}

impl TableData {
    /// Decode table data, accepting `text` when `content` is absent.
    pub fn decode(data: &Value) -> Self {
        let content = match data.get("content") {
            None | Some(Value::Null) => data.get("text"),
            some => some,
        };
        Self {
            content: TableContent::normalize(content),
            with_headings: data.get("withHeadings").and_then(Value::as_bool),
        }
    }

    /// Effective heading flag under the given policy.
    pub fn headings(&self, policy: TableHeadings) -> bool {
        match policy {
            TableHeadings::Explicit => self.with_headings.unwrap_or(true),
            TableHeadings::Legacy => true,
        }
    }
}

/// Table content after normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TableContent {
    /// A rows × columns grid of cells
    Grid { rows: Vec<Vec<Markup>> },

    /// Content that cannot be shown as a grid
    Invalid { reason: InvalidTable },
}

impl TableContent {
    /// Normalize raw table content into a grid.
    ///
    /// Strings are parsed with [`parse_delimited`]; arrays of arrays are used
    /// as they are. Everything else, and any empty result, is invalid.
    pub fn normalize(content: Option<&Value>) -> Self {
        let rows = match content {
            None | Some(Value::Null) => return Self::invalid(InvalidTable::Missing),
            Some(Value::String(text)) => parse_delimited(text)
                .into_iter()
                .map(|row| row.into_iter().map(Markup::from_trusted).collect())
                .collect(),
            Some(Value::Array(rows)) => {
                let mut grid = Vec::with_capacity(rows.len());
                for row in rows {
                    match row {
                        Value::Array(cells) => grid.push(cells.iter().map(cell_markup).collect()),
                        other => {
                            return Self::invalid(InvalidTable::Unsupported(type_name(other)))
                        }
                    }
                }
                grid
            }
            Some(other) => return Self::invalid(InvalidTable::Unsupported(type_name(other))),
        };

        if rows.is_empty() {
            Self::invalid(InvalidTable::Empty)
        } else {
            TableContent::Grid { rows }
        }
    }

    fn invalid(reason: InvalidTable) -> Self {
        TableContent::Invalid { reason }
    }

    /// Grid rows, if the content is valid.
    pub fn rows(&self) -> Option<&[Vec<Markup>]> {
        match self {
            TableContent::Grid { rows } => Some(rows),
            TableContent::Invalid { .. } => None,
        }
    }

    /// Get the number of columns (widest row).
    pub fn column_count(&self) -> usize {
        self.rows()
            .map(|rows| rows.iter().map(Vec::len).max().unwrap_or(0))
            .unwrap_or(0)
    }
}

/// Why table content could not be normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "found", rename_all = "snake_case")]
pub enum InvalidTable {
    /// Neither `content` nor `text` was present
    Missing,
    /// Content of an unusable JSON type
    Unsupported(&'static str),
    /// Content produced no rows
    Empty,
}

impl std::fmt::Display for InvalidTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidTable::Missing => write!(f, "table content is missing"),
            InvalidTable::Unsupported(found) => write!(f, "table content is a {}", found),
            InvalidTable::Empty => write!(f, "table content has no rows"),
        }
    }
}

/// Split delimited table text into a grid.
///
/// Records are separated by line breaks and cells by `|`. Cells are trimmed;
/// the empty cells produced by a leading or trailing `|` are dropped, and
/// blank records or records left without cells are skipped. Escaped or
/// quoted delimiters are not recognised.
///
/// ```
/// use blockdoc::model::parse_delimited;
///
/// assert_eq!(
///     parse_delimited("a | b\nc | d"),
///     vec![vec!["a", "b"], vec!["c", "d"]]
/// );
/// ```
pub fn parse_delimited(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let mut cells: Vec<String> = line.split('|').map(|c| c.trim().to_string()).collect();
            if cells.len() > 1 {
                if cells.last().is_some_and(String::is_empty) {
                    cells.pop();
                }
                if cells.first().is_some_and(String::is_empty) {
                    cells.remove(0);
                }
            }
            cells
        })
        .filter(|cells| !cells.is_empty())
        .collect()
}

fn cell_markup(cell: &Value) -> Markup {
    stringify(cell).map(Markup::from_trusted).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn grid(rows: &[&[&str]]) -> TableContent {
        TableContent::Grid {
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| Markup::from_trusted(*c)).collect())
                .collect(),
        }
    }

    #[test]
    fn test_parse_delimited() {
        assert_eq!(
            parse_delimited("a | b\nc | d"),
            vec![vec!["a", "b"], vec!["c", "d"]]
        );
    }

    #[test]
    fn test_parse_delimited_outer_pipes_and_blank_lines() {
        assert_eq!(
            parse_delimited("| a | b |\r\n\n| c |  |\n"),
            vec![vec!["a", "b"], vec!["c", ""]]
        );
    }

    #[test]
    fn test_parse_delimited_bare_delimiter_record() {
        assert_eq!(parse_delimited("|\na | b"), vec![vec!["a", "b"]]);
        assert_eq!(parse_delimited("||\nx"), vec![vec![""], vec!["x"]]);
        assert_eq!(parse_delimited("solo"), vec![vec!["solo"]]);
    }

    #[test]
    fn test_string_and_grid_agree() {
        let from_text = TableContent::normalize(Some(&json!("Name | Age\nAlice | 30")));
        let from_grid = TableContent::normalize(Some(&json!([["Name", "Age"], ["Alice", "30"]])));
        assert_eq!(from_text, from_grid);
        assert_eq!(from_text, grid(&[&["Name", "Age"], &["Alice", "30"]]));
    }

    #[test]
    fn test_grid_used_as_is() {
        let content = TableContent::normalize(Some(&json!([[" a ", 1, null]])));
        assert_eq!(content, grid(&[&[" a ", "1", ""]]));
        assert_eq!(content.column_count(), 3);
    }

    #[test]
    fn test_invalid_content() {
        assert_eq!(
            TableContent::normalize(None),
            TableContent::Invalid {
                reason: InvalidTable::Missing
            }
        );
        assert_eq!(
            TableContent::normalize(Some(&json!(12))),
            TableContent::Invalid {
                reason: InvalidTable::Unsupported("number")
            }
        );
        assert_eq!(
            TableContent::normalize(Some(&json!(["row"]))),
            TableContent::Invalid {
                reason: InvalidTable::Unsupported("string")
            }
        );
        assert_eq!(
            TableContent::normalize(Some(&json!("\n  \n"))),
            TableContent::Invalid {
                reason: InvalidTable::Empty
            }
        );
        assert_eq!(
            TableContent::normalize(Some(&json!([]))),
            TableContent::Invalid {
                reason: InvalidTable::Empty
            }
        );
    }

    #[test]
    fn test_text_alias() {
        let data = TableData::decode(&json!({ "text": "x | y" }));
        assert_eq!(data.content, grid(&[&["x", "y"]]));

        let data = TableData::decode(&json!({ "content": [["c"]], "text": "x | y" }));
        assert_eq!(data.content, grid(&[&["c"]]));
    }

    #[test]
    fn test_heading_policy() {
        let explicit_off = TableData::decode(&json!({ "content": [["a"]], "withHeadings": false }));
        assert!(!explicit_off.headings(TableHeadings::Explicit));
        assert!(explicit_off.headings(TableHeadings::Legacy));

        let unset = TableData::decode(&json!({ "content": [["a"]] }));
        assert!(unset.headings(TableHeadings::Explicit));

        let non_bool = TableData::decode(&json!({ "content": [["a"]], "withHeadings": 0 }));
        assert!(non_bool.headings(TableHeadings::Explicit));
    }
}
