//! Integration tests for reading stored documents.

use std::fs;
use std::io::Cursor;

use blockdoc::render::RenderOptions;
use blockdoc::{parse_file, parse_reader, Blockdoc, Error, JsonFormat};
use tempfile::TempDir;

const ARTICLE: &str = r#"{
    "time": 1700000000000,
    "version": "2.28.2",
    "blocks": [
        {"type": "header", "data": {"text": "Release notes", "level": 2}},
        {"type": "paragraph", "data": {"text": "Fixes &amp; <i>improvements</i>"}},
        {"type": "list", "data": {"style": "ordered", "items": ["one", "two"]}},
        {"type": "table", "data": {"content": [["k", "v"], ["a", "1"]], "withHeadings": true}}
    ]
}"#;

#[test]
fn test_parse_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("article.json");
    fs::write(&path, ARTICLE).unwrap();

    let doc = parse_file(&path).unwrap();
    assert_eq!(doc.len(), 4);
    assert_eq!(doc.meta.version.as_deref(), Some("2.28.2"));
}

#[test]
fn test_parse_file_invalid_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{\"blocks\": [").unwrap();

    assert!(matches!(parse_file(&path), Err(Error::Json(_))));
}

#[test]
fn test_parse_reader() {
    let doc = parse_reader(Cursor::new(ARTICLE.as_bytes())).unwrap();
    assert_eq!(doc.len(), 4);
}

#[test]
fn test_builder_outputs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("article.json");
    fs::write(&path, ARTICLE).unwrap();

    let result = Blockdoc::new().parse_file(&path).unwrap();

    let markdown = result.to_markdown();
    assert_eq!(
        markdown,
        "## Release notes\n\nFixes &amp; <i>improvements</i>\n\n1. one\n2. two\n\n| k | v |\n| --- | --- |\n| a | 1 |"
    );

    let text = result.to_text();
    assert_eq!(
        text,
        "Release notes\n\nFixes & improvements\n\n1. one\n2. two\n\nk\tv\na\t1"
    );

    let html = result.to_html();
    assert!(html.starts_with("<h2 class=\"blockdoc-heading blockdoc-heading--2\">Release notes</h2>\n"));
    assert!(html.contains("<ol class=\"blockdoc-list\">"));

    let json: serde_json::Value =
        serde_json::from_str(&result.to_json(JsonFormat::Compact).unwrap()).unwrap();
    assert_eq!(json["meta"]["version"], "2.28.2");
    assert_eq!(json["nodes"].as_array().unwrap().len(), 4);

    let stats = result.stats();
    assert_eq!(stats.block_count, 4);
    assert_eq!(stats.list_item_count, 2);
}

#[test]
fn test_render_with_stats_result() {
    let doc = blockdoc::parse_str(ARTICLE).unwrap();
    let result = blockdoc::render::to_html_with_stats(&doc, &RenderOptions::default()).unwrap();

    assert_eq!(result.stats.heading_count, 1);
    assert_eq!(result.stats.table_count, 1);
    assert!(result.meta.time.is_some());
    assert!(result.content.starts_with("<h2"));
}
