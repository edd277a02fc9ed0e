//! List-item resolution.

use super::tree::{Node, COMPLEX_OBJECT};
use crate::model::{ChecklistItem, ListItem, ListStyle};

/// Render a list whose entries are resolved one by one.
pub fn render_list(style: ListStyle, items: &[ListItem]) -> Node {
    Node::List {
        style,
        items: items.iter().map(|item| resolve_item(item, style)).collect(),
    }
}

/// Render one list entry.
///
/// Nested entries become a nested list of the parent's `style`, placed after
/// the entry's own content. Checklist-shaped entries reuse the checklist
/// entry renderer.
pub fn resolve_item(item: &ListItem, style: ListStyle) -> Node {
    let children = match item {
        ListItem::Check { item } => return render_check_item(item),
        ListItem::Markup { markup } => vec![Node::markup(markup.clone())],
        ListItem::Text { text } => vec![Node::markup(text.clone())],
        ListItem::Content { content, items } => {
            let mut children = vec![Node::markup(content.clone())];
            if !items.is_empty() {
                children.push(render_list(style, items));
            }
            children
        }
        ListItem::Nested { items } => vec![render_list(style, items)],
        ListItem::Stringified { text } => vec![Node::text(text.as_str())],
        ListItem::Unrenderable => vec![Node::text(COMPLEX_OBJECT)],
    };
    Node::ListItem { children }
}

/// Render a checklist.
pub fn render_checklist<'a>(items: impl IntoIterator<Item = &'a ChecklistItem>) -> Node {
    Node::Checklist {
        items: items.into_iter().map(render_check_item).collect(),
    }
}

/// Render one checklist entry.
pub fn render_check_item(item: &ChecklistItem) -> Node {
    Node::CheckItem {
        checked: item.checked,
        children: vec![Node::markup(item.text.clone())],
    }
}
