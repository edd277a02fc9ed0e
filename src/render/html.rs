//! HTML rendering of the render tree.

use crate::error::Result;
use crate::model::Document;

use super::tree::{
    ImageStyle, Node, ParagraphStyle, Stripe, TableRow, CHECKED_MARK, UNCHECKED_MARK,
};
use super::{RenderOptions, RenderResult, Renderer};

/// Convert a document to HTML.
pub fn to_html(doc: &Document, options: &RenderOptions) -> Result<String> {
    let nodes = Renderer::new(options.clone()).render(doc);
    Ok(HtmlWriter::new(options).write(&nodes))
}

/// Convert a document to HTML with statistics.
pub fn to_html_with_stats(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    let (nodes, stats) = Renderer::new(options.clone()).render_with_stats(doc);
    let content = HtmlWriter::new(options).write(&nodes);
    Ok(RenderResult::new(content, doc.meta.clone(), stats))
}

/// Serialize rendered nodes to HTML.
pub fn nodes_to_html(nodes: &[Node], options: &RenderOptions) -> String {
    HtmlWriter::new(options).write(nodes)
}

/// HTML writer.
///
/// Markup nodes are inserted verbatim; literal text and attribute values are
/// escaped. Every element carries a class hook built from the configured
/// prefix.
pub struct HtmlWriter<'a> {
    options: &'a RenderOptions,
}

impl<'a> HtmlWriter<'a> {
    /// Create a new HTML writer.
    pub fn new(options: &'a RenderOptions) -> Self {
        Self { options }
    }

    /// Write top-level nodes, one per line.
    pub fn write(&self, nodes: &[Node]) -> String {
        let mut output = String::new();
        for node in nodes {
            self.write_node(&mut output, node);
            output.push('\n');
        }
        output
    }

    fn class(&self, name: &str) -> String {
        self.options.class(name)
    }

    fn write_node(&self, output: &mut String, node: &Node) {
        match node {
            Node::Markup { markup } => output.push_str(markup.as_str()),
            Node::Text { text } => output.push_str(&html_escape::encode_text(text)),
            Node::Paragraph { style, children } => {
                let class = match style {
                    ParagraphStyle::Body => self.class("paragraph"),
                    ParagraphStyle::Emphasized => {
                        format!("{} {}", self.class("paragraph"), self.class("subheading"))
                    }
                };
                self.write_element(output, "p", &class, children);
            }
            Node::Heading { level, children } => {
                let tag = format!("h{}", level.number());
                let class = format!(
                    "{} {}",
                    self.class("heading"),
                    self.class(&format!("heading--{}", level.number()))
                );
                self.write_element(output, &tag, &class, children);
            }
            Node::Image {
                url,
                style,
                caption,
            } => self.write_image(output, url, style, caption.as_deref()),
            Node::Quote { children, caption } => {
                output.push_str(&format!("<blockquote class=\"{}\">", self.class("quote")));
                self.write_element(output, "p", &self.class("quote-text"), children);
                if let Some(caption) = caption {
                    self.write_element(output, "footer", &self.class("quote-caption"), caption);
                }
                output.push_str("</blockquote>");
            }
            Node::List { style, items } => {
                let tag = if style.is_ordered() { "ol" } else { "ul" };
                self.write_element(output, tag, &self.class("list"), items);
            }
            Node::ListItem { children } => {
                self.write_element(output, "li", &self.class("list-item"), children);
            }
            Node::Checklist { items } => {
                self.write_element(output, "ul", &self.class("checklist"), items);
            }
            Node::CheckItem { checked, children } => {
                self.write_check_item(output, *checked, children)
            }
            Node::CodeBlock { language, code } => {
                output.push_str(&format!("<pre class=\"{}\"><code", self.class("code")));
                if let Some(language) = language {
                    output.push_str(&format!(
                        " class=\"language-{}\"",
                        html_escape::encode_double_quoted_attribute(language)
                    ));
                }
                output.push('>');
                output.push_str(&html_escape::encode_text(code));
                output.push_str("</code></pre>");
            }
            Node::Table { head, body } => self.write_table(output, head.as_ref(), body),
            Node::Placeholder { block, message } => {
                output.push_str(&format!(
                    "<div class=\"{}\" data-block=\"{}\">{}</div>",
                    self.class("placeholder"),
                    html_escape::encode_double_quoted_attribute(block),
                    html_escape::encode_text(message)
                ));
            }
        }
    }

    fn write_element(&self, output: &mut String, tag: &str, class: &str, children: &[Node]) {
        output.push_str(&format!("<{} class=\"{}\">", tag, class));
        for child in children {
            self.write_node(output, child);
        }
        output.push_str(&format!("</{}>", tag));
    }

    fn write_image(
        &self,
        output: &mut String,
        url: &str,
        style: &ImageStyle,
        caption: Option<&[Node]>,
    ) {
        let mut class = self.class("image");
        for (enabled, modifier) in [
            (style.bordered, "image--bordered"),
            (style.stretched, "image--stretched"),
            (style.background, "image--background"),
        ] {
            if enabled {
                class.push(' ');
                class.push_str(&self.class(modifier));
            }
        }

        output.push_str(&format!(
            "<figure class=\"{}\"><img src=\"{}\" alt=\"\">",
            class,
            html_escape::encode_double_quoted_attribute(url)
        ));
        if let Some(caption) = caption {
            self.write_element(output, "figcaption", &self.class("image-caption"), caption);
        }
        output.push_str("</figure>");
    }

    fn write_check_item(&self, output: &mut String, checked: bool, children: &[Node]) {
        let mut class = self.class("checklist-item");
        if checked {
            class.push(' ');
            class.push_str(&self.class("checklist-item--checked"));
        }
        output.push_str(&format!("<li class=\"{}\">", class));
        output.push_str(&format!(
            "<span class=\"{}\">{}</span>",
            self.class("checklist-indicator"),
            if checked { CHECKED_MARK } else { UNCHECKED_MARK }
        ));
        let tag = if checked { "s" } else { "span" };
        self.write_element(output, tag, &self.class("checklist-text"), children);
        output.push_str("</li>");
    }

    fn write_table(&self, output: &mut String, head: Option<&TableRow>, body: &[TableRow]) {
        output.push_str(&format!("<table class=\"{}\">", self.class("table")));
        if let Some(head) = head {
            output.push_str("<thead>");
            self.write_row(output, head, "th");
            output.push_str("</thead>");
        }
        output.push_str("<tbody>");
        for row in body {
            self.write_row(output, row, "td");
        }
        output.push_str("</tbody></table>");
    }

    fn write_row(&self, output: &mut String, row: &TableRow, cell_tag: &str) {
        let class = match row.stripe {
            None => self.class("table-row--header"),
            Some(Stripe::Even) => self.class("table-row--even"),
            Some(Stripe::Odd) => self.class("table-row--odd"),
        };
        output.push_str(&format!("<tr class=\"{}\">", class));
        for cell in &row.cells {
            output.push_str(&format!("<{}>", cell_tag));
            self.write_node(output, cell);
            output.push_str(&format!("</{}>", cell_tag));
        }
        output.push_str("</tr>");
    }
}
