//! HTML escaping and ContentTree → HTML for the preview surface.

use crate::convert::tree::{ContentTree, Emphasis, Node};

pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Canonical HTML for a tree. Unknown wrappers are reduced to their
/// children, so the output only ever contains the mapped tag set.
pub fn to_html(tree: &ContentTree) -> String {
    let mut out = String::new();
    for node in &tree.nodes {
        write_node(node, &mut out);
    }
    out
}

fn write_children(children: &[Node], out: &mut String) {
    for child in children {
        write_node(child, out);
    }
}

fn write_wrapped(open: &str, close: &str, children: &[Node], out: &mut String) {
    out.push_str(open);
    write_children(children, out);
    out.push_str(close);
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&escape_text(text)),
        Node::LineBreak => out.push_str("<br>"),
        Node::Paragraph(children) => write_wrapped("<p>", "</p>", children, out),
        Node::Heading { level, children } => {
            let level = (*level).clamp(1, 6);
            write_wrapped(&format!("<h{level}>"), &format!("</h{level}>"), children, out);
        }
        Node::Emphasis {
            kind,
            style,
            children,
        } => match kind {
            Emphasis::Bold => write_wrapped("<strong>", "</strong>", children, out),
            Emphasis::Italic => write_wrapped("<em>", "</em>", children, out),
            Emphasis::Underline => write_wrapped("<u>", "</u>", children, out),
            Emphasis::Highlight => {
                let style = style.as_deref().unwrap_or("text-shadow: 0 0 1px currentColor");
                let open = format!(r#"<span style="{}">"#, escape_attr(style));
                write_wrapped(&open, "</span>", children, out);
            }
        },
        Node::UnorderedList(items) => write_wrapped("<ul>", "</ul>", items, out),
        Node::OrderedList(items) => write_wrapped("<ol>", "</ol>", items, out),
        Node::ListItem(children) => write_wrapped("<li>", "</li>", children, out),
        Node::Link { href, children } => match href {
            Some(href) => {
                let open = format!(r#"<a href="{}">"#, escape_attr(href));
                write_wrapped(&open, "</a>", children, out);
            }
            None => write_children(children, out),
        },
        Node::Image { src, alt } => out.push_str(&format!(
            r#"<img src="{}" alt="{}">"#,
            escape_attr(src),
            escape_attr(alt)
        )),
        Node::Container(children) => write_children(children, out),
    }
}
