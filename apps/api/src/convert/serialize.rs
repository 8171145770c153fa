//! Order-preserving tree walk shared by the text converters.
//!
//! Block structure (paragraphs, lists, breaks) is the same for every text
//! target; each target supplies a [`FormatRules`] table for the parts that
//! differ.

use crate::convert::tree::{ContentTree, Emphasis, Node};

/// Per-target tag mapping.
pub trait FormatRules {
    /// `content` is non-empty and trimmed.
    fn heading(&self, level: u8, content: &str) -> String;
    /// `content` is non-empty and trimmed.
    fn emphasis(&self, kind: Emphasis, content: &str) -> String;
    /// Marker written before each list item.
    fn bullet(&self) -> &'static str;
    /// `text` is trimmed and may be empty.
    fn link(&self, text: &str, href: Option<&str>) -> String;
}

pub fn serialize(tree: &ContentTree, rules: &impl FormatRules) -> String {
    serialize_nodes(&tree.nodes, rules)
}

fn serialize_nodes(nodes: &[Node], rules: &impl FormatRules) -> String {
    nodes.iter().map(|node| serialize_node(node, rules)).collect()
}

fn serialize_node(node: &Node, rules: &impl FormatRules) -> String {
    match node {
        Node::Text(text) => text.clone(),
        Node::LineBreak => "\n".to_string(),
        Node::Paragraph(children) => block(&serialize_nodes(children, rules), |content| {
            format!("{content}\n\n")
        }),
        Node::Heading { level, children } => {
            block(&serialize_nodes(children, rules), |content| {
                rules.heading(*level, content)
            })
        }
        Node::Emphasis { kind, children, .. } => {
            inline(&serialize_nodes(children, rules), |content| {
                rules.emphasis(*kind, content)
            })
        }
        Node::Link { href, children } => {
            let text = serialize_nodes(children, rules);
            if text.trim().is_empty() {
                return rules.link("", href.as_deref());
            }
            inline(&text, |content| rules.link(content, href.as_deref()))
        }
        Node::UnorderedList(items) | Node::OrderedList(items) => list(items, rules),
        Node::ListItem(children) => list_item(&serialize_nodes(children, rules), rules.bullet()),
        Node::Image { .. } => String::new(),
        Node::Container(children) => serialize_nodes(children, rules),
    }
}

/// An empty block collapses to a single newline instead of a blank line.
fn block(content: &str, render: impl FnOnce(&str) -> String) -> String {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        "\n".to_string()
    } else {
        render(trimmed)
    }
}

/// Applies `render` to the trimmed content, keeping surrounding whitespace
/// outside the markers (`**a** b`, never `**a **b`).
fn inline(content: &str, render: impl FnOnce(&str) -> String) -> String {
    let core = content.trim();
    if core.is_empty() {
        return content.to_string();
    }
    let lead_len = content.len() - content.trim_start().len();
    let trail_start = lead_len + core.len();
    format!(
        "{}{}{}",
        &content[..lead_len],
        render(core),
        &content[trail_start..]
    )
}

/// Ordered and unordered lists both render as bullets.
fn list(items: &[Node], rules: &impl FormatRules) -> String {
    let mut out = String::from("\n");
    for item in items {
        match item {
            Node::ListItem(children) => {
                out.push_str(&list_item(&serialize_nodes(children, rules), rules.bullet()));
            }
            other if other.is_blank_text() => {}
            other => out.push_str(&serialize_node(other, rules)),
        }
    }
    out.push('\n');
    out
}

/// First line gets the bullet; continuation lines (nested lists, wrapped
/// paragraphs) are indented under it.
fn list_item(content: &str, bullet: &str) -> String {
    let content = content.trim();
    if content.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    for (index, line) in content.lines().enumerate() {
        if index == 0 {
            out.push_str(&format!("{bullet} {line}"));
        } else if !line.trim().is_empty() {
            out.push_str(&format!("  {line}"));
        }
        out.push('\n');
    }
    out
}
