//! ContentTree: the typed node tree the converters walk.
//!
//! Built from HTML by [`parse`](crate::convert::parser::parse) and thrown
//! away after each conversion.

/// Inline emphasis flavours. `Highlight` is a `<span>` styled with a text
/// shadow, which every target renders as strong emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Bold,
    Italic,
    Underline,
    Highlight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Paragraph(Vec<Node>),
    /// Level is always 1–6.
    Heading { level: u8, children: Vec<Node> },
    Emphasis {
        kind: Emphasis,
        /// Original inline style, kept so HTML output can reproduce it.
        style: Option<String>,
        children: Vec<Node>,
    },
    UnorderedList(Vec<Node>),
    OrderedList(Vec<Node>),
    ListItem(Vec<Node>),
    LineBreak,
    Link { href: Option<String>, children: Vec<Node> },
    Image { src: String, alt: String },
    /// Any element without a mapping; only its children matter.
    Container(Vec<Node>),
}

impl Node {
    pub fn emphasis(kind: Emphasis, children: Vec<Node>) -> Self {
        Node::Emphasis {
            kind,
            style: None,
            children,
        }
    }

    pub fn is_blank_text(&self) -> bool {
        matches!(self, Node::Text(text) if text.trim().is_empty())
    }
}

#[cfg(test)]
impl Node {
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Paragraph(children)
            | Node::UnorderedList(children)
            | Node::OrderedList(children)
            | Node::ListItem(children)
            | Node::Container(children)
            | Node::Heading { children, .. }
            | Node::Emphasis { children, .. }
            | Node::Link { children, .. } => children,
            Node::Text(_) | Node::LineBreak | Node::Image { .. } => &[],
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::LineBreak => "\n".to_string(),
            other => other.children().iter().map(Node::text_content).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentTree {
    pub nodes: Vec<Node>,
}

impl ContentTree {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }
}

#[cfg(test)]
impl ContentTree {
    pub fn text_content(&self) -> String {
        self.nodes.iter().map(Node::text_content).collect()
    }

    /// Depth-first search for any node matching `predicate`.
    pub fn any(&self, predicate: impl Fn(&Node) -> bool + Copy) -> bool {
        fn walk(nodes: &[Node], predicate: impl Fn(&Node) -> bool + Copy) -> bool {
            nodes
                .iter()
                .any(|n| predicate(n) || walk(n.children(), predicate))
        }
        walk(&self.nodes, predicate)
    }
}
