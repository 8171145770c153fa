//! ContentTree → Markdown.

use crate::convert::cleanup;
use crate::convert::parser::parse;
use crate::convert::serialize::{serialize, FormatRules};
use crate::convert::tree::{ContentTree, Emphasis};

pub struct MarkdownRules;

impl FormatRules for MarkdownRules {
    fn heading(&self, level: u8, content: &str) -> String {
        format!("{} {content}\n\n", "#".repeat(usize::from(level.clamp(1, 6))))
    }

    fn emphasis(&self, kind: Emphasis, content: &str) -> String {
        match kind {
            Emphasis::Bold | Emphasis::Highlight => format!("**{content}**"),
            Emphasis::Italic => format!("*{content}*"),
            Emphasis::Underline => format!("__{content}__"),
        }
    }

    fn bullet(&self) -> &'static str {
        "-"
    }

    fn link(&self, text: &str, href: Option<&str>) -> String {
        match href {
            Some(href) if !text.is_empty() => format!("[{text}]({href})"),
            _ => text.to_string(),
        }
    }
}

/// Raw Markdown, before [`cleanup`].
pub fn to_markdown(tree: &ContentTree) -> String {
    serialize(tree, &MarkdownRules)
}

pub fn html_to_markdown(html: &str) -> String {
    cleanup(&to_markdown(&parse(html)))
}
