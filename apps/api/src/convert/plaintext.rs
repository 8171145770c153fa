//! ContentTree → plain text.

use crate::convert::cleanup;
use crate::convert::parser::parse;
use crate::convert::serialize::{serialize, FormatRules};
use crate::convert::tree::{ContentTree, Emphasis};

pub struct PlaintextRules;

impl FormatRules for PlaintextRules {
    fn heading(&self, _level: u8, content: &str) -> String {
        format!("{content}\n\n")
    }

    fn emphasis(&self, kind: Emphasis, content: &str) -> String {
        match kind {
            Emphasis::Highlight => format!("**{content}**"),
            Emphasis::Bold | Emphasis::Italic | Emphasis::Underline => content.to_string(),
        }
    }

    fn bullet(&self) -> &'static str {
        "•"
    }

    fn link(&self, text: &str, href: Option<&str>) -> String {
        match href {
            Some(href) if !text.is_empty() => format!("{text} ({href})"),
            _ => text.to_string(),
        }
    }
}

/// Raw plain text, before [`cleanup`].
pub fn to_plaintext(tree: &ContentTree) -> String {
    serialize(tree, &PlaintextRules)
}

pub fn html_to_plaintext(html: &str) -> String {
    cleanup(&to_plaintext(&parse(html)))
}
