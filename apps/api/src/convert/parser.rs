//! HTML-subset parser producing a [`ContentTree`].
//!
//! Handles the markup rich-text editors and our templates emit: nested
//! elements, quoted and unquoted attributes, comments, doctype, void
//! elements and character references. It never fails. Unknown elements
//! become [`Node::Container`], stray end tags are ignored, and anything
//! still open at end of input is closed.

use crate::convert::tree::{ContentTree, Emphasis, Node};

/// Elements whose content is dropped along with the element.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Elements that never have children (besides `br` and `img`, handled directly).
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "col", "embed", "hr", "input", "link", "meta", "param", "source", "track",
    "wbr",
];

/// Open elements beyond this depth are flattened into their ancestor.
/// Conversion and drop both recurse per level.
pub const MAX_DEPTH: usize = 256;

/// URL schemes allowed in `href` and `src`. Relative URLs have no scheme.
const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// Elements whose start implicitly closes an open `<p>`.
const CLOSES_PARAGRAPH: &[&str] = &[
    "p", "div", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "table", "blockquote", "pre",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Keep `<img>` elements. Off for text exports, on for preview.
    pub keep_images: bool,
}

/// Parses `html`, dropping scripts, styles and images.
pub fn parse(html: &str) -> ContentTree {
    parse_with(html, ParseOptions::default())
}

pub fn parse_with(html: &str, options: ParseOptions) -> ContentTree {
    let mut builder = TreeBuilder::new(options);
    for token in Tokenizer::new(html) {
        match token {
            Token::Start {
                name,
                attrs,
                self_closing,
            } => builder.start(name, attrs, self_closing),
            Token::End { name } => builder.end(&name),
            Token::Text(text) => builder.text(text),
        }
    }
    builder.finish()
}

// ────────────────────────────────────────────────────────────────────────────
// Tokenizer
// ────────────────────────────────────────────────────────────────────────────

type Attributes = Vec<(String, String)>;

#[derive(Debug, PartialEq)]
enum Token {
    Start {
        name: String,
        attrs: Attributes,
        self_closing: bool,
    },
    End {
        name: String,
    },
    Text(String),
}

struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Reads a start tag beginning at `self.pos` (which points at `<`).
    /// Returns `None` for raw-text elements, whose content is skipped.
    fn start_tag(&mut self) -> Option<Token> {
        let after_lt = &self.input[self.pos + 1..];
        let name_len = after_lt
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == ':'))
            .unwrap_or(after_lt.len());
        let name = after_lt[..name_len].to_ascii_lowercase();
        let mut cursor = self.pos + 1 + name_len;
        let mut attrs = Vec::new();
        let mut self_closing = false;

        loop {
            let rest = &self.input[cursor..];
            let trimmed = rest.trim_start();
            cursor += rest.len() - trimmed.len();
            if trimmed.is_empty() {
                break;
            }
            if trimmed.starts_with('>') {
                cursor += 1;
                break;
            }
            if trimmed.starts_with("/>") {
                self_closing = true;
                cursor += 2;
                break;
            }
            if trimmed.starts_with('/') || trimmed.starts_with('=') {
                cursor += 1;
                continue;
            }

            let attr_len = trimmed
                .find(|c: char| c.is_whitespace() || c == '=' || c == '>' || c == '/')
                .unwrap_or(trimmed.len());
            let attr_name = trimmed[..attr_len].to_ascii_lowercase();
            cursor += attr_len;

            let rest = &self.input[cursor..];
            let mut value = String::new();
            if let Some(after_eq) = rest.trim_start().strip_prefix('=') {
                let raw_start = after_eq.trim_start();
                cursor += rest.len() - raw_start.len();
                let (raw, consumed) = attribute_value(raw_start);
                value = decode_entities(raw);
                cursor += consumed;
            }
            attrs.push((attr_name, value));
        }

        self.pos = cursor;

        if !self_closing && RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
            self.skip_raw_text(&name);
            return None;
        }

        Some(Token::Start {
            name,
            attrs,
            self_closing,
        })
    }

    fn skip_raw_text(&mut self, name: &str) {
        let rest = self.input[self.pos..].to_ascii_lowercase();
        let closing = format!("</{name}");
        self.pos = match rest.find(&closing) {
            Some(start) => {
                let after = start + closing.len();
                self.pos + rest[after..].find('>').map_or(rest.len(), |gt| after + gt + 1)
            }
            None => self.input.len(),
        };
    }
}

/// Splits a quoted or unquoted attribute value off the front of `input`.
/// Returns the raw value and how many bytes were consumed.
fn attribute_value(input: &str) -> (&str, usize) {
    match input.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            let body = &input[1..];
            match body.find(quote) {
                Some(end) => (&body[..end], end + 2),
                None => (body, input.len()),
            }
        }
        _ => {
            let end = input
                .find(|c: char| c.is_whitespace() || c == '>')
                .unwrap_or(input.len());
            (&input[..end], end)
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            let rest = &self.input[self.pos..];
            if rest.is_empty() {
                return None;
            }

            if let Some(after) = rest.strip_prefix("<!--") {
                self.pos += 4 + after.find("-->").map_or(after.len(), |end| end + 3);
                continue;
            }
            if rest.starts_with("<!") || rest.starts_with("<?") {
                self.pos += rest.find('>').map_or(rest.len(), |gt| gt + 1);
                continue;
            }
            if let Some(after) = rest.strip_prefix("</") {
                if after.starts_with(|c: char| c.is_ascii_alphabetic()) {
                    let end = after.find('>').unwrap_or(after.len());
                    let name = after[..end]
                        .split(|c: char| c.is_whitespace() || c == '/')
                        .next()
                        .unwrap_or_default()
                        .to_ascii_lowercase();
                    self.pos += 2 + (end + 1).min(after.len());
                    return Some(Token::End { name });
                }
            }
            if rest.starts_with('<') && rest[1..].starts_with(|c: char| c.is_ascii_alphabetic()) {
                match self.start_tag() {
                    Some(token) => return Some(token),
                    None => continue,
                }
            }

            // Text runs to the next `<`; a `<` that opens no tag is literal text.
            let skip = rest.chars().next().map_or(0, char::len_utf8);
            let end = rest[skip..].find('<').map_or(rest.len(), |lt| lt + skip);
            self.pos += end;
            return Some(Token::Text(decode_entities(&rest[..end])));
        }
    }
}

/// Decodes named and numeric character references. Unknown references are
/// kept verbatim.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let decoded = after
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&after[..semi]).map(|c| (c, semi)));
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &after[semi + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse().ok()?,
        };
        return char::from_u32(code);
    }
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "ndash" => '–',
        "mdash" => '—',
        "hellip" => '…',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        "bull" => '•',
        "middot" => '·',
        "copy" => '©',
        "reg" => '®',
        "trade" => '™',
        _ => return None,
    };
    Some(c)
}

// ────────────────────────────────────────────────────────────────────────────
// Tree builder
// ────────────────────────────────────────────────────────────────────────────

struct OpenElement {
    name: String,
    attrs: Attributes,
    children: Vec<Node>,
}

struct TreeBuilder {
    options: ParseOptions,
    root: Vec<Node>,
    stack: Vec<OpenElement>,
}

impl TreeBuilder {
    fn new(options: ParseOptions) -> Self {
        Self {
            options,
            root: Vec::new(),
            stack: Vec::new(),
        }
    }

    fn current(&mut self) -> &mut Vec<Node> {
        match self.stack.last_mut() {
            Some(open) => &mut open.children,
            None => &mut self.root,
        }
    }

    fn start(&mut self, name: String, attrs: Attributes, self_closing: bool) {
        match name.as_str() {
            "br" => self.current().push(Node::LineBreak),
            "img" => {
                if !self.options.keep_images {
                    return;
                }
                let src = attribute(&attrs, "src").and_then(safe_url).unwrap_or_default();
                if !src.is_empty() {
                    let image = Node::Image {
                        src: src.to_string(),
                        alt: attribute(&attrs, "alt").unwrap_or_default().to_string(),
                    };
                    self.current().push(image);
                }
            }
            void if VOID_ELEMENTS.contains(&void) => {}
            _ if self_closing => {
                let node = build_node(&name, &attrs, Vec::new());
                self.current().push(node);
            }
            _ => {
                self.close_implied_by(&name);
                if self.stack.len() >= MAX_DEPTH {
                    return;
                }
                self.stack.push(OpenElement {
                    name,
                    attrs,
                    children: Vec::new(),
                });
            }
        }
    }

    /// `<li>` closes an open sibling `<li>`; block starts close an open `<p>`.
    fn close_implied_by(&mut self, name: &str) {
        let Some(top) = self.stack.last() else {
            return;
        };
        let implied = match name {
            "li" => top.name == "li",
            _ => top.name == "p" && CLOSES_PARAGRAPH.contains(&name),
        };
        if implied {
            self.close_top();
        }
    }

    fn end(&mut self, name: &str) {
        if let Some(index) = self.stack.iter().rposition(|open| open.name == name) {
            while self.stack.len() > index {
                self.close_top();
            }
        }
    }

    fn text(&mut self, text: String) {
        if text.is_empty() {
            return;
        }
        let siblings = self.current();
        if let Some(Node::Text(previous)) = siblings.last_mut() {
            previous.push_str(&text);
        } else {
            siblings.push(Node::Text(text));
        }
    }

    fn close_top(&mut self) {
        if let Some(open) = self.stack.pop() {
            let node = build_node(&open.name, &open.attrs, open.children);
            self.current().push(node);
        }
    }

    fn finish(mut self) -> ContentTree {
        while !self.stack.is_empty() {
            self.close_top();
        }
        ContentTree::new(self.root)
    }
}

fn attribute<'a>(attrs: &'a Attributes, name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn build_node(name: &str, attrs: &Attributes, children: Vec<Node>) -> Node {
    match name {
        "p" => Node::Paragraph(children),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Node::Heading {
            level: name[1..].parse().unwrap_or(1),
            children,
        },
        "strong" | "b" => Node::emphasis(Emphasis::Bold, children),
        "em" | "i" => Node::emphasis(Emphasis::Italic, children),
        "u" | "ins" => Node::emphasis(Emphasis::Underline, children),
        "span" => match attribute(attrs, "style").and_then(text_shadow) {
            Some(style) => Node::Emphasis {
                kind: Emphasis::Highlight,
                style: Some(style),
                children,
            },
            None => Node::Container(children),
        },
        "ul" => Node::UnorderedList(children),
        "ol" => Node::OrderedList(children),
        "li" => Node::ListItem(children),
        "a" => Node::Link {
            href: attribute(attrs, "href")
                .and_then(safe_url)
                .filter(|href| !href.is_empty())
                .map(str::to_string),
            children,
        },
        _ => Node::Container(children),
    }
}

/// The trimmed URL if its scheme is allowed. `data:` is only accepted for
/// images.
fn safe_url(url: &str) -> Option<&str> {
    let url = url.trim();
    let scheme_end = url.find(|c: char| matches!(c, ':' | '/' | '?' | '#'));
    let Some(colon) = scheme_end.filter(|&i| url[i..].starts_with(':')) else {
        return Some(url);
    };
    // Browsers ignore tabs and newlines inside a scheme.
    let scheme: String = url[..colon]
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .collect::<String>()
        .to_ascii_lowercase();
    if SAFE_SCHEMES.contains(&scheme.as_str()) {
        return Some(url);
    }
    let is_image_data = scheme == "data"
        && url[colon + 1..]
            .trim_start()
            .get(..6)
            .is_some_and(|kind| kind.eq_ignore_ascii_case("image/"));
    is_image_data.then_some(url)
}

/// `text-shadow: <value>` taken from an inline style, ignoring every other
/// declaration.
fn text_shadow(style: &str) -> Option<String> {
    style.split(';').find_map(|declaration| {
        let (property, value) = declaration.split_once(':')?;
        let value = value.trim();
        let lower = value.to_ascii_lowercase();
        (property.trim().eq_ignore_ascii_case("text-shadow")
            && !value.is_empty()
            && !lower.contains("url(")
            && !lower.contains("expression("))
        .then(|| format!("text-shadow: {value}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Node {
        Node::Text(s.to_string())
    }

    #[test]
    fn test_heading_and_paragraph() {
        let tree = parse("<h2>Summary</h2><p><strong>Bold</strong> text</p>");
        assert_eq!(
            tree.nodes,
            vec![
                Node::Heading {
                    level: 2,
                    children: vec![text("Summary")]
                },
                Node::Paragraph(vec![
                    Node::emphasis(Emphasis::Bold, vec![text("Bold")]),
                    text(" text"),
                ]),
            ]
        );
    }

    #[test]
    fn test_script_and_style_are_dropped_with_content() {
        let tree = parse("<p>a</p><script>alert('<p>x</p>')</script><STYLE>p{}</STYLE><p>b</p>");
        assert_eq!(tree.text_content(), "ab");
    }

    #[test]
    fn test_images_dropped_unless_requested() {
        let html = r#"<p>Hi <img src="sig.png" alt="sig"></p>"#;
        assert!(!parse(html).any(|n| matches!(n, Node::Image { .. })));

        let kept = parse_with(html, ParseOptions { keep_images: true });
        assert!(kept.any(|n| matches!(n, Node::Image { src, .. } if src == "sig.png")));
    }

    #[test]
    fn test_entities_decoded() {
        let tree = parse("<p>Fish &amp; Chips &lt;3 &#65;&#x42; &nbsp;&bogus; &amp</p>");
        assert_eq!(tree.text_content(), "Fish & Chips <3 AB  &bogus; &amp");
    }

    #[test]
    fn test_attributes_quoted_and_unquoted() {
        let tree = parse(r#"<a href='https://a.example/x?y=1&amp;z=2' title="t">A</a><a href=https://b.example/>B</a>"#);
        let hrefs: Vec<Option<String>> = tree
            .nodes
            .iter()
            .map(|n| match n {
                Node::Link { href, .. } => href.clone(),
                _ => None,
            })
            .collect();
        assert_eq!(
            hrefs,
            vec![
                Some("https://a.example/x?y=1&z=2".to_string()),
                Some("https://b.example/".to_string())
            ]
        );
    }

    #[test]
    fn test_text_shadow_span_is_highlight() {
        let tree = parse(r#"<span style="text-shadow: 0 0 1px red">Key</span><span class="x">plain</span>"#);
        assert!(matches!(
            &tree.nodes[0],
            Node::Emphasis { kind: Emphasis::Highlight, style: Some(_), .. }
        ));
        assert_eq!(tree.nodes[1], Node::Container(vec![text("plain")]));
    }

    #[test]
    fn test_unknown_tags_keep_children() {
        let tree = parse("<section><custom-tag>inner</custom-tag></section>");
        assert_eq!(
            tree.nodes,
            vec![Node::Container(vec![Node::Container(vec![text("inner")])])]
        );
    }

    #[test]
    fn test_unclosed_and_stray_tags() {
        let tree = parse("</div><p>one<p>two<ul><li>a<li>b</ul><em>open");
        assert_eq!(tree.nodes.len(), 4, "{:?}", tree.nodes);
        assert_eq!(tree.nodes[0], Node::Paragraph(vec![text("one")]));
        assert_eq!(tree.nodes[1], Node::Paragraph(vec![text("two")]));
        assert_eq!(
            tree.nodes[2],
            Node::UnorderedList(vec![
                Node::ListItem(vec![text("a")]),
                Node::ListItem(vec![text("b")]),
            ])
        );
    }

    #[test]
    fn test_comments_doctype_and_breaks() {
        let tree = parse("<!DOCTYPE html><!-- note --><p>a<br>b<br/>c</p>");
        assert_eq!(
            tree.nodes,
            vec![Node::Paragraph(vec![
                text("a"),
                Node::LineBreak,
                text("b"),
                Node::LineBreak,
                text("c"),
            ])]
        );
    }

    #[test]
    fn test_malformed_input_never_panics() {
        for html in [
            "", "<", "</", "<<>>", "<p", "<a href=", "<a href=\"unterminated", "&", "&#xZZ;",
            "&#1114112;", "é<b>ü</b>ñ<", "<!--", "<!doctype", "<script>never closed",
            "<p =>x</p>", "a < b > c", "<p/><br/></br>",
        ] {
            let _ = parse(html);
        }
    }

    fn depth(nodes: &[Node]) -> usize {
        nodes
            .iter()
            .map(|n| 1 + depth(n.children()))
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn test_deep_nesting_is_capped() {
        let html = format!("<p>{}x</p>", "<b>".repeat(100_000));
        let tree = parse(&html);
        assert!(depth(&tree.nodes) <= MAX_DEPTH + 1);
        assert_eq!(tree.text_content(), "x");
    }

    #[test]
    fn test_content_past_depth_cap_is_kept() {
        let html = format!("{}<i>deep</i> tail", "<div>".repeat(MAX_DEPTH));
        assert_eq!(parse(&html).text_content(), "deep tail");
    }

    #[test]
    fn test_unsafe_urls_are_removed() {
        let tree = parse_with(
            r#"<a href="javascript:alert(document.cookie)">x</a><a href=" JaVa&#9;Script:y()">y</a><img src="javascript:alert(1)"><img src="data:text/html,<b>"><img src="data:image/png;base64,AA=="><a href="/relative">r</a><a href="mailto:a@b.example">m</a>"#,
            ParseOptions { keep_images: true },
        );
        let hrefs: Vec<Option<&str>> = tree
            .nodes
            .iter()
            .filter_map(|n| match n {
                Node::Link { href, .. } => Some(href.as_deref()),
                _ => None,
            })
            .collect();
        assert_eq!(hrefs, vec![None, None, Some("/relative"), Some("mailto:a@b.example")]);

        let srcs: Vec<&str> = tree
            .nodes
            .iter()
            .filter_map(|n| match n {
                Node::Image { src, .. } => Some(src.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(srcs, vec!["data:image/png;base64,AA=="]);
    }

    #[test]
    fn test_highlight_keeps_only_text_shadow() {
        let tree = parse(
            r#"<span style="color: red; TEXT-SHADOW: 0 0 1px red ; background:url(https://x.example/t.png)">k</span><span style="text-shadow: url(x)">u</span>"#,
        );
        assert!(matches!(
            &tree.nodes[0],
            Node::Emphasis { kind: Emphasis::Highlight, style: Some(s), .. } if s == "text-shadow: 0 0 1px red"
        ));
        assert_eq!(tree.nodes[1], Node::Container(vec![text("u")]));
    }

    #[test]
    fn test_literal_less_than_is_text() {
        assert_eq!(parse("a < b").text_content(), "a < b");
    }
}
