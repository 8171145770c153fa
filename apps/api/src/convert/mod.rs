// Rich-text → export conversions.
// HTML is parsed into a ContentTree, walked by a per-format rule table,
// then normalised by `cleanup`. No browser or DOM involved.

pub mod html;
pub mod markdown;
pub mod parser;
pub mod plaintext;
pub mod serialize;
pub mod tree;

use std::sync::LazyLock;

use regex::Regex;

pub use markdown::html_to_markdown;
pub use parser::{parse_with, ParseOptions};
pub use plaintext::html_to_plaintext;

static BLANK_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("blank-run pattern is valid"));

/// Final normalisation for converter output: strip trailing whitespace on
/// every line, collapse 3+ newlines to 2, trim the whole string.
/// Idempotent.
pub fn cleanup(text: &str) -> String {
    let stripped = text
        .split('\n')
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");
    BLANK_RUN_RE.replace_all(&stripped, "\n\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "plain",
        "  leading and trailing  ",
        "a\n\n\n\nb",
        "a  \n \n \nb",
        "\n\n\n# Title\n\n\n\nBody   \n\n",
        "a\r\n\r\n\r\n\r\nb",
        "• one \n• two\t\n\n\n\n\n",
        " \n \n x \n \n ",
        "**Bold** text\n\n",
        "tab\t\n\n\t\n\nend",
    ];

    #[test]
    fn test_cleanup_rules() {
        assert_eq!(cleanup("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(cleanup("a   \nb\t"), "a\nb");
        assert_eq!(cleanup("\n\n  x  \n\n"), "x");
        assert_eq!(cleanup("a  \n \n \nb"), "a\n\nb");
    }

    #[test]
    fn test_cleanup_is_idempotent() {
        for sample in SAMPLES {
            let once = cleanup(sample);
            assert_eq!(cleanup(&once), once, "cleanup not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_converter_output_is_stable_under_cleanup() {
        let html = "<h2>Skills</h2><p></p><ul><li>A </li></ul><p>  </p><p>End</p>";
        for converted in [html_to_markdown(html), html_to_plaintext(html)] {
            assert_eq!(cleanup(&converted), converted);
        }
    }
}

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    /// Tag-heavy fragments: a mix of known and unknown tags, entities and
    /// whitespace, unbalanced more often than not.
    fn arb_markup() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop_oneof![
                prop::sample::select(vec![
                    "<p>", "</p>", "<h2>", "</h2>", "<b>", "</b>", "<em>", "</em>", "<ul>",
                    "</ul>", "<ol>", "<li>", "</li>", "<br>", "<a href=\"/x\">", "</a>",
                    "<span style=\"text-shadow: 1px 1px red\">", "</span>", "<div>", "<x-y>",
                    "&amp;", "&nbsp;", "&#65;", "<!-- c -->", "<script>s()</script>",
                ])
                .prop_map(String::from),
                "[a-z \t\n]{0,8}",
            ],
            0..40,
        )
        .prop_map(|parts| parts.concat())
    }

    proptest! {
        #[test]
        fn cleanup_is_idempotent(text in ".*") {
            let once = cleanup(&text);
            prop_assert_eq!(cleanup(&once), once);
        }

        #[test]
        fn cleanup_is_idempotent_on_blank_heavy_text(text in "[ \t\r\n\u{a0}a-z•*#]{0,64}") {
            let once = cleanup(&text);
            prop_assert_eq!(cleanup(&once), once);
        }

        #[test]
        fn converter_output_is_already_clean(html in arb_markup()) {
            let markdown = html_to_markdown(&html);
            let plaintext = html_to_plaintext(&html);
            prop_assert_eq!(cleanup(&markdown), markdown);
            prop_assert_eq!(cleanup(&plaintext), plaintext);
        }

        #[test]
        fn parser_accepts_any_input(html in ".*") {
            let _ = html_to_markdown(&html);
        }
    }
}
