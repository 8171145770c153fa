//! Signature resolution: the one token whose output depends on the surface.
//!
//! The renderer emits a sentinel for `{{My Signature}}` that carries the
//! candidate's name. Each surface then resolves it:
//!
//! | target        | image enabled | output                     |
//! |---------------|---------------|----------------------------|
//! | `Editable`    | either        | sentinel kept verbatim     |
//! | `PreviewOrPdf`| yes           | inline `<img>`             |
//! | `PreviewOrPdf`| no            | candidate name as text     |
//! | `ExportText`  | either        | candidate name as text     |

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::convert::html::{escape_attr, escape_text};
use crate::models::CandidateProfile;
use crate::templating::placeholders::Placeholder;

pub const SENTINEL_CLASS: &str = "signature-sentinel";

/// Matches the renderer's sentinel span, or a bare token left behind when an
/// editor stripped the wrapper.
static SENTINEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<span class="signature-sentinel" data-name="([^"]*)">\{\{\s*My Signature\s*\}\}</span>|\{\{\s*My Signature\s*\}\}"#,
    )
    .expect("signature sentinel pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetFormat {
    /// Rich-text editor: the user must still be able to edit around the token.
    Editable,
    /// Print preview and PDF.
    PreviewOrPdf,
    /// Markdown and plaintext exports.
    ExportText,
}

/// The sentinel the renderer writes in place of `{{My Signature}}`.
pub fn sentinel(display_name: &str) -> String {
    format!(
        r#"<span class="{SENTINEL_CLASS}" data-name="{}">{}</span>"#,
        escape_attr(display_name),
        Placeholder::MySignature.syntax()
    )
}

/// Resolves every signature occurrence in `document` for `target`.
/// Documents without a signature come back unchanged.
pub fn resolve_signature(
    document: &str,
    candidate: &CandidateProfile,
    target: TargetFormat,
) -> String {
    if target == TargetFormat::Editable {
        return document.to_string();
    }

    SENTINEL_RE
        .replace_all(document, |caps: &Captures| {
            let name = typed_name(candidate, caps);
            match (target, candidate.signature_image_enabled()) {
                (TargetFormat::PreviewOrPdf, Some(src)) => {
                    let alt = match candidate.display_name() {
                        "" => "Signature".to_string(),
                        display => escape_attr(display),
                    };
                    format!(
                        r#"<img class="signature-image" src="{}" alt="{}">"#,
                        escape_attr(src),
                        alt
                    )
                }
                _ => name,
            }
        })
        .into_owned()
}

/// HTML-safe typed name: the candidate's current name, falling back to the
/// name the sentinel carried when it was rendered.
fn typed_name(candidate: &CandidateProfile, caps: &Captures) -> String {
    let name = candidate.display_name();
    if !name.is_empty() {
        return escape_text(name);
    }
    caps.get(1)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE: &str = "data:image/png;base64,iVBORw0KGgo=";

    fn candidate(with_image: bool) -> CandidateProfile {
        CandidateProfile {
            full_name: "John Doe".to_string(),
            signature_image: with_image.then(|| IMAGE.to_string()),
            use_signature_image: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_editable_keeps_sentinel_with_image() {
        let doc = format!("<p>Regards,</p><p>{}</p>", sentinel("John Doe"));
        assert_eq!(resolve_signature(&doc, &candidate(true), TargetFormat::Editable), doc);
    }

    #[test]
    fn test_editable_keeps_sentinel_without_image() {
        let doc = sentinel("John Doe");
        assert_eq!(resolve_signature(&doc, &candidate(false), TargetFormat::Editable), doc);
    }

    #[test]
    fn test_preview_with_image_emits_img() {
        let out = resolve_signature(&sentinel("John Doe"), &candidate(true), TargetFormat::PreviewOrPdf);
        assert_eq!(
            out,
            format!(r#"<img class="signature-image" src="{IMAGE}" alt="John Doe">"#)
        );
    }

    #[test]
    fn test_preview_without_image_falls_back_to_name() {
        let out = resolve_signature(&sentinel("John Doe"), &candidate(false), TargetFormat::PreviewOrPdf);
        assert_eq!(out, "John Doe");
    }

    #[test]
    fn test_preview_with_image_but_flag_off_uses_name() {
        let mut c = candidate(true);
        c.use_signature_image = false;
        let out = resolve_signature(&sentinel("John Doe"), &c, TargetFormat::PreviewOrPdf);
        assert_eq!(out, "John Doe");
    }

    #[test]
    fn test_export_with_image_uses_name() {
        let out = resolve_signature(&sentinel("John Doe"), &candidate(true), TargetFormat::ExportText);
        assert_eq!(out, "John Doe");
        assert!(!out.contains("<img"));
    }

    #[test]
    fn test_export_without_image_uses_name() {
        let out = resolve_signature(&sentinel("John Doe"), &candidate(false), TargetFormat::ExportText);
        assert_eq!(out, "John Doe");
    }

    #[test]
    fn test_every_occurrence_resolves_identically() {
        let doc = format!("{} and {} and {{{{ My Signature }}}}", sentinel("John Doe"), sentinel("John Doe"));
        let out = resolve_signature(&doc, &candidate(false), TargetFormat::ExportText);
        assert_eq!(out, "John Doe and John Doe and John Doe");
    }

    #[test]
    fn test_document_without_signature_is_untouched() {
        let doc = "<p>Dear {{Hiring Manager}},</p><p>{{Unknown}}</p>";
        for target in [TargetFormat::Editable, TargetFormat::PreviewOrPdf, TargetFormat::ExportText] {
            assert_eq!(resolve_signature(doc, &candidate(true), target), doc);
        }
    }

    #[test]
    fn test_blank_name_falls_back_to_carried_name() {
        let blank = CandidateProfile::default();
        let out = resolve_signature(&sentinel("Jane Roe"), &blank, TargetFormat::ExportText);
        assert_eq!(out, "Jane Roe");
    }

    #[test]
    fn test_name_is_html_escaped() {
        let c = CandidateProfile {
            full_name: "Smith & Sons".to_string(),
            ..Default::default()
        };
        let out = resolve_signature(&sentinel("Smith & Sons"), &c, TargetFormat::PreviewOrPdf);
        assert_eq!(out, "Smith &amp; Sons");
    }
}
