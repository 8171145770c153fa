use std::fmt;

use serde::{Deserialize, Serialize};

/// The two documents the builder produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Resume,
    CoverLetter,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 2] = [DocumentKind::Resume, DocumentKind::CoverLetter];

    /// Fixed file stem used for every export of this document.
    pub fn file_stem(self) -> &'static str {
        match self {
            DocumentKind::Resume => "resume",
            DocumentKind::CoverLetter => "cover_letter",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Resume => f.write_str("resume"),
            DocumentKind::CoverLetter => f.write_str("cover letter"),
        }
    }
}

/// Raw, author-supplied templates. Either may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentTemplates {
    pub resume: Option<String>,
    pub cover_letter: Option<String>,
}

impl DocumentTemplates {
    /// The template for `kind`, treating a blank template as missing.
    pub fn get(&self, kind: DocumentKind) -> Option<&str> {
        let template = match kind {
            DocumentKind::Resume => self.resume.as_deref(),
            DocumentKind::CoverLetter => self.cover_letter.as_deref(),
        };
        template.filter(|t| !t.trim().is_empty())
    }
}

/// Which documents a generation request wants.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentSelection {
    pub resume: bool,
    pub cover_letter: bool,
}

impl DocumentSelection {
    pub fn wants(&self, kind: DocumentKind) -> bool {
        match kind {
            DocumentKind::Resume => self.resume,
            DocumentKind::CoverLetter => self.cover_letter,
        }
    }
}

/// Merged template output. Still HTML, and may still contain signature
/// sentinels that each surface resolves for itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderedDocument(String);

impl RenderedDocument {
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_template_counts_as_missing() {
        let templates = DocumentTemplates {
            resume: Some("  \n".to_string()),
            cover_letter: Some("Dear {{Hiring Manager}}".to_string()),
        };
        assert!(templates.get(DocumentKind::Resume).is_none());
        assert!(templates.get(DocumentKind::CoverLetter).is_some());
    }

    #[test]
    fn test_document_kind_serde_names() {
        let kind: DocumentKind = serde_json::from_str("\"cover_letter\"").unwrap();
        assert_eq!(kind, DocumentKind::CoverLetter);
        assert_eq!(kind.file_stem(), "cover_letter");
    }
}
