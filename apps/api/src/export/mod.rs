//! Export: turns a rendered document into a preview page or a downloadable
//! `.md` / `.txt` / `.pdf` file.
//!
//! Each surface resolves the signature sentinel for itself before
//! conversion: text exports always get the typed name, preview and PDF get
//! the image when the candidate enabled one.

pub mod handlers;

use std::sync::LazyLock;

use bytes::Bytes;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::convert::html::{escape_text, to_html};
use crate::convert::{html_to_markdown, html_to_plaintext, parse_with, ParseOptions};
use crate::errors::AppError;
use crate::models::{CandidateProfile, DocumentKind};
use crate::pdf_client::{PdfMetadata, PdfRenderer, PdfRequest};
use crate::templating::{resolve_signature, TargetFormat};

static FONT_SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}(\.\d{1,2})?(pt|px)$").expect("font size pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Markdown,
    Plaintext,
    Pdf,
}

impl DocumentFormat {
    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Markdown => "md",
            DocumentFormat::Plaintext => "txt",
            DocumentFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            DocumentFormat::Markdown => "text/markdown; charset=utf-8",
            DocumentFormat::Plaintext => "text/plain; charset=utf-8",
            DocumentFormat::Pdf => "application/pdf",
        }
    }
}

/// `<stem>.<ext>`, e.g. `cover_letter.md`.
pub fn export_filename(kind: DocumentKind, format: DocumentFormat) -> String {
    format!("{}.{}", kind.file_stem(), format.extension())
}

#[derive(Debug, Clone)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub body: Bytes,
}

/// Markdown or plaintext for a rendered document. Images never survive.
pub fn export_text(document: &str, candidate: &CandidateProfile, format: DocumentFormat) -> String {
    let resolved = resolve_signature(document, candidate, TargetFormat::ExportText);
    match format {
        DocumentFormat::Plaintext => html_to_plaintext(&resolved),
        DocumentFormat::Markdown | DocumentFormat::Pdf => html_to_markdown(&resolved),
    }
}

/// Sanitised body HTML for preview and PDF, signature resolved.
pub fn preview_fragment(document: &str, candidate: &CandidateProfile) -> String {
    let resolved = resolve_signature(document, candidate, TargetFormat::PreviewOrPdf);
    to_html(&parse_with(&resolved, ParseOptions { keep_images: true }))
}

pub fn validate_font_size(font_size: &str) -> Result<&str, AppError> {
    let font_size = font_size.trim();
    if FONT_SIZE_RE.is_match(font_size) {
        Ok(font_size)
    } else {
        Err(AppError::Validation(format!(
            "font_size must look like '11pt' or '14px', got {font_size:?}"
        )))
    }
}

/// Standalone preview page around a fragment.
pub fn preview_page(fragment: &str, title: &str, font_size: &str) -> Result<String, AppError> {
    let font_size = validate_font_size(font_size)?;
    Ok(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n\
         <style>body {{ font-size: {font_size}; }} img.signature-image, img {{ max-height: 4em; }}</style>\n\
         </head>\n<body>\n{fragment}\n</body>\n</html>\n",
        escape_text(title)
    ))
}

/// Builds the export file for `format`. PDF goes through the rendering
/// collaborator; text formats are produced in-process.
pub async fn export_document(
    renderer: &dyn PdfRenderer,
    kind: DocumentKind,
    format: DocumentFormat,
    document: &str,
    candidate: &CandidateProfile,
    font_size: &str,
) -> Result<ExportFile, AppError> {
    let filename = export_filename(kind, format);

    let body = match format {
        DocumentFormat::Markdown | DocumentFormat::Plaintext => {
            Bytes::from(export_text(document, candidate, format))
        }
        DocumentFormat::Pdf => {
            let font_size = validate_font_size(font_size)?;
            let request = PdfRequest {
                html: preview_fragment(document, candidate),
                filename: filename.clone(),
                metadata: PdfMetadata {
                    name: candidate.display_name().to_string(),
                    email: candidate.email.trim().to_string(),
                    phone: candidate.phone.trim().to_string(),
                },
                font_size: font_size.to_string(),
            };
            renderer.render(&request).await?
        }
    };

    info!("Exported {} ({} bytes)", filename, body.len());

    Ok(ExportFile {
        filename,
        content_type: format.content_type(),
        body,
    })
}
