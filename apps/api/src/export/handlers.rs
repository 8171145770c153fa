//! Axum route handlers for preview and export.

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::export::{export_document, preview_fragment, preview_page, DocumentFormat, ExportFile};
use crate::models::{CandidateProfile, DocumentKind};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    /// Only used for the page title.
    pub kind: Option<DocumentKind>,
    pub document: String,
    #[serde(default)]
    pub candidate: CandidateProfile,
    pub font_size: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub kind: DocumentKind,
    pub format: DocumentFormat,
    pub document: String,
    #[serde(default)]
    pub candidate: CandidateProfile,
    pub font_size: Option<String>,
}

impl IntoResponse for ExportFile {
    fn into_response(self) -> Response {
        let disposition = format!("attachment; filename=\"{}\"", self.filename);
        (
            [
                (header::CONTENT_TYPE, self.content_type.to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.body,
        )
            .into_response()
    }
}

/// POST /api/v1/documents/preview
///
/// Print preview page. The signature renders as an image when enabled.
pub async fn handle_preview(
    State(state): State<AppState>,
    Json(request): Json<PreviewRequest>,
) -> Result<Html<String>, AppError> {
    let font_size = request
        .font_size
        .as_deref()
        .unwrap_or(&state.config.default_font_size);
    let fragment = preview_fragment(&request.document, &request.candidate);
    let title = request
        .kind
        .map_or_else(|| "preview".to_string(), |kind| kind.to_string());
    let page = preview_page(&fragment, &title, font_size)?;
    Ok(Html(page))
}

/// POST /api/v1/documents/export
///
/// Downloads the document as `.md`, `.txt` or `.pdf`.
pub async fn handle_export(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<ExportFile, AppError> {
    let font_size = request
        .font_size
        .as_deref()
        .unwrap_or(&state.config.default_font_size);
    export_document(
        state.pdf.as_ref(),
        request.kind,
        request.format,
        &request.document,
        &request.candidate,
        font_size,
    )
    .await
}
