//! Axum route handlers for the editor feed.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::editor::sync::CommittedDocument;
use crate::errors::AppError;
use crate::models::DocumentKind;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EditorUpdateRequest {
    pub content: String,
}

/// PUT /api/v1/editor/:kind
///
/// Queues the editor's current HTML. Committed after the debounce window.
pub async fn handle_update(
    State(state): State<AppState>,
    Path(kind): Path<DocumentKind>,
    Json(request): Json<EditorUpdateRequest>,
) -> Result<StatusCode, AppError> {
    state.editor.submit(kind, request.content)?;
    Ok(StatusCode::ACCEPTED)
}

/// GET /api/v1/editor/:kind
pub async fn handle_get(
    State(state): State<AppState>,
    Path(kind): Path<DocumentKind>,
) -> Result<Json<CommittedDocument>, AppError> {
    state
        .editor_store
        .get(kind)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No {kind} content committed yet")))
}
