//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::generation::generator::{generate_documents, GenerateRequest, GenerateResponse};
use crate::state::AppState;
use crate::templating::placeholders::{catalog, PlaceholderInfo};

/// POST /api/v1/documents/generate
///
/// Merges the supplied templates for the requested documents. The result is
/// editor-ready HTML with signature sentinels still in place.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let response = generate_documents(state.generator.as_ref(), &request).await?;
    Ok(Json(response))
}

/// GET /api/v1/placeholders
///
/// The token vocabulary available to template authors.
pub async fn handle_placeholders() -> Json<Vec<PlaceholderInfo>> {
    Json(catalog())
}
