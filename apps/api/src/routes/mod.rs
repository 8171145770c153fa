pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::editor::handlers as editor;
use crate::export::handlers as export;
use crate::generation::handlers as generation;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Template vocabulary + generation
        .route("/api/v1/placeholders", get(generation::handle_placeholders))
        .route(
            "/api/v1/documents/generate",
            post(generation::handle_generate),
        )
        // Preview / export
        .route("/api/v1/documents/preview", post(export::handle_preview))
        .route("/api/v1/documents/export", post(export::handle_export))
        // Editor feed
        .route(
            "/api/v1/editor/:kind",
            get(editor::handle_get).put(editor::handle_update),
        )
        .with_state(state)
}
