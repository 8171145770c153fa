use std::sync::Arc;

use crate::config::Config;
use crate::editor::{EditorStore, EditorSync};
use crate::generation::generator::DocumentGenerator;
use crate::pdf_client::PdfRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Document generation backend. Default: TemplateDocumentGenerator.
    pub generator: Arc<dyn DocumentGenerator>,
    /// PDF rendering collaborator. Default: HttpPdfRenderer.
    pub pdf: Arc<dyn PdfRenderer>,
    /// Sending side of the debounced editor feed.
    pub editor: EditorSync,
    pub editor_store: Arc<EditorStore>,
}
