mod config;
mod convert;
mod editor;
mod errors;
mod export;
mod generation;
mod models;
mod pdf_client;
mod routes;
mod state;
mod templating;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::editor::{EditorStore, EditorSync};
use crate::generation::generator::TemplateDocumentGenerator;
use crate::pdf_client::HttpPdfRenderer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Letterpress API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PDF rendering client
    let pdf = HttpPdfRenderer::new(config.pdf_service_url.clone(), config.pdf_timeout)?;
    info!(
        "PDF client initialized ({}, timeout {:?})",
        config.pdf_service_url, config.pdf_timeout
    );

    // Start the debounced editor feed
    let editor_store = Arc::new(EditorStore::new());
    let (editor, editor_task) = EditorSync::spawn(editor_store.clone(), config.editor_debounce);
    info!("Editor sync started (debounce {:?})", config.editor_debounce);

    // Build app state
    let state = AppState {
        config: config.clone(),
        generator: Arc::new(TemplateDocumentGenerator::default()),
        pdf: Arc::new(pdf),
        editor,
        editor_store,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router (and every EditorSync handle it held) is gone; wait for
    // pending editor content to be committed.
    editor_task.await?;
    info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
