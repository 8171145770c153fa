// Debounced editor feed. Keystroke-level updates arrive over a channel and
// are committed to the store at most once per quiet window per document.
// A single task drives every document; the timer is a `sleep_until` inside
// `select!`, so nothing blocks a runtime thread.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use serde::Serialize;
use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

use crate::editor::debounce::Debouncer;
use crate::errors::AppError;
use crate::models::DocumentKind;

// ─────────────────────────────────────────────────────────────────────────────
// Store
// ─────────────────────────────────────────────────────────────────────────────

/// Latest committed content for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommittedDocument {
    pub kind: DocumentKind,
    pub content: String,
    /// Number of commits for this kind so far, starting at 1.
    pub revision: u64,
}

#[derive(Debug, Default)]
pub struct EditorStore {
    documents: RwLock<HashMap<DocumentKind, CommittedDocument>>,
}

impl EditorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn commit(&self, kind: DocumentKind, content: String) -> u64 {
        let mut documents = self.documents.write().await;
        let entry = documents.entry(kind).or_insert_with(|| CommittedDocument {
            kind,
            content: String::new(),
            revision: 0,
        });
        entry.content = content;
        entry.revision += 1;
        entry.revision
    }

    pub async fn get(&self, kind: DocumentKind) -> Option<CommittedDocument> {
        self.documents.read().await.get(&kind).cloned()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sync task
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct EditorUpdate {
    kind: DocumentKind,
    content: String,
}

/// Sending side of the editor feed. Cheap to clone; the sync task exits
/// after the last handle is dropped and pending content is flushed.
#[derive(Debug, Clone)]
pub struct EditorSync {
    tx: mpsc::UnboundedSender<EditorUpdate>,
}

impl EditorSync {
    /// Spawns the sync task on the current runtime.
    pub fn spawn(store: Arc<EditorStore>, window: Duration) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(rx, store, window));
        (Self { tx }, task)
    }

    /// Queues `content` as the latest editor state for `kind`.
    pub fn submit(&self, kind: DocumentKind, content: String) -> Result<(), AppError> {
        self.tx
            .send(EditorUpdate { kind, content })
            .map_err(|_| AppError::Internal(anyhow!("editor sync task is not running")))
    }
}

async fn run(
    mut rx: mpsc::UnboundedReceiver<EditorUpdate>,
    store: Arc<EditorStore>,
    window: Duration,
) {
    let mut pending: HashMap<DocumentKind, Debouncer<String>> = HashMap::new();

    loop {
        let next_deadline = pending.values().filter_map(Debouncer::deadline).min();

        tokio::select! {
            update = rx.recv() => match update {
                Some(EditorUpdate { kind, content }) => {
                    pending
                        .entry(kind)
                        .or_insert_with(|| Debouncer::new(window))
                        .update(content, Instant::now());
                }
                None => break,
            },
            _ = sleep_until_deadline(next_deadline) => {
                let now = Instant::now();
                for (kind, debouncer) in pending.iter_mut() {
                    if let Some(content) = debouncer.poll(now) {
                        let revision = store.commit(*kind, content).await;
                        debug!("Committed {} revision {}", kind, revision);
                    }
                }
            }
        }
    }

    for (kind, debouncer) in pending.iter_mut() {
        if let Some(content) = debouncer.flush() {
            let revision = store.commit(*kind, content).await;
            debug!("Flushed {} revision {}", kind, revision);
        }
    }
    info!("Editor sync stopped");
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
