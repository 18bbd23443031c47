//! Processing scheduler: one cancellable ticking task per document.
//!
//! DESIGN
//! ======
//! Each processing document gets a task that ticks every `tick_ms`, asks the
//! `ChunkIngestor` for the next step, and applies it with
//! `document::advance_processing`. The task ends itself when the document
//! completes, fails, or disappears. Handles are kept by document id so a
//! delete can abort the task; scheduling an id that already has a live task
//! is a no-op, so ticks for one document never overlap.
//!
//! ERROR HANDLING
//! ==============
//! Ingest failures, including a successful step of zero chunks, are retried
//! on the next tick. The first failure of a streak raises a warning
//! notification. After more than `max_retries` consecutive failures the
//! document moves to `error` with the last failure as its cause.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::Rng;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::services::document::{self, Advance};
use crate::services::notify::Severity;
use crate::state::{AppState, ProcessingFailure};

// =============================================================================
// INGESTOR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("ingest failed: {0}")]
    Failed(String),
}

/// Produces chunk progress for a document, one step per tick.
#[async_trait::async_trait]
pub trait ChunkIngestor: Send + Sync {
    /// Number of chunks ingested during this tick (at least 1 on success).
    async fn ingest_step(&self, document_id: Uuid) -> Result<u32, IngestError>;
}

/// Stand-in ingestor: a uniformly random step in `[min, max]`, never failing.
pub struct SimulatedIngestor {
    min: u32,
    max: u32,
}

impl SimulatedIngestor {
    #[must_use]
    pub fn new(min: u32, max: u32) -> Self {
        let min = min.max(1);
        Self { min, max: max.max(min) }
    }
}

#[async_trait::async_trait]
impl ChunkIngestor for SimulatedIngestor {
    async fn ingest_step(&self, _document_id: Uuid) -> Result<u32, IngestError> {
        Ok(rand::rng().random_range(self.min..=self.max))
    }
}

// =============================================================================
// SCHEDULER
// =============================================================================

#[derive(Clone, Default)]
pub struct ProcessingScheduler {
    tasks: Arc<Mutex<HashMap<Uuid, JoinHandle<()>>>>,
}

impl ProcessingScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the ticking task for `document_id` unless one is already live.
    pub fn schedule(&self, state: &AppState, document_id: Uuid) {
        let mut tasks = self
            .tasks
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if tasks.get(&document_id).is_some_and(|h| !h.is_finished()) {
            debug!(%document_id, "processing already scheduled");
            return;
        }

        // Held lock keeps the task's own `forget` from running before insert.
        let handle = tokio::spawn(run_processing(state.clone(), document_id));
        tasks.insert(document_id, handle);
    }

    /// Abort the task for `document_id`. Returns `true` if one was live.
    pub fn cancel(&self, document_id: Uuid) -> bool {
        let handle = self
            .tasks
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(&document_id);
        match handle {
            Some(h) => {
                let live = !h.is_finished();
                h.abort();
                if live {
                    debug!(%document_id, "processing cancelled");
                }
                live
            }
            None => false,
        }
    }

    #[cfg(test)]
    #[must_use]
    pub fn is_scheduled(&self, document_id: Uuid) -> bool {
        self.tasks
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(&document_id)
            .is_some_and(|h| !h.is_finished())
    }

    /// Number of live tasks.
    #[cfg(test)]
    #[must_use]
    pub fn active(&self) -> usize {
        self.tasks
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .values()
            .filter(|h| !h.is_finished())
            .count()
    }

    fn forget(&self, document_id: Uuid) {
        self.tasks
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(&document_id);
    }
}

// =============================================================================
// TASK
// =============================================================================

async fn run_processing(state: AppState, document_id: Uuid) {
    let pipeline = state.config.pipeline;
    let mut ticker = tokio::time::interval(Duration::from_millis(pipeline.tick_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // First tick fires immediately; progress starts one period after upload.
    ticker.tick().await;

    let mut failures: u32 = 0;
    loop {
        ticker.tick().await;

        let step = match state.ingestor.ingest_step(document_id).await.and_then(nonzero_step) {
            Ok(step) => {
                failures = 0;
                step
            }
            Err(e) => {
                failures += 1;
                if failures <= pipeline.max_retries {
                    warn!(%document_id, error = %e, attempt = failures, "chunk ingest failed; retrying");
                    if failures == 1 {
                        state.notifications.notify(
                            "Processing delayed",
                            &format!("Chunk ingest failed, retrying: {e}"),
                            Severity::Warning,
                        );
                    }
                    continue;
                }
                give_up(&state, document_id, &e, failures).await;
                break;
            }
        };

        let outcome = document::advance_processing(&mut *state.documents.write().await, document_id, step);
        match outcome {
            Advance::Progressed { processed, total } => {
                debug!(%document_id, processed, total, "chunks processed");
            }
            Advance::Completed { total } => {
                complete(&state, document_id, total).await;
                break;
            }
            Advance::Skipped => {
                debug!(%document_id, "document gone or terminal; stopping");
                break;
            }
        }
    }

    state.processing.forget(document_id);
}

/// A successful tick must advance by at least one chunk.
fn nonzero_step(step: u32) -> Result<u32, IngestError> {
    if step == 0 {
        return Err(IngestError::Failed("ingestor reported no chunks".into()));
    }
    Ok(step)
}

async fn complete(state: &AppState, document_id: Uuid, total: u32) {
    let name = state
        .documents
        .read()
        .await
        .get(document_id)
        .map(|d| d.name.clone())
        .unwrap_or_default();
    info!(%document_id, %name, total_chunks = total, "document processed");
    state.notifications.notify(
        "Document processed",
        &format!("{name} processed: {total} chunks indexed"),
        Severity::Success,
    );
}

async fn give_up(state: &AppState, document_id: Uuid, error: &IngestError, attempts: u32) {
    let failure = ProcessingFailure { reason: error.to_string(), attempts };
    let (failed, name) = {
        let mut store = state.documents.write().await;
        let failed = document::fail_processing(&mut store, document_id, failure);
        (failed, store.get(document_id).map(|d| d.name.clone()).unwrap_or_default())
    };
    if !failed {
        return;
    }
    warn!(%document_id, %name, attempts, error = %error, "document processing failed");
    state.notifications.notify(
        "Processing failed",
        &format!("{name} could not be processed after {attempts} attempts"),
        Severity::Destructive,
    );
}

#[cfg(test)]
#[path = "processing_test.rs"]
mod tests;
