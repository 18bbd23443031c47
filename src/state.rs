//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor and
//! cloned into background processing tasks. It owns the in-memory document
//! store, the notification feed, the processing scheduler and the session
//! store. Nothing here is persisted; all of it is discarded on restart.
//! Mutations go through the service functions, never direct field writes
//! from route code.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::services::auth::SessionStore;
use crate::services::conversation::{self, Conversation};
use crate::services::notify::Notifier;
use crate::services::processing::{ChunkIngestor, ProcessingScheduler, SimulatedIngestor};
use crate::services::security::{self, LogEntry};
use crate::services::setup::SetupState;

// =============================================================================
// DOCUMENT
// =============================================================================

/// Lifecycle of an uploaded document. `Completed` and `Error` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Processing,
    Completed,
    Error,
}

impl DocumentStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }
}

/// Why a document ended up in `Error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingFailure {
    pub reason: String,
    /// Consecutive ingest attempts made before giving up.
    pub attempts: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub name: String,
    /// Human-readable size, e.g. `2.4 MB`.
    pub size: String,
    pub size_bytes: u64,
    /// Upper-cased extension, e.g. `PDF`.
    #[serde(rename = "type")]
    pub kind: String,
    pub status: DocumentStatus,
    /// `YYYY-MM-DD`, UTC.
    pub upload_date: String,
    pub processed_chunks: Option<u32>,
    pub total_chunks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<ProcessingFailure>,
}

// =============================================================================
// DOCUMENT STORE
// =============================================================================

/// Insertion-ordered document map. `order` holds ids newest first.
#[derive(Debug, Default)]
pub struct DocumentStore {
    pub(crate) documents: HashMap<Uuid, Document>,
    pub(crate) order: VecDeque<Uuid>,
}

impl DocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the front of the display order. Replaces an existing id in place.
    pub fn prepend(&mut self, document: Document) {
        let id = document.id;
        if self.documents.insert(id, document).is_none() {
            self.order.push_front(id);
        }
    }

    pub fn remove(&mut self, id: Uuid) -> Option<Document> {
        let removed = self.documents.remove(&id)?;
        self.order.retain(|d| *d != id);
        Some(removed)
    }

    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&Document> {
        self.documents.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: Uuid) -> Option<&mut Document> {
        self.documents.get_mut(&id)
    }

    #[cfg(test)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[cfg(test)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Documents in display order, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.order.iter().filter_map(|id| self.documents.get(id))
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub documents: Arc<RwLock<DocumentStore>>,
    pub notifications: Notifier,
    pub processing: ProcessingScheduler,
    /// Source of per-tick chunk progress.
    pub ingestor: Arc<dyn ChunkIngestor>,
    pub sessions: SessionStore,
    pub setup: Arc<RwLock<SetupState>>,
    /// Seeded, read-only panel data.
    pub conversations: Arc<Vec<Conversation>>,
    pub security_logs: Arc<Vec<LogEntry>>,
}

impl AppState {
    /// Build state with the simulated ingestor.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let ingestor = Arc::new(SimulatedIngestor::new(config.pipeline.step_min, config.pipeline.step_max));
        Self::with_ingestor(config, ingestor)
    }

    #[must_use]
    pub fn with_ingestor(config: AppConfig, ingestor: Arc<dyn ChunkIngestor>) -> Self {
        let seed = config.seed_demo_data;
        let sessions = SessionStore::new(&config.admin_token, config.session_ttl_secs);
        Self {
            notifications: Notifier::new(config.notification_capacity),
            documents: Arc::new(RwLock::new(DocumentStore::new())),
            processing: ProcessingScheduler::new(),
            ingestor,
            sessions,
            setup: Arc::new(RwLock::new(SetupState::default())),
            conversations: Arc::new(if seed { conversation::seed_conversations() } else { Vec::new() }),
            security_logs: Arc::new(if seed { security::seed_logs() } else { Vec::new() }),
            config: Arc::new(config),
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
