//! Document service: upload validation, chunk progress, deletion.
//!
//! DESIGN
//! ======
//! The state machine lives in plain functions over `&mut DocumentStore`
//! (`advance_processing`, `fail_processing`, `remove_document`) so it can be
//! driven tick by tick without a clock. The async wrappers lock shared
//! state, call those functions, and then handle the side effects:
//! notifications and scheduling or cancelling the processing task.
//!
//! STATE MACHINE
//! =============
//! `processing -> completed` once `processed_chunks` reaches `total_chunks`.
//! `processing -> error` only through `fail_processing`, with a cause.
//! Both targets are terminal; ticks against them (or against a deleted id)
//! are no-ops.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::PipelineConfig;
use crate::display::{format_size, type_label};
use crate::services::notify::Severity;
use crate::state::{AppState, Document, DocumentStatus, DocumentStore, ProcessingFailure};

/// Total assumed for a processing document that carries no counter.
const FALLBACK_TOTAL_CHUNKS: u32 = 30;

// =============================================================================
// TYPES
// =============================================================================

/// One file offered by drag-and-drop or the file picker.
#[derive(Debug, Clone, Deserialize)]
pub struct FileDescriptor {
    pub name: String,
    pub size: u64,
    #[serde(default)]
    pub extension: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("{name} exceeds the {} limit", format_size(*.limit))]
    FileTooLarge { name: String, size: u64, limit: u64 },
    #[error("document not found: {0}")]
    NotFound(Uuid),
}

/// Result of applying one tick to a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Progressed { processed: u32, total: u32 },
    Completed { total: u32 },
    /// Absent or already terminal; nothing changed.
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
pub struct Rejection {
    pub name: String,
    pub size: u64,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SubmitReport {
    pub accepted: Vec<Document>,
    pub rejected: Vec<Rejection>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    pub total: usize,
    pub processing: usize,
    pub completed: usize,
    pub error: usize,
}

#[derive(Debug, Clone)]
pub struct DocumentListing {
    pub summary: DocumentSummary,
    pub documents: Vec<Document>,
}

// =============================================================================
// PURE TRANSITIONS
// =============================================================================

/// Placeholder chunk count: one chunk per `chunk_estimate_bytes`, clamped to
/// the configured range.
#[must_use]
pub fn estimate_total_chunks(size: u64, pipeline: &PipelineConfig) -> u32 {
    let estimate = size.div_ceil(pipeline.chunk_estimate_bytes.max(1));
    let estimate = u32::try_from(estimate).unwrap_or(u32::MAX);
    estimate.clamp(pipeline.min_total_chunks, pipeline.max_total_chunks)
}

/// Validate a file and build its `processing` record.
///
/// # Errors
///
/// Returns `FileTooLarge` if `file.size` exceeds `max_upload_bytes`.
pub fn new_document(file: &FileDescriptor, pipeline: &PipelineConfig, upload_date: &str) -> Result<Document, DocumentError> {
    if file.size > pipeline.max_upload_bytes {
        return Err(DocumentError::FileTooLarge {
            name: file.name.clone(),
            size: file.size,
            limit: pipeline.max_upload_bytes,
        });
    }

    Ok(Document {
        id: Uuid::new_v4(),
        name: file.name.clone(),
        size: format_size(file.size),
        size_bytes: file.size,
        kind: type_label(&file.name, file.extension.as_deref()),
        status: DocumentStatus::Processing,
        upload_date: upload_date.to_owned(),
        processed_chunks: Some(0),
        total_chunks: Some(estimate_total_chunks(file.size, pipeline)),
        failure: None,
    })
}

/// Apply one chunk step to a processing document.
///
/// Clamps to `total_chunks` and transitions to `completed` when the step
/// reaches or passes it.
pub fn advance_processing(store: &mut DocumentStore, id: Uuid, step: u32) -> Advance {
    let Some(doc) = store.get_mut(id) else {
        return Advance::Skipped;
    };
    if doc.status != DocumentStatus::Processing {
        return Advance::Skipped;
    }

    let total = *doc.total_chunks.get_or_insert(FALLBACK_TOTAL_CHUNKS);
    let processed = doc.processed_chunks.unwrap_or(0).saturating_add(step);
    if processed >= total {
        doc.processed_chunks = Some(total);
        doc.status = DocumentStatus::Completed;
        return Advance::Completed { total };
    }

    doc.processed_chunks = Some(processed);
    Advance::Progressed { processed, total }
}

/// Move a processing document to `error`. Returns `false` if it is absent or
/// already terminal.
pub fn fail_processing(store: &mut DocumentStore, id: Uuid, failure: ProcessingFailure) -> bool {
    let Some(doc) = store.get_mut(id) else {
        return false;
    };
    if doc.status != DocumentStatus::Processing {
        return false;
    }
    doc.status = DocumentStatus::Error;
    doc.failure = Some(failure);
    true
}

/// Remove a document regardless of status. Absent ids return `None`.
pub fn remove_document(store: &mut DocumentStore, id: Uuid) -> Option<Document> {
    store.remove(id)
}

#[must_use]
pub fn summarize(store: &DocumentStore) -> DocumentSummary {
    store.iter().fold(DocumentSummary::default(), |mut acc, doc| {
        acc.total += 1;
        match doc.status {
            DocumentStatus::Processing => acc.processing += 1,
            DocumentStatus::Completed => acc.completed += 1,
            DocumentStatus::Error => acc.error += 1,
        }
        acc
    })
}

// =============================================================================
// SERVICE OPERATIONS
// =============================================================================

/// Register every acceptable file and start its processing task.
///
/// Oversized files produce a destructive notification and no record; this
/// never fails as a whole.
pub async fn submit_files(state: &AppState, files: Vec<FileDescriptor>) -> SubmitReport {
    let pipeline = state.config.pipeline;
    let today = today();
    let mut report = SubmitReport::default();

    for file in files {
        let doc = match new_document(&file, &pipeline, &today) {
            Ok(doc) => doc,
            Err(e) => {
                if let DocumentError::FileTooLarge { size, limit, .. } = &e {
                    info!(name = %file.name, size, limit, "upload rejected");
                }
                state
                    .notifications
                    .notify("File too large", &e.to_string(), Severity::Destructive);
                report.rejected.push(Rejection { name: file.name, size: file.size, reason: e.to_string() });
                continue;
            }
        };

        state.documents.write().await.prepend(doc.clone());
        state.processing.schedule(state, doc.id);
        info!(
            document_id = %doc.id,
            name = %doc.name,
            total_chunks = doc.total_chunks.unwrap_or_default(),
            "upload started"
        );
        state.notifications.notify(
            "Upload started",
            &format!("{} is being processed", doc.name),
            Severity::Info,
        );
        report.accepted.push(doc);
    }

    report
}

/// Delete a document and cancel its processing task. Idempotent: an absent
/// id changes nothing and emits nothing.
pub async fn delete_document(state: &AppState, id: Uuid) -> Option<Document> {
    let removed = remove_document(&mut *state.documents.write().await, id);
    state.processing.cancel(id);

    match &removed {
        Some(doc) => {
            info!(document_id = %id, name = %doc.name, "document removed");
            state
                .notifications
                .notify("Document removed", "The document was removed successfully", Severity::Info);
        }
        None => debug!(document_id = %id, "delete of absent document ignored"),
    }
    removed
}

/// Snapshot of all documents, newest first, with counts over the same
/// snapshot.
pub async fn list_documents(state: &AppState) -> DocumentListing {
    let store = state.documents.read().await;
    DocumentListing {
        summary: summarize(&store),
        documents: store.iter().cloned().collect(),
    }
}

/// # Errors
///
/// Returns `NotFound` if no document has this id.
pub async fn get_document(state: &AppState, id: Uuid) -> Result<Document, DocumentError> {
    state
        .documents
        .read()
        .await
        .get(id)
        .cloned()
        .ok_or(DocumentError::NotFound(id))
}

pub async fn summary(state: &AppState) -> DocumentSummary {
    summarize(&*state.documents.read().await)
}

/// Seed the demo library: one completed, one mid-processing, one failed.
/// The processing one is scheduled like a fresh upload.
pub async fn seed_demo_documents(state: &AppState) {
    let seeds = [
        ("Product_Manual_v2.pdf", 2_516_582, DocumentStatus::Completed, Some((45, 45)), "2024-01-10"),
        ("Support_FAQ.docx", 876_544, DocumentStatus::Processing, Some((23, 34)), "2024-01-10"),
        ("Company_Policies.txt", 126_976, DocumentStatus::Error, None, "2024-01-09"),
    ];

    let mut resume = Vec::new();
    {
        let mut store = state.documents.write().await;
        // Oldest first so the display order matches the seed order.
        for (name, size, status, chunks, date) in seeds.into_iter().rev() {
            let doc = Document {
                id: Uuid::new_v4(),
                name: name.to_owned(),
                size: format_size(size),
                size_bytes: size,
                kind: type_label(name, None),
                status,
                upload_date: date.to_owned(),
                processed_chunks: chunks.map(|(p, _)| p),
                total_chunks: chunks.map(|(_, t)| t),
                failure: (status == DocumentStatus::Error)
                    .then(|| ProcessingFailure { reason: "text extraction failed".into(), attempts: 0 }),
            };
            if status == DocumentStatus::Processing {
                resume.push(doc.id);
            }
            store.prepend(doc);
        }
    }

    for id in resume {
        state.processing.schedule(state, id);
    }
    info!(count = 3, "demo documents seeded");
}

fn today() -> String {
    time::OffsetDateTime::now_utc().date().to_string()
}

#[cfg(test)]
#[path = "document_test.rs"]
mod tests;
