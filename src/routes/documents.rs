//! Document routes: list, submit, fetch and delete.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::routes::auth::AuthUser;
use crate::services::document::{self, DocumentError, FileDescriptor, SubmitReport};
use crate::shell::{self, DocumentRow, DocumentsView};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SubmitBody {
    pub files: Vec<FileDescriptor>,
}

pub(crate) fn document_error_to_status(err: DocumentError) -> StatusCode {
    match err {
        DocumentError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        DocumentError::NotFound(_) => StatusCode::NOT_FOUND,
    }
}

/// `201` when anything was accepted, `413` when every file was too large,
/// `400` for an empty submission.
pub(crate) fn submit_status(report: &SubmitReport) -> StatusCode {
    if !report.accepted.is_empty() {
        StatusCode::CREATED
    } else if !report.rejected.is_empty() {
        StatusCode::PAYLOAD_TOO_LARGE
    } else {
        StatusCode::BAD_REQUEST
    }
}

/// `GET /api/documents`: newest-first list with per-status counts.
pub async fn list_documents(State(state): State<AppState>, _auth: AuthUser) -> Json<DocumentsView> {
    Json(shell::documents_view(&state).await)
}

/// `POST /api/documents`: register file descriptors and start processing.
pub async fn submit_documents(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(body): Json<SubmitBody>,
) -> (StatusCode, Json<SubmitReport>) {
    let report = document::submit_files(&state, body.files).await;
    (submit_status(&report), Json(report))
}

/// `GET /api/documents/{id}`
pub async fn get_document(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentRow>, StatusCode> {
    let doc = document::get_document(&state, id)
        .await
        .map_err(document_error_to_status)?;
    Ok(Json(DocumentRow::from(doc)))
}

/// `DELETE /api/documents/{id}`: always `204`, deleting twice is harmless.
pub async fn delete_document(State(state): State<AppState>, _auth: AuthUser, Path(id): Path<Uuid>) -> StatusCode {
    document::delete_document(&state, id).await;
    StatusCode::NO_CONTENT
}

#[cfg(test)]
#[path = "documents_test.rs"]
mod tests;
