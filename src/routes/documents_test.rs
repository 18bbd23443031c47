use super::*;
use crate::services::auth::AuthStatus;
use crate::state::test_helpers;

fn admin(state: &AppState) -> AuthUser {
    let token = state.sessions.login(test_helpers::TEST_ADMIN_TOKEN).unwrap();
    let AuthStatus::Authenticated(user) = state.sessions.status(&token) else {
        panic!("fresh session should be live");
    };
    AuthUser { user, token }
}

fn file(name: &str, size: u64) -> FileDescriptor {
    FileDescriptor { name: name.into(), size, extension: None }
}

#[test]
fn error_mapping() {
    let too_large = DocumentError::FileTooLarge { name: "a.pdf".into(), size: 11, limit: 10 };
    assert_eq!(document_error_to_status(too_large), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(document_error_to_status(DocumentError::NotFound(Uuid::nil())), StatusCode::NOT_FOUND);
}

#[test]
fn submit_status_by_outcome() {
    assert_eq!(submit_status(&SubmitReport::default()), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn submit_then_get_then_delete() {
    let state = test_helpers::test_app_state();
    let body = SubmitBody { files: vec![file("guide.pdf", 200_000), file("huge.zip", 50 * 1024 * 1024)] };

    let (status, Json(report)) = submit_documents(State(state.clone()), admin(&state), Json(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(report.accepted.len(), 1);
    assert_eq!(report.rejected.len(), 1);
    let id = report.accepted[0].id;

    let Json(row) = get_document(State(state.clone()), admin(&state), Path(id)).await.unwrap();
    assert_eq!(row.document.name, "guide.pdf");

    let status = delete_document(State(state.clone()), admin(&state), Path(id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let status = delete_document(State(state.clone()), admin(&state), Path(id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let missing = get_document(State(state.clone()), admin(&state), Path(id)).await;
    assert_eq!(missing.err(), Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn all_rejected_is_payload_too_large() {
    let state = test_helpers::test_app_state();
    let body = SubmitBody { files: vec![file("huge.zip", 50 * 1024 * 1024)] };
    let (status, _) = submit_documents(State(state.clone()), admin(&state), Json(body)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);

    let Json(view) = list_documents(State(state.clone()), admin(&state)).await;
    assert!(view.documents.is_empty());
}

