use super::*;
use crate::config::DEFAULT_AUTH_ENTRY_URL;
use crate::services::auth::SessionUser;
use crate::state::{DocumentStatus, test_helpers};
use uuid::Uuid;

fn admin() -> AuthStatus {
    AuthStatus::Authenticated(SessionUser { id: Uuid::new_v4(), name: "Admin".into() })
}

// =============================================================================
// Tab parsing and menu
// =============================================================================

#[test]
fn parse_known_tags() {
    assert_eq!(Tab::parse(Some("documents")), Tab::Documents);
    assert_eq!(Tab::parse(Some(" Security ")), Tab::Security);
}

#[test]
fn parse_unknown_or_missing_falls_back_to_dashboard() {
    assert_eq!(Tab::parse(Some("billing")), Tab::Dashboard);
    assert_eq!(Tab::parse(Some("")), Tab::Dashboard);
    assert_eq!(Tab::parse(None), Tab::Dashboard);
}

#[test]
fn menu_lists_every_tab_with_one_active() {
    let entries = menu(Tab::Conversations);
    let ids: Vec<&str> = entries.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec!["dashboard", "setup", "documents", "conversations", "security"]);
    let active: Vec<&str> = entries.iter().filter(|e| e.active).map(|e| e.id).collect();
    assert_eq!(active, vec!["conversations"]);
}

// =============================================================================
// Document rows
// =============================================================================

#[test]
fn processing_row_has_progress() {
    let row = DocumentRow::from(test_helpers::dummy_document(5, 20));
    assert_eq!(row.progress, Some(25));
    assert!(row.presentation.animated);
}

#[test]
fn terminal_row_has_no_progress() {
    let mut doc = test_helpers::dummy_document(20, 20);
    doc.status = DocumentStatus::Completed;
    let row = DocumentRow::from(doc);
    assert_eq!(row.progress, None);
    assert_eq!(row.presentation.badge, "Processed");
}

// =============================================================================
// resolve
// =============================================================================

#[tokio::test]
async fn anonymous_is_redirected_to_auth_entry() {
    let state = test_helpers::test_app_state();
    match resolve(&state, &AuthStatus::Anonymous, Some("documents")).await {
        ShellOutcome::Redirect { location } => assert_eq!(location, DEFAULT_AUTH_ENTRY_URL),
        ShellOutcome::Render { .. } => panic!("anonymous caller must not see a panel"),
    }
}

#[tokio::test]
async fn authenticated_renders_selected_panel() {
    let state = test_helpers::test_app_state();
    test_helpers::seed_document(&state, test_helpers::dummy_document(1, 4)).await;

    let outcome = resolve(&state, &admin(), Some("documents")).await;
    let ShellOutcome::Render { tab, menu, panel } = outcome else {
        panic!("expected a rendered panel");
    };
    assert_eq!(tab, Tab::Documents);
    assert!(menu.iter().any(|e| e.id == "documents" && e.active));
    let Panel::Documents(view) = panel else {
        panic!("expected the documents panel");
    };
    assert_eq!(view.summary.processing, 1);
    assert_eq!(view.documents[0].progress, Some(25));
}

#[tokio::test]
async fn panel_serializes_with_tab_tag() {
    let state = test_helpers::test_app_state();
    let json = serde_json::to_value(panel(&state, Tab::Setup).await).unwrap();
    assert_eq!(json["tab"], "setup");
    assert_eq!(json["data"]["connected"], false);
}
