use super::*;

// =============================================================================
// DocumentStore ordering
// =============================================================================

#[test]
fn store_new_is_empty() {
    let store = DocumentStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert_eq!(store.iter().count(), 0);
}

#[test]
fn prepend_puts_newest_first() {
    let mut store = DocumentStore::new();
    let first = test_helpers::dummy_document(0, 10);
    let second = test_helpers::dummy_document(0, 20);
    let (first_id, second_id) = (first.id, second.id);

    store.prepend(first);
    store.prepend(second);

    let ids: Vec<Uuid> = store.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![second_id, first_id]);
}

#[test]
fn prepend_existing_id_replaces_in_place() {
    let mut store = DocumentStore::new();
    let mut doc = test_helpers::dummy_document(0, 10);
    let other = test_helpers::dummy_document(0, 10);
    let id = doc.id;
    store.prepend(doc.clone());
    store.prepend(other);

    doc.processed_chunks = Some(5);
    store.prepend(doc);

    assert_eq!(store.len(), 2);
    assert_eq!(store.iter().last().map(|d| d.id), Some(id));
    assert_eq!(store.get(id).and_then(|d| d.processed_chunks), Some(5));
}

#[test]
fn remove_drops_from_map_and_order() {
    let mut store = DocumentStore::new();
    let doc = test_helpers::dummy_document(0, 10);
    let id = doc.id;
    store.prepend(doc);

    assert!(store.remove(id).is_some());
    assert!(store.remove(id).is_none());
    assert!(store.is_empty());
    assert_eq!(store.iter().count(), 0);
}

// =============================================================================
// DocumentStatus
// =============================================================================

#[test]
fn terminal_statuses() {
    assert!(!DocumentStatus::Processing.is_terminal());
    assert!(DocumentStatus::Completed.is_terminal());
    assert!(DocumentStatus::Error.is_terminal());
}

#[test]
fn document_serializes_type_and_snake_case_status() {
    let doc = test_helpers::dummy_document(3, 10);
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["type"], "PDF");
    assert_eq!(json["status"], "processing");
    assert_eq!(json["processed_chunks"], 3);
    assert!(json.get("failure").is_none());
}

// =============================================================================
// AppState
// =============================================================================

#[tokio::test]
async fn app_state_without_seed_is_empty() {
    let state = test_helpers::test_app_state();
    assert!(state.documents.read().await.is_empty());
    assert!(state.conversations.is_empty());
    assert!(state.security_logs.is_empty());
}

#[tokio::test]
async fn app_state_with_seed_has_panel_data() {
    let mut config = test_helpers::test_config();
    config.seed_demo_data = true;
    let state = AppState::new(config);
    assert!(!state.conversations.is_empty());
    assert!(!state.security_logs.is_empty());
}
