use super::*;
use crate::state::test_helpers;
use tokio::time::{Duration as TokioDuration, sleep, timeout};

// =============================================================================
// mask_secret
// =============================================================================

#[test]
fn mask_secret_keeps_head_and_tail() {
    assert_eq!(mask_secret("sk-abcdefghijkl"), "sk-********ijkl");
}

#[test]
fn mask_secret_short_values_fully_masked() {
    assert_eq!(mask_secret("12345678"), "********");
    assert_eq!(mask_secret(""), "");
}

// =============================================================================
// SetupState
// =============================================================================

#[test]
fn default_state_has_prompt_and_no_secrets() {
    let view = SetupState::default().view();
    assert!(!view.api_key_configured);
    assert!(view.api_key.is_none());
    assert_eq!(view.model, ChatModel::Gpt4);
    assert_eq!(view.system_prompt, DEFAULT_SYSTEM_PROMPT);
    assert!(!view.connected);
}

#[test]
fn blank_api_key_rejected() {
    let mut setup = SetupState::default();
    assert_eq!(setup.set_api_key("   ", None), Err(SetupError::MissingApiKey));
    assert!(!setup.view().api_key_configured);
}

#[test]
fn api_key_saved_masked_with_model() {
    let mut setup = SetupState::default();
    setup
        .set_api_key(" sk-abcdefghijkl ", Some(ChatModel::Gpt35Turbo))
        .unwrap();
    let view = setup.view();
    assert!(view.api_key_configured);
    assert_eq!(view.api_key.as_deref(), Some("sk-********ijkl"));
    assert_eq!(view.model, ChatModel::Gpt35Turbo);
}

#[test]
fn messaging_requires_both_fields() {
    let mut setup = SetupState::default();
    assert_eq!(setup.connect_messaging("token", " "), Err(SetupError::MissingMessagingFields));
    assert_eq!(setup.connect_messaging("", "+55 11 99999-1234"), Err(SetupError::MissingMessagingFields));
    assert!(!setup.connected);

    setup
        .connect_messaging("EAAG-token-value", "+55 11 99999-1234")
        .unwrap();
    assert!(setup.connected);
    assert_eq!(setup.view().messaging_number.as_deref(), Some("+55 11 99999-1234"));
}

#[test]
fn empty_prompt_rejected() {
    let mut setup = SetupState::default();
    assert_eq!(setup.set_system_prompt("\n "), Err(SetupError::EmptyPrompt));
    setup.set_system_prompt("Be brief.").unwrap();
    assert_eq!(setup.system_prompt, "Be brief.");
}

#[test]
fn chat_model_serde_names() {
    assert_eq!(serde_json::to_value(ChatModel::Gpt35Turbo).unwrap(), "gpt-3.5-turbo");
    let parsed: ChatModel = serde_json::from_str("\"gpt-4\"").unwrap();
    assert_eq!(parsed, ChatModel::Gpt4);
}

// =============================================================================
// Service operations
// =============================================================================

#[tokio::test]
async fn save_api_key_notifies_on_both_paths() {
    let state = test_helpers::test_app_state();

    assert!(save_api_key(&state, "", None).await.is_err());
    let view = save_api_key(&state, "sk-abcdefghijkl", None).await.unwrap();
    assert!(view.api_key_configured);

    let severities: Vec<Severity> = state.notifications.recent().iter().map(|n| n.severity).collect();
    assert_eq!(severities, vec![Severity::Destructive, Severity::Success]);
}

#[tokio::test]
async fn test_connection_requires_connection() {
    let state = test_helpers::test_app_state();
    assert_eq!(test_connection(&state).await, Err(SetupError::NotConnected));
}

#[tokio::test]
async fn test_connection_reports_twice() {
    let state = test_helpers::test_app_state();
    connect_messaging(&state, "token-123456789", "+55 11 98888-5678")
        .await
        .unwrap();

    test_connection(&state).await.unwrap();
    assert!(state.notifications.recent().iter().any(|n| n.title == "Test started"));

    timeout(TokioDuration::from_secs(1), async {
        while !state.notifications.recent().iter().any(|n| n.title == "Test finished") {
            sleep(TokioDuration::from_millis(5)).await;
        }
    })
    .await
    .expect("delayed test notification should arrive");
}
