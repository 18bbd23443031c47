//! Setup panel: chat-provider key, model, system prompt, messaging link.
//!
//! DESIGN
//! ======
//! All integrations are stubbed: values are validated and kept in memory,
//! nothing is sent over the network. Views never expose a stored secret,
//! only a masked form.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::services::notify::Severity;
use crate::state::AppState;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a professional and helpful virtual assistant.\n\
Always answer clearly, objectively and politely.\n\
Use the information from the provided documents to give accurate answers.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatModel {
    #[default]
    #[serde(rename = "gpt-4")]
    Gpt4,
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("please enter a valid API key")]
    MissingApiKey,
    #[error("fill in every messaging field")]
    MissingMessagingFields,
    #[error("system prompt must not be empty")]
    EmptyPrompt,
    #[error("messaging channel is not connected")]
    NotConnected,
}

#[derive(Debug, Clone)]
pub struct SetupState {
    api_key: Option<String>,
    pub model: ChatModel,
    pub system_prompt: String,
    messaging_token: Option<String>,
    pub messaging_number: Option<String>,
    pub connected: bool,
}

impl Default for SetupState {
    fn default() -> Self {
        Self {
            api_key: None,
            model: ChatModel::default(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_owned(),
            messaging_token: None,
            messaging_number: None,
            connected: false,
        }
    }
}

/// What the setup panel renders. Secrets appear masked.
#[derive(Debug, Clone, Serialize)]
pub struct SetupView {
    pub api_key: Option<String>,
    pub api_key_configured: bool,
    pub model: ChatModel,
    pub system_prompt: String,
    pub messaging_token: Option<String>,
    pub messaging_number: Option<String>,
    pub connected: bool,
}

impl SetupState {
    #[must_use]
    pub fn view(&self) -> SetupView {
        SetupView {
            api_key: self.api_key.as_deref().map(mask_secret),
            api_key_configured: self.api_key.is_some(),
            model: self.model,
            system_prompt: self.system_prompt.clone(),
            messaging_token: self.messaging_token.as_deref().map(mask_secret),
            messaging_number: self.messaging_number.clone(),
            connected: self.connected,
        }
    }

    /// # Errors
    ///
    /// Returns `MissingApiKey` if the key is blank.
    pub fn set_api_key(&mut self, api_key: &str, model: Option<ChatModel>) -> Result<(), SetupError> {
        let key = api_key.trim();
        if key.is_empty() {
            return Err(SetupError::MissingApiKey);
        }
        self.api_key = Some(key.to_owned());
        if let Some(model) = model {
            self.model = model;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `EmptyPrompt` if the prompt is blank.
    pub fn set_system_prompt(&mut self, prompt: &str) -> Result<(), SetupError> {
        if prompt.trim().is_empty() {
            return Err(SetupError::EmptyPrompt);
        }
        prompt.clone_into(&mut self.system_prompt);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `MissingMessagingFields` unless both token and number are set.
    pub fn connect_messaging(&mut self, token: &str, number: &str) -> Result<(), SetupError> {
        let (token, number) = (token.trim(), number.trim());
        if token.is_empty() || number.is_empty() {
            return Err(SetupError::MissingMessagingFields);
        }
        self.messaging_token = Some(token.to_owned());
        self.messaging_number = Some(number.to_owned());
        self.connected = true;
        Ok(())
    }
}

/// Keep the first three and last four characters; short secrets are fully masked.
#[must_use]
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}{}{tail}", "*".repeat(chars.len() - 7))
}

// =============================================================================
// SERVICE OPERATIONS
// =============================================================================

fn report(state: &AppState, result: Result<(), SetupError>, success_title: &str, success: &str) -> Result<(), SetupError> {
    match &result {
        Ok(()) => {
            state.notifications.notify(success_title, success, Severity::Success);
        }
        Err(e) => {
            state.notifications.notify("Error", &e.to_string(), Severity::Destructive);
        }
    }
    result
}

/// # Errors
///
/// Returns `MissingApiKey` for a blank key; a destructive notification is emitted.
pub async fn save_api_key(state: &AppState, api_key: &str, model: Option<ChatModel>) -> Result<SetupView, SetupError> {
    let mut setup = state.setup.write().await;
    let result = setup.set_api_key(api_key, model);
    report(state, result, "Success", "Chat provider API key configured")?;
    info!(model = ?setup.model, "chat provider key saved");
    Ok(setup.view())
}

/// # Errors
///
/// Returns `EmptyPrompt` for a blank prompt.
pub async fn save_system_prompt(state: &AppState, prompt: &str) -> Result<SetupView, SetupError> {
    let mut setup = state.setup.write().await;
    let result = setup.set_system_prompt(prompt);
    report(state, result, "Saved", "System prompt updated")?;
    Ok(setup.view())
}

/// # Errors
///
/// Returns `MissingMessagingFields` unless both fields are filled.
pub async fn connect_messaging(state: &AppState, token: &str, number: &str) -> Result<SetupView, SetupError> {
    let mut setup = state.setup.write().await;
    let result = setup.connect_messaging(token, number);
    report(state, result, "Connected", "Messaging API connected successfully")?;
    info!(number = ?setup.messaging_number, "messaging channel connected");
    Ok(setup.view())
}

/// Simulated round trip: one notification now, one after `setup_test_delay_ms`.
///
/// # Errors
///
/// Returns `NotConnected` if the messaging channel was never connected.
pub async fn test_connection(state: &AppState) -> Result<(), SetupError> {
    if !state.setup.read().await.connected {
        let err = SetupError::NotConnected;
        state.notifications.notify("Error", &err.to_string(), Severity::Destructive);
        return Err(err);
    }

    state
        .notifications
        .notify("Test started", "Sending test message...", Severity::Info);
    let delay = Duration::from_millis(state.config.setup_test_delay_ms);
    let notifications = state.notifications.clone();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        notifications.notify("Test finished", "Connection is working correctly!", Severity::Success);
    });
    Ok(())
}

#[cfg(test)]
#[path = "setup_test.rs"]
mod tests;
