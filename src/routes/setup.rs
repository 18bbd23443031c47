//! Setup routes: chat provider key, system prompt and messaging connector.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;

use crate::routes::auth::AuthUser;
use crate::services::setup::{self, ChatModel, SetupError, SetupView};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ApiKeyBody {
    pub api_key: String,
    pub model: Option<ChatModel>,
}

#[derive(Deserialize)]
pub struct PromptBody {
    pub prompt: String,
}

#[derive(Deserialize)]
pub struct MessagingBody {
    pub token: String,
    pub number: String,
}

pub(crate) fn setup_error_to_status(err: SetupError) -> StatusCode {
    match err {
        SetupError::MissingApiKey | SetupError::MissingMessagingFields | SetupError::EmptyPrompt => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        SetupError::NotConnected => StatusCode::CONFLICT,
    }
}

/// `GET /api/setup`: current settings with secrets masked.
pub async fn get_setup(State(state): State<AppState>, _auth: AuthUser) -> Json<SetupView> {
    Json(state.setup.read().await.view())
}

/// `POST /api/setup/openai`
pub async fn save_api_key(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(body): Json<ApiKeyBody>,
) -> Result<Json<SetupView>, StatusCode> {
    let view = setup::save_api_key(&state, &body.api_key, body.model)
        .await
        .map_err(setup_error_to_status)?;
    Ok(Json(view))
}

/// `PUT /api/setup/prompt`
pub async fn save_system_prompt(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(body): Json<PromptBody>,
) -> Result<Json<SetupView>, StatusCode> {
    let view = setup::save_system_prompt(&state, &body.prompt)
        .await
        .map_err(setup_error_to_status)?;
    Ok(Json(view))
}

/// `POST /api/setup/whatsapp`
pub async fn connect_messaging(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(body): Json<MessagingBody>,
) -> Result<Json<SetupView>, StatusCode> {
    let view = setup::connect_messaging(&state, &body.token, &body.number)
        .await
        .map_err(setup_error_to_status)?;
    Ok(Json(view))
}

/// `POST /api/setup/whatsapp/test`: `202`, the result arrives as notifications.
pub async fn test_connection(State(state): State<AppState>, _auth: AuthUser) -> Result<StatusCode, StatusCode> {
    setup::test_connection(&state)
        .await
        .map_err(setup_error_to_status)?;
    Ok(StatusCode::ACCEPTED)
}

#[cfg(test)]
#[path = "setup_test.rs"]
mod tests;
