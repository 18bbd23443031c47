//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON API behind the admin dashboard under a single
//! Axum router. Every `/api/*` route except login requires a session.

pub mod auth;
pub mod documents;
pub mod panels;
pub mod setup;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/shell", get(panels::shell))
        .route("/api/navigation", get(panels::navigation))
        .route("/api/documents", get(documents::list_documents).post(documents::submit_documents))
        .route(
            "/api/documents/{id}",
            get(documents::get_document).delete(documents::delete_document),
        )
        .route("/api/dashboard", get(panels::dashboard))
        .route("/api/conversations", get(panels::conversations))
        .route("/api/security", get(panels::security))
        .route("/api/setup", get(setup::get_setup))
        .route("/api/setup/openai", post(setup::save_api_key))
        .route("/api/setup/prompt", put(setup::save_system_prompt))
        .route("/api/setup/whatsapp", post(setup::connect_messaging))
        .route("/api/setup/whatsapp/test", post(setup::test_connection))
        .route("/api/notifications", get(panels::notifications))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
