//! Panel routes: shell, navigation, read-only panels and notification polling.

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Json, Redirect, Response};
use serde::Deserialize;

use crate::routes::auth::{AuthUser, request_status};
use crate::services::conversation::{self, ConversationsView, StatusFilter};
use crate::services::dashboard::{self, DashboardView};
use crate::services::notify::Notification;
use crate::services::security::{self, LogLevel, SecurityView};
use crate::shell::{self, MenuEntry, ShellOutcome, Tab};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct TabQuery {
    pub tab: Option<String>,
}

#[derive(Deserialize)]
pub struct ConversationQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub status: StatusFilter,
}

#[derive(Deserialize)]
pub struct SecurityQuery {
    pub level: Option<LogLevel>,
}

#[derive(Deserialize)]
pub struct NotificationQuery {
    #[serde(default)]
    pub after: u64,
}

/// `GET /api/shell?tab=`: menu plus the selected panel, or `303` to the
/// auth entry point for anonymous callers.
pub async fn shell(State(state): State<AppState>, headers: HeaderMap, Query(query): Query<TabQuery>) -> Response {
    let auth = request_status(&state, &headers);
    match shell::resolve(&state, &auth, query.tab.as_deref()).await {
        ShellOutcome::Redirect { location } => Redirect::to(&location).into_response(),
        outcome @ ShellOutcome::Render { .. } => Json(outcome).into_response(),
    }
}

/// `GET /api/navigation?tab=`
pub async fn navigation(_auth: AuthUser, Query(query): Query<TabQuery>) -> Json<Vec<MenuEntry>> {
    Json(shell::menu(Tab::parse(query.tab.as_deref())))
}

/// `GET /api/dashboard`
pub async fn dashboard(State(state): State<AppState>, _auth: AuthUser) -> Json<DashboardView> {
    Json(dashboard::view(&state).await)
}

/// `GET /api/conversations?search=&status=`
pub async fn conversations(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ConversationQuery>,
) -> Json<ConversationsView> {
    Json(conversation::view(&state.conversations, query.search.trim(), query.status))
}

/// `GET /api/security?level=`
pub async fn security(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<SecurityQuery>,
) -> Json<SecurityView> {
    Json(security::view(&state.security_logs, query.level))
}

/// `GET /api/notifications?after=`: notifications newer than `after`.
pub async fn notifications(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<NotificationQuery>,
) -> Json<Vec<Notification>> {
    Json(state.notifications.since(query.after))
}

#[cfg(test)]
#[path = "panels_test.rs"]
mod tests;
