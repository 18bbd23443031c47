//! Auth routes: admin-token login, logout and the session extractor.

use axum::extract::{FromRef, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::Duration;
use tracing::{info, warn};

use crate::services::auth::{AuthStatus, SessionUser};
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "session_token";

/// Session token from the `session_token` cookie, else a Bearer header.
pub(crate) fn request_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(token) = jar.get(COOKIE_NAME).map(Cookie::value).filter(|v| !v.is_empty()) {
        return Some(token.to_owned());
    }
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
}

/// Auth status of the caller, without rejecting anonymous requests.
pub(crate) fn request_status(state: &AppState, headers: &HeaderMap) -> AuthStatus {
    request_token(headers).map_or(AuthStatus::Anonymous, |token| state.sessions.status(&token))
}

fn session_cookie(value: String, max_age: Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(max_age)
        .build()
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated admin extracted from the session cookie or Bearer token.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: SessionUser,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = request_token(&parts.headers).ok_or(StatusCode::UNAUTHORIZED)?;
        let app_state = AppState::from_ref(state);
        match app_state.sessions.status(&token) {
            AuthStatus::Authenticated(user) => Ok(Self { user, token }),
            AuthStatus::Anonymous => Err(StatusCode::UNAUTHORIZED),
        }
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Deserialize)]
pub struct LoginBody {
    pub token: String,
}

/// `POST /api/auth/login`: exchange the admin token for a session cookie.
pub async fn login(State(state): State<AppState>, Json(body): Json<LoginBody>) -> Response {
    let session = match state.sessions.login(body.token.trim()) {
        Ok(session) => session,
        Err(e) => {
            warn!(error = %e, "admin login rejected");
            return StatusCode::UNAUTHORIZED.into_response();
        }
    };
    info!("admin session created");

    let ttl = Duration::seconds(i64::try_from(state.config.session_ttl_secs).unwrap_or(i64::MAX));
    let jar = CookieJar::new().add(session_cookie(session.clone(), ttl, state.config.cookie_secure));
    (jar, Json(serde_json::json!({ "token": session }))).into_response()
}

/// `GET /api/auth/me`: return the current session user.
pub async fn me(auth: AuthUser) -> Json<SessionUser> {
    Json(auth.user)
}

/// `POST /api/auth/logout`: drop the session, clear the cookie.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    state.sessions.logout(&auth.token);
    let jar = CookieJar::new().add(session_cookie(String::new(), Duration::ZERO, state.config.cookie_secure));
    (jar, StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
