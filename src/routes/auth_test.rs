use super::*;
use axum::http::HeaderValue;
use axum::http::header::{COOKIE, SET_COOKIE};

use crate::state::test_helpers;

fn headers(name: axum::http::HeaderName, value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(name, HeaderValue::from_str(value).unwrap());
    headers
}

// =============================================================================
// request_token
// =============================================================================

#[test]
fn token_from_cookie() {
    let h = headers(COOKIE, "session_token=abc123; other=x");
    assert_eq!(request_token(&h).as_deref(), Some("abc123"));
}

#[test]
fn token_from_bearer_header() {
    let h = headers(AUTHORIZATION, "Bearer  tok-9 ");
    assert_eq!(request_token(&h).as_deref(), Some("tok-9"));
}

#[test]
fn empty_cookie_falls_back_to_bearer() {
    let mut h = headers(COOKIE, "session_token=");
    h.insert(AUTHORIZATION, HeaderValue::from_static("Bearer fallback"));
    assert_eq!(request_token(&h).as_deref(), Some("fallback"));
}

#[test]
fn missing_or_malformed_token_is_none() {
    assert_eq!(request_token(&HeaderMap::new()), None);
    assert_eq!(request_token(&headers(AUTHORIZATION, "Basic abc")), None);
    assert_eq!(request_token(&headers(AUTHORIZATION, "Bearer   ")), None);
}

#[test]
fn request_status_resolves_live_session() {
    let state = test_helpers::test_app_state();
    let token = state.sessions.login(test_helpers::TEST_ADMIN_TOKEN).unwrap();

    let h = headers(AUTHORIZATION, &format!("Bearer {token}"));
    assert!(request_status(&state, &h).is_authenticated());
    assert_eq!(request_status(&state, &HeaderMap::new()), AuthStatus::Anonymous);
}

// =============================================================================
// Handlers
// =============================================================================

#[tokio::test]
async fn login_with_wrong_token_is_unauthorized() {
    let state = test_helpers::test_app_state();
    let resp = login(State(state), Json(LoginBody { token: "nope".into() })).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_sets_http_only_cookie() {
    let state = test_helpers::test_app_state();
    let body = LoginBody { token: format!(" {} ", test_helpers::TEST_ADMIN_TOKEN) };
    let resp = login(State(state), Json(body)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(cookie.starts_with("session_token="));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn logout_drops_session() {
    let state = test_helpers::test_app_state();
    let token = state.sessions.login(test_helpers::TEST_ADMIN_TOKEN).unwrap();
    let AuthStatus::Authenticated(user) = state.sessions.status(&token) else {
        panic!("fresh session should be live");
    };

    let resp = logout(State(state.clone()), AuthUser { user, token: token.clone() })
        .await
        .into_response();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(state.sessions.status(&token), AuthStatus::Anonymous);
}
