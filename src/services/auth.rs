//! Admin sessions: token login and in-memory session validation.
//!
//! ARCHITECTURE
//! ============
//! A single configured admin token is exchanged for a random session token.
//! Sessions live in memory with a fixed TTL and vanish on restart. Only the
//! SHA-256 digest of the admin token is kept.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use rand::Rng;
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid admin token")]
    InvalidToken,
}

/// Whether the current request carries a live session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    Authenticated(SessionUser),
    Anonymous,
}

impl AuthStatus {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub name: String,
}

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a random 32-byte hex session token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

struct Session {
    user: SessionUser,
    expires_at: Instant,
}

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<String, Session>>>,
    admin_digest: [u8; 32],
    ttl: Duration,
}

impl SessionStore {
    #[must_use]
    pub fn new(admin_token: &str, ttl_secs: u64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            admin_digest: digest(admin_token),
            ttl: Duration::from_secs(ttl_secs),
        }
    }

    /// Exchange the admin token for a fresh session token.
    ///
    /// # Errors
    ///
    /// Returns `InvalidToken` if `admin_token` does not match.
    pub fn login(&self, admin_token: &str) -> Result<String, AuthError> {
        self.login_at(admin_token, Instant::now())
    }

    fn login_at(&self, admin_token: &str, now: Instant) -> Result<String, AuthError> {
        if digest(admin_token) != self.admin_digest {
            return Err(AuthError::InvalidToken);
        }

        let token = generate_token();
        let session = Session {
            user: SessionUser { id: Uuid::new_v4(), name: "Admin".to_owned() },
            expires_at: now + self.ttl,
        };
        let mut sessions = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        sessions.retain(|_, s| s.expires_at > now);
        sessions.insert(token.clone(), session);
        Ok(token)
    }

    /// Resolve a session token to its auth status.
    #[must_use]
    pub fn status(&self, token: &str) -> AuthStatus {
        self.status_at(token, Instant::now())
    }

    fn status_at(&self, token: &str, now: Instant) -> AuthStatus {
        if token.is_empty() {
            return AuthStatus::Anonymous;
        }
        let mut sessions = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        match sessions.get(token) {
            Some(s) if s.expires_at > now => AuthStatus::Authenticated(s.user.clone()),
            Some(_) => {
                sessions.remove(token);
                AuthStatus::Anonymous
            }
            None => AuthStatus::Anonymous,
        }
    }

    /// Drop a session. Unknown tokens are ignored.
    pub fn logout(&self, token: &str) {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(token);
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
