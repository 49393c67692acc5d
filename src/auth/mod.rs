/*!
 * # Session handling
 *
 * Operators authenticate once with `login` and receive an opaque bearer token.
 * Every dashboard route takes a [`SessionContext`], extracted from the
 * `Authorization: Bearer <token>` header and checked against the in-memory
 * [`SessionStore`]. Sessions never expire; they end only on explicit logout.
 */

pub mod password;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::ServiceError;

pub use password::PasswordScheme;

pub const LOGIN_REQUIRED: &str = "Please login first.";

/// The two states of an operator session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    LoggedOut,
    LoggedIn { username: String },
}

#[derive(Clone, Debug)]
pub struct Session {
    pub state: SessionState,
    pub created_at: DateTime<Utc>,
}

impl Session {
    fn logged_in(username: &str) -> Self {
        Self {
            state: SessionState::LoggedIn {
                username: username.to_string(),
            },
            created_at: Utc::now(),
        }
    }

    /// `LoggedIn -> LoggedOut`. Returns false if already logged out.
    pub fn logout(&mut self) -> bool {
        match self.state {
            SessionState::LoggedIn { .. } => {
                self.state = SessionState::LoggedOut;
                true
            }
            SessionState::LoggedOut => false,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match &self.state {
            SessionState::LoggedIn { username } => Some(username),
            SessionState::LoggedOut => None,
        }
    }
}

/// Process-wide session map keyed by bearer token.
#[derive(Clone, Debug, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<Uuid, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a logged-in session for `username` and returns its token.
    pub fn open(&self, username: &str) -> Uuid {
        let token = Uuid::new_v4();
        self.sessions.insert(token, Session::logged_in(username));
        debug!(%token, username, "session opened");
        token
    }

    pub fn get(&self, token: &Uuid) -> Option<Session> {
        self.sessions.get(token).map(|s| s.value().clone())
    }

    /// Logs the session out and forgets the token.
    pub fn close(&self, token: &Uuid) -> bool {
        let closed = self
            .sessions
            .get_mut(token)
            .map(|mut s| s.logout())
            .unwrap_or(false);
        self.sessions.remove(token);
        closed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// An authenticated request. Handlers that take this extractor are gated behind login.
#[derive(Clone, Debug)]
pub struct SessionContext {
    pub token: Uuid,
    pub username: String,
}

fn bearer_token(parts: &Parts) -> Option<Uuid> {
    let value = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    Uuid::parse_str(token).ok()
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
    SessionStore: FromRef<S>,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let store = SessionStore::from_ref(state);
        let token =
            bearer_token(parts).ok_or_else(|| ServiceError::Unauthorized(LOGIN_REQUIRED.into()))?;

        match store.get(&token).and_then(|s| s.username().map(str::to_owned)) {
            Some(username) => Ok(SessionContext { token, username }),
            None => Err(ServiceError::Unauthorized(LOGIN_REQUIRED.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[test]
    fn logout_is_the_only_exit_from_logged_in() {
        let mut session = Session::logged_in("alice");
        assert_eq!(session.username(), Some("alice"));
        assert!(session.logout());
        assert_eq!(session.state, SessionState::LoggedOut);
        assert!(!session.logout());
    }

    #[test]
    fn closing_forgets_the_token() {
        let store = SessionStore::new();
        let token = store.open("bob");
        assert_eq!(store.len(), 1);
        assert!(store.close(&token));
        assert!(store.get(&token).is_none());
        assert!(!store.close(&token));
    }

    #[tokio::test]
    async fn extractor_requires_a_live_session() {
        let store = SessionStore::new();
        let token = store.open("carol");

        let (mut parts, _) = Request::builder()
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(())
            .unwrap()
            .into_parts();
        let ctx = SessionContext::from_request_parts(&mut parts, &store)
            .await
            .unwrap();
        assert_eq!(ctx.username, "carol");

        store.close(&token);
        let err = SessionContext::from_request_parts(&mut parts, &store)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(msg) if msg == LOGIN_REQUIRED));

        let (mut bare, _) = Request::builder().body(()).unwrap().into_parts();
        assert!(SessionContext::from_request_parts(&mut bare, &store)
            .await
            .is_err());
    }
}
