//! Per-browser session state on top of `tower-sessions`.
//!
//! The session holds at most two values: the authenticated user's id and a
//! one-shot notice that the next rendered page displays and discards.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use super::AppError;
use crate::constants::session::{NOTICE_KEY, USER_ID_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated(i32),
}

#[derive(Debug, Clone)]
pub struct AuthSession(Session);

impl AuthSession {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self(session)
    }

    pub async fn state(&self) -> Result<SessionState, AppError> {
        Ok(match self.0.get::<i32>(USER_ID_KEY).await? {
            Some(user_id) => SessionState::Authenticated(user_id),
            None => SessionState::Anonymous,
        })
    }

    /// Binds the session to `user_id` under a fresh session id.
    pub async fn bind(&self, user_id: i32) -> Result<(), AppError> {
        self.0.cycle_id().await?;
        self.0.insert(USER_ID_KEY, user_id).await?;
        Ok(())
    }

    /// Returns to `Anonymous` whatever the prior state. Pending notices survive.
    pub async fn clear(&self) -> Result<(), AppError> {
        self.0.remove::<i32>(USER_ID_KEY).await?;
        self.0.cycle_id().await?;
        Ok(())
    }

    pub async fn push_notice(&self, notice: &str) -> Result<(), AppError> {
        self.0.insert(NOTICE_KEY, notice).await?;
        Ok(())
    }

    /// Removes and returns the pending notice.
    pub async fn take_notice(&self) -> Result<Option<String>, AppError> {
        Ok(self.0.remove::<String>(NOTICE_KEY).await?)
    }
}

impl<S> FromRequestParts<S> for AuthSession
where
    S: Send + Sync,
{
    type Rejection = <Session as FromRequestParts<S>>::Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Session::from_request_parts(parts, state).await.map(Self)
    }
}
