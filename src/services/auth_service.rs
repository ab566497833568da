//! Domain service for authentication and the single user account.
//!
//! Handles credential checks, resolving the session's user id on each
//! request, display-name changes and admin provisioning.

use thiserror::Error;

use crate::db::Provisioned;
use crate::models::{LoginForm, SettingsForm, User, ValidationError};

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("No user has been provisioned")]
    NoUser,

    #[error("User {0} not found")]
    UserNotFound(i32),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Checks the submitted credentials against the first user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] for an empty field, [`AuthError::NoUser`]
    /// when the table is empty and [`AuthError::InvalidCredentials`] on mismatch.
    async fn login(&self, form: &LoginForm) -> Result<User, AuthError>;

    /// Resolves a session's user id. Never cached: a deleted row yields `None`.
    async fn current_user(&self, user_id: i32) -> Result<Option<User>, AuthError>;

    /// The account whose name is shown in the page header.
    async fn owner(&self) -> Result<Option<User>, AuthError>;

    /// Changes a user's display name.
    async fn update_name(&self, user_id: i32, form: &SettingsForm) -> Result<User, AuthError>;

    /// Sets the first user's login credentials, creating the user if needed.
    async fn provision_admin(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Provisioned, AuthError>;
}
