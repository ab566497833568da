//! `SeaORM` implementation of the `AuthService` trait.

use crate::config::SecurityConfig;
use crate::constants::limits;
use crate::db::{Provisioned, Store};
use crate::models::validation::require_text;
use crate::models::{LoginForm, SettingsForm, User};
use crate::services::auth_service::{AuthError, AuthService};
use async_trait::async_trait;

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn login(&self, form: &LoginForm) -> Result<User, AuthError> {
        let (username, password) = form.credentials()?;

        if self.store.get_first_user().await?.is_none() {
            return Err(AuthError::NoUser);
        }

        self.store
            .verify_first_user(username, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)
    }

    async fn current_user(&self, user_id: i32) -> Result<Option<User>, AuthError> {
        Ok(self.store.get_user_by_id(user_id).await?)
    }

    async fn owner(&self) -> Result<Option<User>, AuthError> {
        Ok(self.store.get_first_user().await?)
    }

    async fn update_name(&self, user_id: i32, form: &SettingsForm) -> Result<User, AuthError> {
        let name = form.validate()?;

        self.store
            .update_user_name(user_id, name)
            .await?
            .ok_or(AuthError::UserNotFound(user_id))
    }

    async fn provision_admin(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Provisioned, AuthError> {
        require_text("username", Some(username), limits::NAME_MAX_CHARS)?;
        require_text("password", Some(password), usize::MAX)?;

        Ok(self
            .store
            .upsert_admin_credentials(username, password, &self.security)
            .await?)
    }
}
