use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use tokio::task;

use crate::config::SecurityConfig;
use crate::constants::bootstrap;
use crate::entities::users;
use crate::models::User;

/// Whether `upsert_admin` touched an existing row or had to create one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioned {
    Updated,
    Created,
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    async fn first_model(&self) -> Result<Option<users::Model>> {
        users::Entity::find()
            .order_by_asc(users::Column::Id)
            .one(&self.conn)
            .await
            .context("Failed to query first user")
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> Result<Option<User>> {
        let user = users::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        Ok(user.map(User::from))
    }

    /// The application is single-tenant: "the" user is always the lowest id.
    pub async fn first(&self) -> Result<Option<User>> {
        Ok(self.first_model().await?.map(User::from))
    }

    /// Checks `username` and `password` against the first user.
    /// Returns the user only when both match.
    /// Note: This uses `spawn_blocking` because Argon2 hashing is CPU-intensive
    /// and would block the async runtime if run directly.
    pub async fn verify_first_user(&self, username: &str, password: &str) -> Result<Option<User>> {
        let Some(user) = self.first_model().await? else {
            return Ok(None);
        };

        if user.username != username {
            return Ok(None);
        }

        let password_hash = user.password_hash.clone();
        let password = password.to_string();

        let is_valid = task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&password_hash)
                .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

            Ok::<bool, anyhow::Error>(
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok(),
            )
        })
        .await
        .context("Password verification task panicked")??;

        Ok(is_valid.then(|| User::from(user)))
    }

    /// Sets the display name. Returns `None` when the user no longer exists.
    pub async fn update_name(&self, id: i32, name: &str) -> Result<Option<User>> {
        let Some(user) = users::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user for name update")?
        else {
            return Ok(None);
        };

        let mut active: users::ActiveModel = user.into();
        active.name = Set(name.to_string());
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());
        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update user name")?;

        Ok(Some(User::from(updated)))
    }

    /// Rewrites the first user's credentials, creating an `Admin` user when
    /// the table is empty.
    pub async fn upsert_admin(
        &self,
        username: &str,
        password: &str,
        config: &SecurityConfig,
    ) -> Result<Provisioned> {
        let password = password.to_string();
        let config = config.clone();
        let password_hash = task::spawn_blocking(move || hash_password(&password, Some(&config)))
            .await
            .context("Password hashing task panicked")??;

        let now = chrono::Utc::now().to_rfc3339();

        if let Some(user) = self.first_model().await? {
            let mut active: users::ActiveModel = user.into();
            active.username = Set(username.to_string());
            active.password_hash = Set(password_hash);
            active.updated_at = Set(now);
            active
                .update(&self.conn)
                .await
                .context("Failed to update admin credentials")?;
            return Ok(Provisioned::Updated);
        }

        let active = users::ActiveModel {
            name: Set(bootstrap::NAME.to_string()),
            username: Set(username.to_string()),
            password_hash: Set(password_hash),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };
        active
            .insert(&self.conn)
            .await
            .context("Failed to create admin user")?;

        Ok(Provisioned::Created)
    }
}

/// Hash a password using Argon2id with optional custom params.
/// If config is None, uses the crate's default params.
pub fn hash_password(password: &str, config: Option<&SecurityConfig>) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let argon2 = if let Some(cfg) = config {
        let params = Params::new(
            cfg.argon2_memory_cost_kib,
            cfg.argon2_time_cost,
            cfg.argon2_parallelism,
            None,
        )
        .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    } else {
        Argon2::default()
    };

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_produces_verifiable_phc_string() {
        let config = SecurityConfig::default();
        let hash = hash_password("hunter2", Some(&config)).unwrap();
        assert!(hash.starts_with("$argon2id$"));

        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"hunter2", &parsed)
                .is_ok()
        );
        assert!(Argon2::default().verify_password(b"wrong", &parsed).is_err());
    }

    #[test]
    fn test_hash_password_salts_each_call() {
        let a = hash_password("same", None).unwrap();
        let b = hash_password("same", None).unwrap();
        assert_ne!(a, b);
    }
}
