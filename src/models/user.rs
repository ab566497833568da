use serde::{Deserialize, Serialize};

use super::validation::{ValidationError, require_text};
use crate::constants::limits;
use crate::entities::users;

/// User record without the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            username: model.username,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Login form as submitted. Both fields must be present and non-empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginForm {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: Some(username.to_string()),
            password: Some(password.to_string()),
        }
    }

    /// Returns `(username, password)`.
    pub fn credentials(&self) -> Result<(&str, &str), ValidationError> {
        let username = require_text("username", self.username.as_deref(), usize::MAX)?;
        let password = require_text("password", self.password.as_deref(), usize::MAX)?;
        Ok((username, password))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsForm {
    pub name: Option<String>,
}

impl SettingsForm {
    pub fn new(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
        }
    }

    pub fn validate(&self) -> Result<&str, ValidationError> {
        require_text("name", self.name.as_deref(), limits::NAME_MAX_CHARS)
    }
}
