use askama::Template;
use axum::response::Html;

use super::auth::resolve_viewer;
use super::session::AuthSession;
use super::{AppError, AppState};
use crate::models::Movie;

/// Context shared by every page: header name, viewer state and the
/// notice left by the previous request.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub owner_name: Option<String>,
    pub authenticated: bool,
    pub notice: Option<String>,
}

impl Page {
    /// Resolves the viewer and consumes the pending notice.
    pub async fn build(state: &AppState, session: &AuthSession) -> Result<Self, AppError> {
        let viewer = resolve_viewer(state, session).await?;
        let owner = state.auth().owner().await?;
        let notice = session.take_notice().await?;

        Ok(Self {
            owner_name: owner.map(|u| u.name),
            authenticated: viewer.is_some(),
            notice,
        })
    }

    /// Context for pages rendered without a session, such as error pages.
    #[must_use]
    pub fn bare() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(&self) -> String {
        match &self.owner_name {
            Some(name) => format!("{name}'s Watchlist"),
            None => "Watchlist".to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub page: Page,
    pub movies: Vec<Movie>,
}

#[derive(Template)]
#[template(path = "edit.html")]
pub struct EditTemplate {
    pub page: Page,
    pub movie: Movie,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub page: Page,
}

#[derive(Template)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub page: Page,
    pub name: String,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub page: Page,
    pub status: u16,
    pub reason: &'static str,
    pub message: String,
}

pub fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    template
        .render()
        .map(Html)
        .map_err(|e| AppError::internal(format!("Template error: {e}")))
}
