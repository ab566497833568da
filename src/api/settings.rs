use axum::{
    Extension, Form,
    extract::State,
    response::{Html, Redirect},
};
use std::sync::Arc;
use tracing::{info, warn};

use super::auth::CurrentUser;
use super::session::AuthSession;
use super::views::{Page, SettingsTemplate, render};
use super::{AppError, AppState};
use crate::constants::notices;
use crate::models::SettingsForm;
use crate::services::AuthError;

/// GET /settings
pub async fn settings_page(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Html<String>, AppError> {
    let page = Page::build(&state, &session).await?;
    render(&SettingsTemplate {
        page,
        name: user.name,
    })
}

/// POST /settings
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Form(form): Form<SettingsForm>,
) -> Result<Redirect, AppError> {
    match state.auth().update_name(user.id, &form).await {
        Ok(updated) => {
            info!("User {} renamed to {}", updated.id, updated.name);
            session.push_notice(notices::SETTINGS_UPDATED).await?;
            Ok(Redirect::to("/"))
        }
        Err(AuthError::Validation(e)) => {
            info!("Rejected settings form: {e}");
            session.push_notice(notices::INVALID_INPUT).await?;
            Ok(Redirect::to("/settings"))
        }
        Err(AuthError::UserNotFound(id)) => {
            warn!("User {id} disappeared during settings update, logging out");
            session.clear().await?;
            Ok(Redirect::to("/login"))
        }
        Err(e) => Err(e.into()),
    }
}
