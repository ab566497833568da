use axum::{
    Extension, Form,
    extract::{Request, State},
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::{info, warn};

use super::session::{AuthSession, SessionState};
use super::views::{LoginTemplate, Page, render};
use super::{AppError, AppState};
use crate::constants::notices;
use crate::models::{LoginForm, User};
use crate::services::AuthError;

/// The authenticated user, inserted into request extensions by
/// [`require_login`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// State for [`require_login`]: where anonymous requests are sent.
#[derive(Clone)]
pub struct Guard {
    pub state: Arc<AppState>,
    pub on_anonymous: &'static str,
}

impl Guard {
    #[must_use]
    pub const fn new(state: Arc<AppState>, on_anonymous: &'static str) -> Self {
        Self {
            state,
            on_anonymous,
        }
    }

    #[must_use]
    pub const fn to_login(state: Arc<AppState>) -> Self {
        Self::new(state, "/login")
    }
}

// ============================================================================
// Middleware
// ============================================================================

/// Resolves the session's user id on every request. A bound id whose row
/// has disappeared logs the session out and counts as anonymous.
pub async fn resolve_viewer(
    state: &AppState,
    session: &AuthSession,
) -> Result<Option<User>, AppError> {
    let SessionState::Authenticated(user_id) = session.state().await? else {
        return Ok(None);
    };

    if let Some(user) = state.auth().current_user(user_id).await? {
        return Ok(Some(user));
    }

    warn!("Session bound to missing user {user_id}, logging out");
    session.clear().await?;
    Ok(None)
}

/// Runs the handler only for an authenticated viewer; everyone else is
/// redirected to the guard's target without a notice.
pub async fn require_login(
    State(guard): State<Guard>,
    session: AuthSession,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(user) = resolve_viewer(&guard.state, &session).await? else {
        return Ok(Redirect::to(guard.on_anonymous).into_response());
    };

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /login
pub async fn login_page(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
) -> Result<Html<String>, AppError> {
    let page = Page::build(&state, &session).await?;
    render(&LoginTemplate { page })
}

/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, AppError> {
    match state.auth().login(&form).await {
        Ok(user) => {
            session.bind(user.id).await?;
            session.push_notice(notices::LOGIN_SUCCESS).await?;
            info!("User {} logged in", user.username);
            Ok(Redirect::to("/"))
        }
        Err(AuthError::Validation(e)) => {
            info!("Rejected login form: {e}");
            session.push_notice(notices::INVALID_INPUT).await?;
            Ok(Redirect::to("/login"))
        }
        Err(e @ (AuthError::InvalidCredentials | AuthError::NoUser)) => {
            warn!("Login failed: {e}");
            session.push_notice(notices::INVALID_CREDENTIALS).await?;
            Ok(Redirect::to("/login"))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /logout
pub async fn logout(
    session: AuthSession,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Redirect, AppError> {
    session.clear().await?;
    session.push_notice(notices::GOODBYE).await?;
    info!("User {} logged out", user.username);
    Ok(Redirect::to("/"))
}
