use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
use tracing::warn;

use crate::config::Config;
use crate::services::{AuthService, MovieService};
use crate::state::SharedState;

pub mod auth;
mod error;
mod movies;
pub mod session;
mod settings;
pub mod views;

pub use error::AppError;

use auth::{Guard, require_login};

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    /// Signs the session cookie.
    pub session_key: Key,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn auth(&self) -> &Arc<dyn AuthService> {
        &self.shared.auth_service
    }

    #[must_use]
    pub fn movies(&self) -> &Arc<dyn MovieService> {
        &self.shared.movie_service
    }
}

pub fn create_app_state(shared: Arc<SharedState>) -> anyhow::Result<Arc<AppState>> {
    let secret = shared.config.server.session_secret.as_bytes();

    let session_key = if secret.is_empty() {
        warn!("No session secret configured, sessions will not survive a restart");
        Key::generate()
    } else {
        Key::try_from(secret).map_err(|e| anyhow::anyhow!("Invalid session secret: {e}"))?
    };

    Ok(Arc::new(AppState {
        shared,
        session_key,
    }))
}

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    create_app_state(shared)
}

pub fn router(state: Arc<AppState>) -> Router {
    let server = &state.config().server;

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(server.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            server.session_expiry_minutes,
        )))
        .with_signed(state.session_key.clone());

    // Anonymous posts to the index bounce back to the index itself.
    let index = get(movies::index).merge(post(movies::create_movie).route_layer(
        middleware::from_fn_with_state(Guard::new(state.clone(), "/"), require_login),
    ));

    Router::new()
        .route("/", index)
        .merge(create_protected_router(state.clone()))
        .route("/login", get(auth::login_page).post(auth::login))
        .fallback(not_found)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/movie/edit/{id}",
            get(movies::edit_page).post(movies::update_movie),
        )
        .route("/movie/delete/{id}", post(movies::delete_movie))
        .route(
            "/settings",
            get(settings::settings_page).post(settings::update_settings),
        )
        .route("/logout", get(auth::logout))
        .route_layer(middleware::from_fn_with_state(
            Guard::to_login(state),
            require_login,
        ))
}

async fn not_found() -> AppError {
    AppError::NotFound("Page not found".to_string())
}
