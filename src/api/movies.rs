use axum::{
    Form,
    extract::{Path, State},
    response::{Html, Redirect},
};
use std::sync::Arc;
use tracing::info;

use super::session::AuthSession;
use super::views::{EditTemplate, IndexTemplate, Page, render};
use super::{AppError, AppState};
use crate::constants::notices;
use crate::models::MovieForm;
use crate::services::MovieError;

/// GET /
pub async fn index(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
) -> Result<Html<String>, AppError> {
    let page = Page::build(&state, &session).await?;
    let movies = state.movies().list().await?;
    render(&IndexTemplate { page, movies })
}

/// POST /
pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    Form(form): Form<MovieForm>,
) -> Result<Redirect, AppError> {
    match state.movies().create(&form).await {
        Ok(movie) => {
            info!("Created movie {} ({})", movie.id, movie.title);
            session.push_notice(notices::ITEM_CREATED).await?;
        }
        Err(MovieError::Validation(e)) => {
            info!("Rejected new movie: {e}");
            session.push_notice(notices::INVALID_INPUT).await?;
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Redirect::to("/"))
}

/// GET /movie/edit/{id}
pub async fn edit_page(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    Path(id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let movie = state.movies().get(id).await?;
    let page = Page::build(&state, &session).await?;
    render(&EditTemplate { page, movie })
}

/// POST /movie/edit/{id}
///
/// Invalid input goes back to the index, not to the edit form.
pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    Path(id): Path<i32>,
    Form(form): Form<MovieForm>,
) -> Result<Redirect, AppError> {
    match state.movies().update(id, &form).await {
        Ok(movie) => {
            info!("Updated movie {} ({})", movie.id, movie.title);
            session.push_notice(notices::ITEM_UPDATED).await?;
        }
        Err(MovieError::Validation(e)) => {
            info!("Rejected edit of movie {id}: {e}");
            session.push_notice(notices::INVALID_INPUT).await?;
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Redirect::to("/"))
}

/// POST /movie/delete/{id}
pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    Path(id): Path<i32>,
) -> Result<Redirect, AppError> {
    state.movies().delete(id).await?;
    info!("Deleted movie {id}");
    session.push_notice(notices::ITEM_DELETED).await?;
    Ok(Redirect::to("/"))
}
