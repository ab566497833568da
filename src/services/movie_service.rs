//! Domain service for the movie list.
//!
//! Every write validates the submitted form before touching the store.

use thiserror::Error;

use crate::models::{Movie, MovieForm, ValidationError};

#[derive(Debug, Error)]
pub enum MovieError {
    #[error("Movie {0} not found")]
    NotFound(i32),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for MovieError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

#[async_trait::async_trait]
pub trait MovieService: Send + Sync {
    /// All movies in insertion order.
    async fn list(&self) -> Result<Vec<Movie>, MovieError>;

    async fn get(&self, id: i32) -> Result<Movie, MovieError>;

    async fn create(&self, form: &MovieForm) -> Result<Movie, MovieError>;

    /// Replaces every field of an existing movie.
    ///
    /// # Errors
    ///
    /// A missing id is reported as [`MovieError::NotFound`] before the form
    /// is looked at.
    async fn update(&self, id: i32, form: &MovieForm) -> Result<Movie, MovieError>;

    async fn delete(&self, id: i32) -> Result<(), MovieError>;
}
