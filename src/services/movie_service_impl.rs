//! `SeaORM` implementation of the `MovieService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::db::Store;
use crate::models::{Movie, MovieForm};
use crate::services::movie_service::{MovieError, MovieService};

pub struct SeaOrmMovieService {
    store: Store,
}

impl SeaOrmMovieService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MovieService for SeaOrmMovieService {
    async fn list(&self) -> Result<Vec<Movie>, MovieError> {
        Ok(self.store.list_movies().await?)
    }

    async fn get(&self, id: i32) -> Result<Movie, MovieError> {
        self.store
            .get_movie(id)
            .await?
            .ok_or(MovieError::NotFound(id))
    }

    async fn create(&self, form: &MovieForm) -> Result<Movie, MovieError> {
        let input = form.validate()?;
        Ok(self.store.create_movie(&input).await?)
    }

    async fn update(&self, id: i32, form: &MovieForm) -> Result<Movie, MovieError> {
        if self.store.get_movie(id).await?.is_none() {
            return Err(MovieError::NotFound(id));
        }

        let input = form.validate()?;

        self.store
            .update_movie(id, &input)
            .await?
            .ok_or(MovieError::NotFound(id))
    }

    async fn delete(&self, id: i32) -> Result<(), MovieError> {
        if self.store.delete_movie(id).await? {
            Ok(())
        } else {
            info!("Delete requested for missing movie {id}");
            Err(MovieError::NotFound(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::temp_store;
    use tempfile::TempDir;

    async fn service() -> (SeaOrmMovieService, TempDir) {
        let (store, dir) = temp_store().await;
        (SeaOrmMovieService::new(store), dir)
    }

    #[tokio::test]
    async fn test_create_stores_exact_fields() {
        let (service, _dir) = service().await;

        let movie = service
            .create(&MovieForm::new("Inception", "2010", "true"))
            .await
            .unwrap();

        let stored = service.get(movie.id).await.unwrap();
        assert_eq!(stored.title, "Inception");
        assert_eq!(stored.year, "2010");
        assert!(stored.is_read);
    }

    #[tokio::test]
    async fn test_invalid_create_leaves_list_unchanged() {
        let (service, _dir) = service().await;

        for form in [
            MovieForm::new("", "2010", "true"),
            MovieForm::new("Inception", "20100", "true"),
            MovieForm::new("Inception", "2010", "maybe"),
        ] {
            let err = service.create(&form).await.unwrap_err();
            assert!(matches!(err, MovieError::Validation(_)), "{form:?}");
        }

        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_repeated_update_is_idempotent() {
        let (service, _dir) = service().await;
        let movie = service
            .create(&MovieForm::new("Leon", "1994", "false"))
            .await
            .unwrap();

        let form = MovieForm::new("Léon", "1994", "yes");
        let once = service.update(movie.id, &form).await.unwrap();
        let twice = service.update(movie.id, &form).await.unwrap();
        let thrice = service.update(movie.id, &form).await.unwrap();

        assert_eq!(once, twice);
        assert_eq!(twice, thrice);
        assert_eq!(service.list().await.unwrap(), vec![once]);
    }

    #[tokio::test]
    async fn test_update_missing_movie_is_not_found_even_with_bad_form() {
        let (service, _dir) = service().await;

        let err = service
            .update(42, &MovieForm::new("", "", "maybe"))
            .await
            .unwrap_err();
        assert!(matches!(err, MovieError::NotFound(42)));
    }

    #[tokio::test]
    async fn test_delete_is_irreversible() {
        let (service, _dir) = service().await;
        let movie = service
            .create(&MovieForm::new("WALL-E", "2008", "0"))
            .await
            .unwrap();

        service.delete(movie.id).await.unwrap();

        assert!(matches!(
            service.get(movie.id).await,
            Err(MovieError::NotFound(_))
        ));
        assert!(matches!(
            service.delete(movie.id).await,
            Err(MovieError::NotFound(_))
        ));
    }
}
