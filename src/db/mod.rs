use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;
use crate::models::{Movie, MovieInput, User};

pub mod migrator;
pub mod repositories;

pub use repositories::user::Provisioned;

#[cfg(test)]
pub mod test_support {
    use super::Store;
    use tempfile::TempDir;

    /// A store backed by a file inside a fresh temporary directory. The
    /// directory, and the database with it, is removed when `TempDir` drops.
    pub async fn temp_store() -> (Store, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watchlist.db");
        let store = Store::new(&format!("sqlite:{}", path.display()))
            .await
            .unwrap();
        (store, dir)
    }
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    /// Drops every table and re-runs all migrations, re-seeding the admin user.
    pub async fn reset_schema(&self) -> Result<()> {
        use sea_orm_migration::MigratorTrait;

        migrator::Migrator::fresh(&self.conn).await?;
        info!("Database schema dropped and recreated");
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn movie_repo(&self) -> repositories::movie::MovieRepository {
        repositories::movie::MovieRepository::new(self.conn.clone())
    }

    // ------------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------------

    pub async fn get_user_by_id(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_first_user(&self) -> Result<Option<User>> {
        self.user_repo().first().await
    }

    pub async fn verify_first_user(&self, username: &str, password: &str) -> Result<Option<User>> {
        self.user_repo().verify_first_user(username, password).await
    }

    pub async fn update_user_name(&self, id: i32, name: &str) -> Result<Option<User>> {
        self.user_repo().update_name(id, name).await
    }

    pub async fn upsert_admin_credentials(
        &self,
        username: &str,
        password: &str,
        config: &SecurityConfig,
    ) -> Result<Provisioned> {
        self.user_repo()
            .upsert_admin(username, password, config)
            .await
    }

    // ------------------------------------------------------------------------
    // Movies
    // ------------------------------------------------------------------------

    pub async fn list_movies(&self) -> Result<Vec<Movie>> {
        self.movie_repo().list_all().await
    }

    pub async fn get_movie(&self, id: i32) -> Result<Option<Movie>> {
        self.movie_repo().get(id).await
    }

    pub async fn count_movies(&self) -> Result<u64> {
        self.movie_repo().count().await
    }

    pub async fn create_movie(&self, input: &MovieInput) -> Result<Movie> {
        self.movie_repo().create(input).await
    }

    pub async fn create_movies(&self, inputs: &[MovieInput]) -> Result<u64> {
        self.movie_repo().create_many(inputs).await
    }

    pub async fn update_movie(&self, id: i32, input: &MovieInput) -> Result<Option<Movie>> {
        self.movie_repo().update(id, input).await
    }

    pub async fn delete_movie(&self, id: i32) -> Result<bool> {
        self.movie_repo().delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::test_support::temp_store;
    use crate::constants::bootstrap;

    fn input(title: &str, year: &str, is_read: bool) -> MovieInput {
        MovieInput {
            title: title.to_string(),
            year: year.to_string(),
            is_read,
        }
    }

    #[tokio::test]
    async fn test_fresh_store_seeds_admin() {
        let (store, _dir) = temp_store().await;
        store.ping().await.unwrap();

        let user = store.get_first_user().await.unwrap().unwrap();
        assert_eq!(user.username, bootstrap::USERNAME);
        assert_eq!(user.name, bootstrap::NAME);

        let verified = store
            .verify_first_user(bootstrap::USERNAME, bootstrap::PASSWORD)
            .await
            .unwrap();
        assert_eq!(verified.map(|u| u.id), Some(user.id));

        assert!(
            store
                .verify_first_user(bootstrap::USERNAME, "nope")
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            store
                .verify_first_user("someone", bootstrap::PASSWORD)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_movies_keep_insertion_order() {
        let (store, _dir) = temp_store().await;

        store.create_movie(&input("Leon", "1994", false)).await.unwrap();
        store
            .create_movie(&input("My Neighbor Totoro", "1988", true))
            .await
            .unwrap();
        store.create_movie(&input("WALL-E", "2008", false)).await.unwrap();

        let titles: Vec<String> = store
            .list_movies()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(titles, ["Leon", "My Neighbor Totoro", "WALL-E"]);
        assert_eq!(store.count_movies().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_update_and_delete_movie() {
        let (store, _dir) = temp_store().await;
        let movie = store.create_movie(&input("Leon", "1994", false)).await.unwrap();

        let updated = store
            .update_movie(movie.id, &input("Léon", "1994", true))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Léon");
        assert!(updated.is_read);

        assert!(store.delete_movie(movie.id).await.unwrap());
        assert!(store.get_movie(movie.id).await.unwrap().is_none());
        assert!(!store.delete_movie(movie.id).await.unwrap());
        assert!(
            store
                .update_movie(movie.id, &input("Leon", "1994", false))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_upsert_admin_rewrites_first_user() {
        let (store, _dir) = temp_store().await;
        let config = SecurityConfig::default();

        let outcome = store
            .upsert_admin_credentials("grey", "s3cret", &config)
            .await
            .unwrap();
        assert_eq!(outcome, Provisioned::Updated);

        assert!(
            store
                .verify_first_user("grey", "s3cret")
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            store
                .verify_first_user(bootstrap::USERNAME, bootstrap::PASSWORD)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_reset_schema_drops_movies() {
        let (store, _dir) = temp_store().await;
        store.create_movie(&input("Leon", "1994", false)).await.unwrap();

        store.reset_schema().await.unwrap();

        assert_eq!(store.count_movies().await.unwrap(), 0);
        assert!(store.get_first_user().await.unwrap().is_some());
    }
}
