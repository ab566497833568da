use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait, QueryOrder, Set,
};
use tracing::info;

use crate::entities::movies;
use crate::models::{Movie, MovieInput};

/// Repository for movie rows
pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// All movies in insertion order.
    pub async fn list_all(&self) -> Result<Vec<Movie>> {
        let rows = movies::Entity::find()
            .order_by_asc(movies::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list movies")?;

        Ok(rows.into_iter().map(Movie::from).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<Movie>> {
        let row = movies::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query movie by ID")?;

        Ok(row.map(Movie::from))
    }

    pub async fn count(&self) -> Result<u64> {
        movies::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count movies")
    }

    pub async fn create(&self, input: &MovieInput) -> Result<Movie> {
        let active = movies::ActiveModel {
            title: Set(input.title.clone()),
            year: Set(input.year.clone()),
            is_read: Set(input.is_read),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert movie")?;

        info!("Added movie {}: {} ({})", model.id, model.title, model.year);
        Ok(Movie::from(model))
    }

    pub async fn create_many(&self, inputs: &[MovieInput]) -> Result<u64> {
        if inputs.is_empty() {
            return Ok(0);
        }

        let models = inputs.iter().map(|input| movies::ActiveModel {
            title: Set(input.title.clone()),
            year: Set(input.year.clone()),
            is_read: Set(input.is_read),
            ..Default::default()
        });

        movies::Entity::insert_many(models)
            .exec(&self.conn)
            .await
            .context("Failed to insert movies")?;

        Ok(inputs.len() as u64)
    }

    /// Overwrites every field. Returns `None` if the row does not exist.
    pub async fn update(&self, id: i32, input: &MovieInput) -> Result<Option<Movie>> {
        let Some(row) = movies::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query movie for update")?
        else {
            return Ok(None);
        };

        let mut active: movies::ActiveModel = row.into();
        active.title = Set(input.title.clone());
        active.year = Set(input.year.clone());
        active.is_read = Set(input.is_read);

        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update movie")?;

        info!("Updated movie {}", model.id);
        Ok(Some(Movie::from(model)))
    }

    /// Returns `false` if the row did not exist.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let Some(row) = movies::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query movie for delete")?
        else {
            return Ok(false);
        };

        row.delete(&self.conn)
            .await
            .context("Failed to delete movie")?;

        info!("Deleted movie {id}");
        Ok(true)
    }
}
