use crate::constants::bootstrap;
use crate::db::repositories::user::hash_password;
use crate::entities::{movies, prelude::*, users};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Users)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Movies)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Seed the single admin account so a fresh database can log in
        let now = chrono::Utc::now().to_rfc3339();
        let password_hash = hash_password(bootstrap::PASSWORD, None)
            .map_err(|e| DbErr::Custom(format!("Failed to hash bootstrap password: {e}")))?;

        let insert = sea_orm_migration::sea_query::Query::insert()
            .into_table(Users)
            .columns([
                users::Column::Name,
                users::Column::Username,
                users::Column::PasswordHash,
                users::Column::CreatedAt,
                users::Column::UpdatedAt,
            ])
            .values_panic([
                bootstrap::NAME.into(),
                bootstrap::USERNAME.into(),
                password_hash.into(),
                now.clone().into(),
                now.into(),
            ])
            .to_owned();

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(movies::Entity).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(users::Entity).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
