use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Display name shown in the page header
    #[sea_orm(column_type = "String(StringLen::N(20))")]
    pub name: String,

    /// Login name. Not unique: only the first row is ever consulted.
    #[sea_orm(column_type = "String(StringLen::N(20))")]
    pub username: String,

    /// Argon2id password hash
    #[sea_orm(column_type = "String(StringLen::N(128))")]
    pub password_hash: String,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
