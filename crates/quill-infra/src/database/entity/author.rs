//! Author entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "authors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Author.
impl From<Model> for quill_core::domain::Author {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            created_at: model.created_at.into(),
        }
    }
}

/// Conversion from Domain Author to SeaORM ActiveModel.
impl From<quill_core::domain::Author> for ActiveModel {
    fn from(author: quill_core::domain::Author) -> Self {
        Self {
            id: Set(author.id),
            username: Set(author.username),
            first_name: Set(author.first_name),
            last_name: Set(author.last_name),
            email: Set(author.email),
            created_at: Set(author.created_at.into()),
        }
    }
}
