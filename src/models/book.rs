use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Canonical ISBN: digits and `X` only, 10 or 13 characters, unique.
    pub isbn: String,
    pub title: String,
    pub publication_year: Option<i32>,
    pub author_id: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::author::Entity",
        from = "Column::AuthorId",
        to = "super::author::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Author,
}

impl Related<super::author::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// DTO for API responses
#[derive(Debug, Serialize, Deserialize)]
pub struct Book {
    pub id: i32,
    pub isbn: String,
    pub title: String,
    pub publication_year: Option<i32>,
    pub author_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

impl From<Model> for Book {
    fn from(model: Model) -> Self {
        let cover_url = format!(
            "https://covers.openlibrary.org/b/isbn/{}-M.jpg",
            model.isbn
        );

        Self {
            id: model.id,
            isbn: model.isbn,
            title: model.title,
            publication_year: model.publication_year,
            author_id: model.author_id,
            author: None,
            cover_url: Some(cover_url),
        }
    }
}
