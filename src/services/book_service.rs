//! Book operations - pure business logic without the HTTP layer.
//!
//! Holds the two pieces of real logic in the catalog: the ISBN-validated
//! creation flow and the orphan-author cascade on deletion.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr,
};
use serde::Deserialize;

use crate::domain::CatalogError;
use crate::isbn;
use crate::models::Book;
use crate::models::book::{ActiveModel as BookActiveModel, Column, Entity as BookEntity};

const MAX_TITLE_LEN: usize = 60;

/// Form payload for creating a book.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBook {
    pub isbn: String,
    pub title: String,
    pub publication_year: Option<i32>,
    pub author_id: Option<i32>,
}

/// Filter parameters for listing books
#[derive(Debug, Default, Clone)]
pub struct BookFilter {
    pub sort_by: Option<String>,
    pub query: Option<String>,
    pub search_type: Option<String>,
}

/// Outcome of the author row after a book deletion.
#[derive(Debug, PartialEq)]
pub enum AuthorCleanup {
    /// Author still owns books and was kept.
    Kept,
    /// Author had no books left and was removed (carries the name).
    Removed(String),
    /// Cleanup after the committed book deletion failed (count, lookup, or
    /// the author delete itself). The book deletion stands. `name` is
    /// `None` when the failure happened before the author row was read.
    Failed {
        author_id: i32,
        name: Option<String>,
    },
}

/// Result of a completed book deletion.
#[derive(Debug)]
pub struct DeleteOutcome {
    pub title: String,
    pub author: AuthorCleanup,
}

/// List books with optional search and sort.
///
/// `search_type` and `sort_by` each accept `title` (default) or `author`.
/// Title search happens at the DB level; author search and sort work on the
/// joined author name in memory, since the name lives in another table.
pub async fn list_books(
    db: &DatabaseConnection,
    filter: BookFilter,
) -> Result<Vec<Book>, CatalogError> {
    tracing::debug!(
        "list books - sort_by={:?}, query={:?}, search_type={:?}",
        filter.sort_by,
        filter.query,
        filter.search_type
    );

    let query_text = filter.query.as_deref().unwrap_or("").trim().to_string();
    let search_author = filter.search_type.as_deref() == Some("author");

    let mut query = BookEntity::find();

    if !query_text.is_empty() && !search_author {
        query = query.filter(Column::Title.contains(&query_text));
    }

    let books = query.order_by_asc(Column::Title).all(db).await?;

    let mut book_dtos = Vec::with_capacity(books.len());
    for book_model in books {
        let author = book_model
            .find_related(crate::models::author::Entity)
            .one(db)
            .await?;
        let author_name = author.map(|a| a.name).unwrap_or_default();

        if search_author
            && !query_text.is_empty()
            && !author_name
                .to_lowercase()
                .contains(&query_text.to_lowercase())
        {
            continue;
        }

        let mut book_dto = Book::from(book_model);
        book_dto.author = Some(author_name);
        book_dtos.push(book_dto);
    }

    if filter.sort_by.as_deref() == Some("author") {
        book_dtos.sort_by(|a, b| {
            let a_name = a.author.as_deref().unwrap_or("").to_lowercase();
            let b_name = b.author.as_deref().unwrap_or("").to_lowercase();
            a_name.cmp(&b_name).then_with(|| a.title.cmp(&b.title))
        });
    }

    Ok(book_dtos)
}

/// Create a book after normalizing and validating its ISBN.
pub async fn create_book(db: &DatabaseConnection, input: NewBook) -> Result<Book, CatalogError> {
    let isbn = isbn::normalize(&input.isbn);
    if isbn.is_empty() {
        return Err(CatalogError::IsbnEmpty);
    }

    let title = input.title.trim();
    if title.is_empty() {
        return Err(CatalogError::MissingTitle);
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CatalogError::TitleTooLong);
    }

    let author_id = input.author_id.ok_or(CatalogError::MissingAuthor)?;

    isbn::validate(&isbn)?;

    let author = crate::models::author::Entity::find_by_id(author_id)
        .one(db)
        .await?
        .ok_or(CatalogError::AuthorNotFound)?;

    let now = chrono::Utc::now().to_rfc3339();
    let new_book = BookActiveModel {
        isbn: Set(isbn),
        title: Set(title.to_string()),
        publication_year: Set(input.publication_year),
        author_id: Set(author.id),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_book.insert(db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => CatalogError::IsbnAlreadyExists,
        _ => CatalogError::from(e),
    })?;

    tracing::info!(book_id = model.id, isbn = %model.isbn, "book created");

    let mut book_dto = Book::from(model);
    book_dto.author = Some(author.name);
    Ok(book_dto)
}

/// Delete a book, removing its author too if no books remain.
///
/// The author check runs after the book deletion has committed, so a
/// concurrent insert for the same author can race the removal. Accepted
/// trade-off of the request-per-transaction model.
pub async fn delete_book(db: &DatabaseConnection, id: i32) -> Result<DeleteOutcome, CatalogError> {
    let book = BookEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(CatalogError::BookNotFound)?;

    // Capture before the delete; the row is gone afterwards.
    let author_id = book.author_id;
    let title = book.title.clone();

    book.delete(db).await?;
    tracing::info!(book_id = id, "book deleted");

    // From here on the book deletion is committed; failures degrade to a
    // reported cleanup problem instead of masking the delete.
    let remaining = match BookEntity::find()
        .filter(Column::AuthorId.eq(author_id))
        .count(db)
        .await
    {
        Ok(n) => n,
        Err(e) => {
            tracing::error!(author_id, "book count after delete failed: {e}");
            return Ok(DeleteOutcome {
                title,
                author: AuthorCleanup::Failed {
                    author_id,
                    name: None,
                },
            });
        }
    };

    if remaining > 0 {
        return Ok(DeleteOutcome {
            title,
            author: AuthorCleanup::Kept,
        });
    }

    let author = match crate::models::author::Entity::find_by_id(author_id)
        .one(db)
        .await
    {
        Ok(Some(author)) => author,
        Ok(None) => {
            // Already gone; nothing to clean up.
            return Ok(DeleteOutcome {
                title,
                author: AuthorCleanup::Kept,
            });
        }
        Err(e) => {
            tracing::error!(author_id, "author lookup after book delete failed: {e}");
            return Ok(DeleteOutcome {
                title,
                author: AuthorCleanup::Failed {
                    author_id,
                    name: None,
                },
            });
        }
    };

    let name = author.name.clone();
    match author.delete(db).await {
        Ok(_) => {
            tracing::info!(author_id, name = %name, "orphaned author removed");
            Ok(DeleteOutcome {
                title,
                author: AuthorCleanup::Removed(name),
            })
        }
        Err(e) => {
            tracing::error!(author_id, "orphaned author removal failed: {e}");
            Ok(DeleteOutcome {
                title,
                author: AuthorCleanup::Failed {
                    author_id,
                    name: Some(name),
                },
            })
        }
    }
}
