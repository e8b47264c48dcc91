use axum::{
    Form, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::services::book_service::{self, AuthorCleanup, BookFilter, NewBook};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub sort_by: Option<String>,
    pub query: Option<String>,
    pub search_type: Option<String>,
}

pub async fn list_books(
    State(db): State<Arc<DatabaseConnection>>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    let filter = BookFilter {
        sort_by: params.sort_by,
        query: params.query,
        search_type: params.search_type,
    };

    match book_service::list_books(&db, filter).await {
        Ok(books) => {
            let total = books.len();
            (
                StatusCode::OK,
                Json(json!({
                    "books": books,
                    "total": total,
                })),
            )
                .into_response()
        }
        Err(e) => super::error_response(e),
    }
}

pub async fn create_book(
    State(db): State<Arc<DatabaseConnection>>,
    Form(payload): Form<NewBook>,
) -> impl IntoResponse {
    match book_service::create_book(&db, payload).await {
        Ok(book) => (
            StatusCode::CREATED,
            Json(json!({
                "category": "success",
                "message": format!("Book '{}' added successfully", book.title),
                "book": book,
            })),
        )
            .into_response(),
        Err(e) => super::error_response(e),
    }
}

/// Delete a book. When the author ends up with no books the response carries
/// two notifications: one for the book, one for the author removal.
pub async fn delete_book(
    State(db): State<Arc<DatabaseConnection>>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match book_service::delete_book(&db, id).await {
        Ok(outcome) => {
            let mut notifications = vec![json!({
                "category": "success",
                "message": format!("Book '{}' deleted successfully", outcome.title),
            })];

            match outcome.author {
                AuthorCleanup::Kept => {}
                AuthorCleanup::Removed(name) => notifications.push(json!({
                    "category": "success",
                    "message": format!("Author '{}' had no more books and was removed", name),
                })),
                AuthorCleanup::Failed { author_id, name } => {
                    let label = name.unwrap_or_else(|| format!("#{author_id}"));
                    notifications.push(json!({
                        "category": "error",
                        "message": format!("Book deleted, but removing author '{}' failed", label),
                    }));
                }
            }

            (
                StatusCode::OK,
                Json(json!({ "notifications": notifications })),
            )
                .into_response()
        }
        Err(e) => super::error_response(e),
    }
}
