pub mod authors;
pub mod books;
pub mod health;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use serde_json::json;
use std::sync::Arc;

use crate::domain::CatalogError;

pub fn router(db: DatabaseConnection) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/", get(books::list_books))
        .route(
            "/add_author",
            get(authors::list_authors).post(authors::create_author),
        )
        .route(
            "/add_book",
            get(authors::list_authors).post(books::create_book),
        )
        .route("/book/:id/delete", post(books::delete_book))
        .with_state(Arc::new(db))
}

fn error_status(err: &CatalogError) -> StatusCode {
    match err {
        CatalogError::AuthorNotFound | CatalogError::BookNotFound => StatusCode::NOT_FOUND,
        CatalogError::IsbnAlreadyExists => StatusCode::CONFLICT,
        CatalogError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    }
}

/// Turn a catalog error into the notification payload the UI shows.
/// Driver details stay in the log; the user only sees the mapped message.
pub(crate) fn error_response(err: CatalogError) -> Response {
    if let CatalogError::Database(detail) = &err {
        tracing::error!("database error: {detail}");
    }

    (
        error_status(&err),
        Json(json!({
            "category": "error",
            "message": err.to_string(),
        })),
    )
        .into_response()
}
