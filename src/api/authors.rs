use axum::{
    Form, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde_json::json;
use std::sync::Arc;

use crate::services::author_service::{self, NewAuthor};

/// GET handler backing both form pages: returns the author list a client
/// needs to render the add-book dropdown.
pub async fn list_authors(State(db): State<Arc<DatabaseConnection>>) -> impl IntoResponse {
    match author_service::list_authors(&db).await {
        Ok(authors) => {
            let total = authors.len();
            (
                StatusCode::OK,
                Json(json!({
                    "authors": authors,
                    "total": total,
                })),
            )
                .into_response()
        }
        Err(e) => super::error_response(e),
    }
}

pub async fn create_author(
    State(db): State<Arc<DatabaseConnection>>,
    Form(payload): Form<NewAuthor>,
) -> impl IntoResponse {
    match author_service::create_author(&db, payload).await {
        Ok(author) => (
            StatusCode::CREATED,
            Json(json!({
                "category": "success",
                "message": format!("Author '{}' added successfully", author.name),
                "author": author,
            })),
        )
            .into_response(),
        Err(e) => super::error_response(e),
    }
}
