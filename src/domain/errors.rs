//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level
//! failures. Every variant maps to a fixed, user-facing message via
//! `Display`; raw driver errors are carried for logging but never shown
//! to the user.

use std::fmt;

use crate::isbn::IsbnError;

#[derive(Debug)]
pub enum CatalogError {
    /// ISBN input normalized to the empty string
    IsbnEmpty,
    /// Normalized ISBN failed validation
    Isbn(IsbnError),
    MissingTitle,
    TitleTooLong,
    MissingName,
    NameTooLong,
    MissingAuthor,
    /// Date field did not parse as YYYY-MM-DD (carries the field name)
    InvalidDate(&'static str),
    DeathBeforeBirth,
    AuthorNotFound,
    BookNotFound,
    IsbnAlreadyExists,
    /// Database/persistence error (detail is logged, not displayed)
    Database(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::IsbnEmpty => write!(f, "ISBN contains no digits"),
            CatalogError::Isbn(e) => write!(f, "{}", e),
            CatalogError::MissingTitle => write!(f, "title is required"),
            CatalogError::TitleTooLong => write!(f, "title must be 60 characters or fewer"),
            CatalogError::MissingName => write!(f, "author name is required"),
            CatalogError::NameTooLong => write!(f, "author name must be 30 characters or fewer"),
            CatalogError::MissingAuthor => write!(f, "author is required"),
            CatalogError::InvalidDate(field) => {
                write!(f, "invalid {}: expected YYYY-MM-DD", field)
            }
            CatalogError::DeathBeforeBirth => {
                write!(f, "date of death cannot be before date of birth")
            }
            CatalogError::AuthorNotFound => write!(f, "author does not exist"),
            CatalogError::BookNotFound => write!(f, "book not found"),
            CatalogError::IsbnAlreadyExists => write!(f, "ISBN already exists"),
            CatalogError::Database(_) => write!(f, "a database error occurred"),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<IsbnError> for CatalogError {
    fn from(e: IsbnError) -> Self {
        CatalogError::Isbn(e)
    }
}

// Conversion from SeaORM errors (used in the service layer)
impl From<sea_orm::DbErr> for CatalogError {
    fn from(e: sea_orm::DbErr) -> Self {
        CatalogError::Database(e.to_string())
    }
}
