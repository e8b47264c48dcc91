pub mod author_service;
pub mod book_service;
