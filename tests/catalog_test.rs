use librarium::db;
use librarium::domain::CatalogError;
use librarium::isbn::IsbnError;
use librarium::services::author_service::{self, NewAuthor};
use librarium::services::book_service::{self, AuthorCleanup, BookFilter, NewBook};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

// Helper to create a test database
async fn setup_test_db() -> DatabaseConnection {
    // In-memory SQLite for testing
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

// Helper to create a test author
async fn create_test_author(db: &DatabaseConnection, name: &str) -> i32 {
    let author = author_service::create_author(
        db,
        NewAuthor {
            name: name.to_string(),
            birth_date: None,
            date_of_death: None,
        },
    )
    .await
    .expect("Failed to create author");
    author.id
}

// Helper to create a test book
async fn create_test_book(db: &DatabaseConnection, isbn: &str, title: &str, author_id: i32) -> i32 {
    let book = book_service::create_book(
        db,
        NewBook {
            isbn: isbn.to_string(),
            title: title.to_string(),
            publication_year: None,
            author_id: Some(author_id),
        },
    )
    .await
    .expect("Failed to create book");
    book.id
}

async fn count_books(db: &DatabaseConnection) -> u64 {
    librarium::models::book::Entity::find()
        .count(db)
        .await
        .expect("Failed to count books")
}

async fn count_authors(db: &DatabaseConnection) -> u64 {
    librarium::models::author::Entity::find()
        .count(db)
        .await
        .expect("Failed to count authors")
}

#[tokio::test]
async fn test_create_book_normalizes_isbn() {
    let db = setup_test_db().await;
    let author_id = create_test_author(&db, "J.R.R. Tolkien").await;

    let book = book_service::create_book(
        &db,
        NewBook {
            isbn: "978-0-618-26027-4".to_string(),
            title: "The Fellowship of the Ring".to_string(),
            publication_year: Some(1954),
            author_id: Some(author_id),
        },
    )
    .await
    .expect("Failed to create book");

    assert_eq!(book.isbn, "9780618260274");
    assert_eq!(book.author.as_deref(), Some("J.R.R. Tolkien"));
}

#[tokio::test]
async fn test_create_book_rejects_invalid_isbn() {
    let db = setup_test_db().await;
    let author_id = create_test_author(&db, "Stephen King").await;

    // No valid characters at all
    let err = book_service::create_book(
        &db,
        NewBook {
            isbn: "abc-def".to_string(),
            title: "The Shining".to_string(),
            publication_year: None,
            author_id: Some(author_id),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CatalogError::IsbnEmpty));

    // Wrong length after normalization
    let err = book_service::create_book(
        &db,
        NewBook {
            isbn: "123456789".to_string(),
            title: "The Shining".to_string(),
            publication_year: None,
            author_id: Some(author_id),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CatalogError::Isbn(IsbnError::Length)));

    // X in the middle of a 10-character ISBN
    let err = book_service::create_book(
        &db,
        NewBook {
            isbn: "04511X7733".to_string(),
            title: "The Shining".to_string(),
            publication_year: None,
            author_id: Some(author_id),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CatalogError::Isbn(IsbnError::XNotLast)));

    assert_eq!(count_books(&db).await, 0);
}

#[tokio::test]
async fn test_create_book_requires_existing_author() {
    let db = setup_test_db().await;

    let err = book_service::create_book(
        &db,
        NewBook {
            isbn: "0451167733".to_string(),
            title: "The Shining".to_string(),
            publication_year: Some(1977),
            author_id: Some(999),
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, CatalogError::AuthorNotFound));
    assert_eq!(count_books(&db).await, 0);
}

#[tokio::test]
async fn test_create_book_requires_title_and_author_id() {
    let db = setup_test_db().await;
    let author_id = create_test_author(&db, "Jane Austen").await;

    let err = book_service::create_book(
        &db,
        NewBook {
            isbn: "9780141439518".to_string(),
            title: "   ".to_string(),
            publication_year: None,
            author_id: Some(author_id),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CatalogError::MissingTitle));

    let err = book_service::create_book(
        &db,
        NewBook {
            isbn: "9780141439518".to_string(),
            title: "x".repeat(61),
            publication_year: None,
            author_id: Some(author_id),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CatalogError::TitleTooLong));

    let err = book_service::create_book(
        &db,
        NewBook {
            isbn: "9780141439518".to_string(),
            title: "Pride and Prejudice".to_string(),
            publication_year: None,
            author_id: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CatalogError::MissingAuthor));

    assert_eq!(count_books(&db).await, 0);
}

#[tokio::test]
async fn test_duplicate_isbn_rejected() {
    let db = setup_test_db().await;
    let author_id = create_test_author(&db, "George Orwell").await;
    create_test_book(&db, "9780451524935", "Animal Farm", author_id).await;

    let err = book_service::create_book(
        &db,
        NewBook {
            // Same ISBN, different punctuation
            isbn: "978-0-451-52493-5".to_string(),
            title: "Animal Farm (reissue)".to_string(),
            publication_year: None,
            author_id: Some(author_id),
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, CatalogError::IsbnAlreadyExists));
    assert_eq!(count_books(&db).await, 1);
}

#[tokio::test]
async fn test_delete_last_book_removes_author() {
    let db = setup_test_db().await;
    let author_id = create_test_author(&db, "Mary Shelley").await;
    let book_id = create_test_book(&db, "9780486282124", "Frankenstein", author_id).await;

    let outcome = book_service::delete_book(&db, book_id)
        .await
        .expect("Failed to delete book");

    assert_eq!(outcome.title, "Frankenstein");
    assert_eq!(outcome.author, AuthorCleanup::Removed("Mary Shelley".to_string()));
    assert_eq!(count_books(&db).await, 0);
    assert_eq!(count_authors(&db).await, 0);
}

#[tokio::test]
async fn test_delete_one_of_two_books_keeps_author() {
    let db = setup_test_db().await;
    let author_id = create_test_author(&db, "Jane Austen").await;
    let first = create_test_book(&db, "9780141439518", "Pride and Prejudice", author_id).await;
    create_test_book(&db, "9780141439594", "Sense and Sensibility", author_id).await;

    let outcome = book_service::delete_book(&db, first)
        .await
        .expect("Failed to delete book");

    assert_eq!(outcome.author, AuthorCleanup::Kept);
    assert_eq!(count_books(&db).await, 1);
    assert_eq!(count_authors(&db).await, 1);
}

#[tokio::test]
async fn test_delete_missing_book_is_noop() {
    let db = setup_test_db().await;
    let author_id = create_test_author(&db, "Leo Tolstoy").await;
    create_test_book(&db, "9780140447934", "War and Peace", author_id).await;

    let err = book_service::delete_book(&db, 424242).await.unwrap_err();

    assert!(matches!(err, CatalogError::BookNotFound));
    assert_eq!(count_books(&db).await, 1);
    assert_eq!(count_authors(&db).await, 1);
}

#[tokio::test]
async fn test_author_death_before_birth_rejected() {
    let db = setup_test_db().await;

    let err = author_service::create_author(
        &db,
        NewAuthor {
            name: "Backwards".to_string(),
            birth_date: Some("1900-01-01".to_string()),
            date_of_death: Some("1899-12-31".to_string()),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CatalogError::DeathBeforeBirth));

    // Equal dates are accepted
    author_service::create_author(
        &db,
        NewAuthor {
            name: "Brief".to_string(),
            birth_date: Some("1900-01-01".to_string()),
            date_of_death: Some("1900-01-01".to_string()),
        },
    )
    .await
    .expect("Equal dates should be accepted");

    assert_eq!(count_authors(&db).await, 1);
}

#[tokio::test]
async fn test_author_date_parsing() {
    let db = setup_test_db().await;

    let err = author_service::create_author(
        &db,
        NewAuthor {
            name: "H.P. Lovecraft".to_string(),
            birth_date: Some("20/08/1890".to_string()),
            date_of_death: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidDate("birth date")));

    // Empty strings from untouched form fields count as absent
    let author = author_service::create_author(
        &db,
        NewAuthor {
            name: "H.P. Lovecraft".to_string(),
            birth_date: Some("1890-08-20".to_string()),
            date_of_death: Some("".to_string()),
        },
    )
    .await
    .expect("Failed to create author");
    assert_eq!(author.birth_date.as_deref(), Some("1890-08-20"));
    assert_eq!(author.date_of_death, None);
}

#[tokio::test]
async fn test_author_name_validation() {
    let db = setup_test_db().await;

    let err = author_service::create_author(
        &db,
        NewAuthor {
            name: "  ".to_string(),
            birth_date: None,
            date_of_death: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CatalogError::MissingName));

    let err = author_service::create_author(
        &db,
        NewAuthor {
            name: "x".repeat(31),
            birth_date: None,
            date_of_death: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CatalogError::NameTooLong));

    assert_eq!(count_authors(&db).await, 0);
}

#[tokio::test]
async fn test_list_search_and_sort() {
    let db = setup_test_db().await;
    let orwell = create_test_author(&db, "George Orwell").await;
    let austen = create_test_author(&db, "Jane Austen").await;
    create_test_book(&db, "9780451524935", "Animal Farm", orwell).await;
    create_test_book(&db, "9780452284234", "1984", orwell).await;
    create_test_book(&db, "9780141439518", "Pride and Prejudice", austen).await;

    // Default listing: sorted by title, authors joined in
    let books = book_service::list_books(&db, BookFilter::default())
        .await
        .expect("Failed to list books");
    assert_eq!(books.len(), 3);
    assert_eq!(books[0].title, "1984");
    assert_eq!(books[0].author.as_deref(), Some("George Orwell"));

    // Title search, case-insensitive substring
    let books = book_service::list_books(
        &db,
        BookFilter {
            query: Some("farm".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("Failed to search by title");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Animal Farm");

    // Author search
    let books = book_service::list_books(
        &db,
        BookFilter {
            query: Some("austen".to_string()),
            search_type: Some("author".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("Failed to search by author");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Pride and Prejudice");

    // Author sort groups Orwell after Austen
    let books = book_service::list_books(
        &db,
        BookFilter {
            sort_by: Some("author".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("Failed to sort by author");
    let authors: Vec<_> = books.iter().filter_map(|b| b.author.as_deref()).collect();
    assert_eq!(
        authors,
        vec!["Jane Austen", "George Orwell", "George Orwell"]
    );
}

#[tokio::test]
async fn test_seed_is_idempotent() {
    let db = setup_test_db().await;

    librarium::seed::seed_demo_data(&db)
        .await
        .expect("First seed failed");
    let authors_after_first = count_authors(&db).await;
    let books_after_first = count_books(&db).await;
    assert_eq!(authors_after_first, 10);
    assert_eq!(books_after_first, 16);

    librarium::seed::seed_demo_data(&db)
        .await
        .expect("Second seed failed");
    assert_eq!(count_authors(&db).await, authors_after_first);
    assert_eq!(count_books(&db).await, books_after_first);
}
