//! Demo seed data: a handful of classic authors and their books.
//!
//! Safe to run repeatedly: authors are matched by name and books by
//! canonical ISBN, so existing rows are left alone.

use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::isbn;
use crate::models::{author, book};

struct SeedAuthor {
    name: &'static str,
    birth_date: &'static str,
    date_of_death: Option<&'static str>,
}

struct SeedBook {
    isbn: &'static str,
    title: &'static str,
    publication_year: i32,
    author_name: &'static str,
}

const AUTHORS: &[SeedAuthor] = &[
    SeedAuthor { name: "J.R.R. Tolkien", birth_date: "1892-01-03", date_of_death: Some("1973-09-02") },
    SeedAuthor { name: "Jane Austen", birth_date: "1775-12-16", date_of_death: Some("1817-07-18") },
    SeedAuthor { name: "George Orwell", birth_date: "1903-06-25", date_of_death: Some("1950-01-21") },
    SeedAuthor { name: "Agatha Christie", birth_date: "1890-09-15", date_of_death: Some("1976-01-12") },
    SeedAuthor { name: "Stephen King", birth_date: "1947-09-21", date_of_death: None },
    SeedAuthor { name: "Mary Shelley", birth_date: "1797-08-30", date_of_death: Some("1851-02-01") },
    SeedAuthor { name: "Leo Tolstoy", birth_date: "1828-09-09", date_of_death: Some("1910-11-20") },
    SeedAuthor { name: "Virginia Woolf", birth_date: "1882-01-25", date_of_death: Some("1941-03-28") },
    SeedAuthor { name: "H.P. Lovecraft", birth_date: "1890-08-20", date_of_death: Some("1937-03-15") },
    SeedAuthor { name: "Gabriel Garcia Marquez", birth_date: "1927-03-06", date_of_death: Some("2014-04-17") },
];

const BOOKS: &[SeedBook] = &[
    SeedBook { isbn: "978-0-618-26027-4", title: "The Fellowship of the Ring", publication_year: 1954, author_name: "J.R.R. Tolkien" },
    SeedBook { isbn: "9780345339683", title: "The Two Towers", publication_year: 1954, author_name: "J.R.R. Tolkien" },
    SeedBook { isbn: "978-0-345-34042-4", title: "The Return of the King", publication_year: 1955, author_name: "J.R.R. Tolkien" },
    SeedBook { isbn: "9780141439518", title: "Pride and Prejudice", publication_year: 1813, author_name: "Jane Austen" },
    SeedBook { isbn: "9780141439594", title: "Sense and Sensibility", publication_year: 1811, author_name: "Jane Austen" },
    SeedBook { isbn: "978-0-452-28423-4", title: "1984", publication_year: 1949, author_name: "George Orwell" },
    SeedBook { isbn: "9780451524935", title: "Animal Farm", publication_year: 1945, author_name: "George Orwell" },
    SeedBook { isbn: "978-0007119339", title: "And Then There Were None", publication_year: 1939, author_name: "Agatha Christie" },
    SeedBook { isbn: "978-0007120618", title: "The Murder of Roger Ackroyd", publication_year: 1926, author_name: "Agatha Christie" },
    SeedBook { isbn: "9780345453747", title: "It", publication_year: 1986, author_name: "Stephen King" },
    SeedBook { isbn: "0451167733", title: "The Shining", publication_year: 1977, author_name: "Stephen King" },
    SeedBook { isbn: "9780486282124", title: "Frankenstein", publication_year: 1818, author_name: "Mary Shelley" },
    SeedBook { isbn: "9780140447934", title: "War and Peace", publication_year: 1869, author_name: "Leo Tolstoy" },
    SeedBook { isbn: "9780156030062", title: "Mrs Dalloway", publication_year: 1925, author_name: "Virginia Woolf" },
    SeedBook { isbn: "9780486295322", title: "The Call of Cthulhu and Other Weird Stories", publication_year: 1928, author_name: "H.P. Lovecraft" },
    SeedBook { isbn: "9780060883287", title: "One Hundred Years of Solitude", publication_year: 1967, author_name: "Gabriel Garcia Marquez" },
];

pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), sea_orm::DbErr> {
    let now = chrono::Utc::now().to_rfc3339();

    for seed in AUTHORS {
        let existing = author::Entity::find()
            .filter(author::Column::Name.eq(seed.name))
            .one(db)
            .await?;
        if existing.is_some() {
            continue;
        }

        let new_author = author::ActiveModel {
            name: Set(seed.name.to_owned()),
            birth_date: Set(Some(seed.birth_date.to_owned())),
            date_of_death: Set(seed.date_of_death.map(str::to_owned)),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };
        new_author.insert(db).await?;
    }

    for seed in BOOKS {
        let canonical = isbn::normalize(seed.isbn);

        let existing = book::Entity::find()
            .filter(book::Column::Isbn.eq(&canonical))
            .one(db)
            .await?;
        if existing.is_some() {
            continue;
        }

        let Some(owner) = author::Entity::find()
            .filter(author::Column::Name.eq(seed.author_name))
            .one(db)
            .await?
        else {
            tracing::warn!(
                "seed: author '{}' missing for book '{}', skipping",
                seed.author_name,
                seed.title
            );
            continue;
        };

        let new_book = book::ActiveModel {
            isbn: Set(canonical),
            title: Set(seed.title.to_owned()),
            publication_year: Set(Some(seed.publication_year)),
            author_id: Set(owner.id),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };
        new_book.insert(db).await?;
    }

    Ok(())
}
