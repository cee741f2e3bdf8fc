//! Repository layer: in-memory stores seeded from JSON documents

pub mod books;
pub mod users;

use std::collections::HashSet;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::{
    config::DataConfig,
    error::AppResult,
    models::{Book, User},
};

/// Main repository struct holding the stores
#[derive(Clone)]
pub struct Repository {
    pub books: books::BooksRepository,
    pub users: users::UsersRepository,
}

/// Accepted layouts of a seed document: a bare array, or an object with a
/// single `books` / `users` member.
#[derive(Deserialize)]
#[serde(untagged)]
enum SeedDocument<T> {
    Bare(Vec<T>),
    Books { books: Vec<T> },
    Users { users: Vec<T> },
}

impl<T> SeedDocument<T> {
    fn into_records(self) -> Vec<T> {
        match self {
            SeedDocument::Bare(records)
            | SeedDocument::Books { books: records }
            | SeedDocument::Users { users: records } => records,
        }
    }
}

impl Repository {
    /// Create a repository from already-loaded collections
    pub fn new(books: Vec<Book>, users: Vec<User>) -> Self {
        Self {
            books: books::BooksRepository::new(books),
            users: users::UsersRepository::new(users),
        }
    }

    /// Load both collections from the configured documents
    pub async fn load(config: &DataConfig) -> AppResult<Self> {
        let books: Vec<Book> = read_seed(&config.books_path).await?;
        let users: Vec<User> = read_seed(&config.users_path).await?;

        warn_duplicate_ids(books.iter().map(|b| b.id.as_str()));

        let repository = Self::new(books, users);
        tracing::info!(
            "Loaded {} books and {} users",
            repository.books.count().await,
            repository.users.list().len()
        );

        Ok(repository)
    }
}

async fn read_seed<T: DeserializeOwned>(path: impl AsRef<Path>) -> AppResult<Vec<T>> {
    let path = path.as_ref();
    tracing::debug!("Reading seed document {}", path.display());

    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        tracing::error!("Cannot read {}: {}", path.display(), e);
        e
    })?;

    parse_seed(&text).map_err(|e| {
        tracing::error!("Cannot parse {}: {}", path.display(), e);
        e
    })
}

fn parse_seed<T: DeserializeOwned>(text: &str) -> AppResult<Vec<T>> {
    let document: SeedDocument<T> = serde_json::from_str(text)?;
    Ok(document.into_records())
}

/// Ids are only checked on create; a seed with clashes is served as-is.
fn warn_duplicate_ids<'a>(ids: impl Iterator<Item = &'a str>) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            tracing::warn!("Seed data contains duplicate book id {}", id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_parse_wrapped_documents() {
        let books: Vec<Book> =
            parse_seed(r#"{ "books": [ { "id": "1", "name": "Dune" }, { "id": "2" } ] }"#).unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].id, "1");

        let users: Vec<User> =
            parse_seed(r#"{ "users": [ { "id": "1", "name": "Alice", "issuedBook": "2" } ] }"#).unwrap();
        assert_eq!(users[0].issued_book_id(), Some("2"));
    }

    #[test]
    fn test_parse_bare_array() {
        let books: Vec<Book> = parse_seed(r#"[ { "id": "1" } ]"#).unwrap();
        assert_eq!(books.len(), 1);
    }

    #[test]
    fn test_parse_rejects_non_string_ids() {
        let result: AppResult<Vec<Book>> = parse_seed(r#"{ "books": [ { "id": 1 } ] }"#);
        assert!(matches!(result, Err(AppError::Json(_))));
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let config = DataConfig {
            books_path: "does/not/exist.json".to_string(),
            users_path: "does/not/exist.json".to_string(),
        };
        assert!(matches!(Repository::load(&config).await, Err(AppError::Io(_))));
    }

    #[tokio::test]
    async fn test_load_bundled_seed_data() {
        let root = env!("CARGO_MANIFEST_DIR");
        let config = DataConfig {
            books_path: format!("{}/data/books.json", root),
            users_path: format!("{}/data/users.json", root),
        };
        let repository = Repository::load(&config).await.unwrap();

        assert!(repository.books.count().await > 0);
        assert!(repository.users.with_issued_book().count() > 0);
    }
}
