//! Catalog service: book listing, lookup, creation and update

use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookPatch, IssuedBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All books in catalog order
    pub async fn list_books(&self) -> Vec<Book> {
        self.repository.books.list().await
    }

    /// Join every user holding a book with that book.
    ///
    /// Users whose issued id matches no book are skipped. An empty result is
    /// reported as not found.
    pub async fn issued_books(&self) -> AppResult<Vec<IssuedBook>> {
        let books = self.repository.books.list().await;

        let issued: Vec<IssuedBook> = self
            .repository
            .users
            .with_issued_book()
            .filter_map(|user| {
                let book_id = user.issued_book_id()?;
                let book = books.iter().find(|b| b.id == book_id);
                if book.is_none() {
                    tracing::debug!("User {} holds unknown book {}", user.id, book_id);
                }
                book.map(|b| IssuedBook::new(b.clone(), user))
            })
            .collect();

        if issued.is_empty() {
            return Err(AppError::NotFound("No books have been issued".to_string()));
        }

        Ok(issued)
    }

    /// Get a book by id
    pub async fn get_book(&self, id: &str) -> AppResult<Book> {
        self.repository.books.get(id).await.ok_or_else(|| {
            tracing::info!("Book with ID {} not found", id);
            AppError::NotFound("Book not found".to_string())
        })
    }

    /// Add a book from a raw request payload and return the whole catalog.
    pub async fn create_book(&self, data: Option<Value>) -> AppResult<Vec<Book>> {
        let data = data
            .filter(|v| !is_falsy(v))
            .ok_or_else(|| AppError::BadRequest("No data was provided".to_string()))?;

        let book = Book::from_payload(data)?;
        let id = book.id.clone();

        let books = self.repository.books.insert(book).await?;
        tracing::info!("Catalog create: added book id={} ({} books)", id, books.len());
        Ok(books)
    }

    /// Merge a raw partial payload into an existing book
    pub async fn update_book(&self, id: &str, data: Option<Value>) -> AppResult<Book> {
        let patch = BookPatch::from_payload(data)?;
        if patch.is_empty() {
            tracing::debug!("Catalog update: empty patch for book id={}", id);
        }

        let updated = self.repository.books.update(id, patch).await?;
        if updated.id != id {
            tracing::info!("Catalog update: book id={} renamed to id={}", id, updated.id);
        } else {
            tracing::info!("Catalog update: book id={} updated", id);
        }
        Ok(updated)
    }
}

/// `null`, `false`, zero and the empty string all count as "no data"
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
