//! Books store.
//!
//! The store owns the catalog sequence. Callers only ever receive clones,
//! and every check-then-write (duplicate id on insert, id collision on
//! update) happens under a single write guard.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookPatch},
};

#[derive(Clone)]
pub struct BooksRepository {
    books: Arc<RwLock<Vec<Book>>>,
}

impl BooksRepository {
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books: Arc::new(RwLock::new(books)),
        }
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// All books, in insertion order
    pub async fn list(&self) -> Vec<Book> {
        self.books.read().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.books.read().await.len()
    }

    /// First book whose id matches exactly
    pub async fn get(&self, id: &str) -> Option<Book> {
        self.books.read().await.iter().find(|b| b.id == id).cloned()
    }

    // =========================================================================
    // WRITE
    // =========================================================================

    /// Append a book, rejecting an id that is already taken.
    /// Returns the whole catalog after the insert.
    pub async fn insert(&self, book: Book) -> AppResult<Vec<Book>> {
        let mut books = self.books.write().await;

        if books.iter().any(|b| b.id == book.id) {
            return Err(duplicate_id());
        }

        books.push(book);
        Ok(books.clone())
    }

    /// Merge `patch` into the book with the given id, in place.
    ///
    /// Renaming a book is allowed as long as no other book holds the new id.
    pub async fn update(&self, id: &str, patch: BookPatch) -> AppResult<Book> {
        let mut books = self.books.write().await;

        let index = books
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound("Book not found with that particular ID".to_string()))?;

        if let Some(new_id) = patch.id.as_deref() {
            let taken = books
                .iter()
                .enumerate()
                .any(|(i, b)| i != index && b.id == new_id);
            if taken {
                return Err(duplicate_id());
            }
        }

        let book = &mut books[index];
        book.apply(patch);
        Ok(book.clone())
    }
}

fn duplicate_id() -> AppError {
    AppError::Duplicate("Book already exists with the same ID".to_string())
}
