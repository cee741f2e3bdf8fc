//! Data models for Bookshelf

pub mod book;
pub mod issued_book;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookPatch};
pub use issued_book::IssuedBook;
pub use user::User;
