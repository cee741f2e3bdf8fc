//! Users store (read-only)

use std::sync::Arc;

use crate::models::user::User;

#[derive(Clone)]
pub struct UsersRepository {
    users: Arc<[User]>,
}

impl UsersRepository {
    pub fn new(users: Vec<User>) -> Self {
        Self { users: users.into() }
    }

    pub fn list(&self) -> &[User] {
        &self.users
    }

    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Users currently holding a book, in document order
    pub fn with_issued_book(&self) -> impl Iterator<Item = &User> {
        self.users.iter().filter(|u| u.issued_book_id().is_some())
    }
}
