//! Read-only access to library users

use crate::{
    error::{AppError, AppResult},
    models::User,
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub fn list_users(&self) -> Vec<User> {
        self.repository.users.list().to_vec()
    }

    pub fn get_user(&self, id: &str) -> AppResult<User> {
        self.repository
            .users
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("User doesn't exist".to_string()))
    }
}
