//! Resolves the signed-in user.

use std::sync::Arc;

use glimpse_domain::User;

use crate::infrastructure::ports::{RepoError, UserRepo};

/// The signed-in user, looked up by username on each call so profile edits
/// show up immediately.
pub struct CurrentUser {
    users: Arc<dyn UserRepo>,
    username: String,
}

impl CurrentUser {
    pub fn new(users: Arc<dyn UserRepo>, username: impl Into<String>) -> Self {
        Self {
            users,
            username: username.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub async fn get(&self) -> Result<User, RepoError> {
        self.users
            .get_by_username(&self.username)
            .await?
            .ok_or_else(|| RepoError::not_found("User", &self.username))
    }
}
