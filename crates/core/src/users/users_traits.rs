//! User repository and service traits.

use async_trait::async_trait;

use super::users_model::{NewUser, User};
use crate::errors::Result;
use crate::utils::pagination::Page;

/// Persistence contract for users.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// Inserts a fully built user record.
    async fn create(&self, user: User) -> Result<User>;

    /// Deletes a user, cascading to their assets and transactions.
    ///
    /// Returns the number of deleted records.
    async fn delete(&self, user_id: &str) -> Result<usize>;

    fn get_by_id(&self, user_id: &str) -> Result<Option<User>>;

    /// Case-insensitive lookup.
    fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Case-insensitive lookup.
    fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    fn list(&self, page: Page) -> Result<Vec<User>>;
}

/// Business operations on users.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    /// Validates the form, enforces unique username and email, hashes the
    /// password and stores the user.
    async fn register(&self, new_user: NewUser) -> Result<User>;

    /// Returns the user when the credentials match.
    fn authenticate(&self, username: &str, password: &str) -> Result<User>;

    fn get_user(&self, user_id: &str) -> Result<User>;

    fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;

    fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    fn list_users(&self, skip: Option<i64>, limit: Option<i64>) -> Result<Vec<User>>;

    /// Returns false when no such user exists.
    async fn delete_user(&self, user_id: &str) -> Result<bool>;
}
