use log::{debug, info, warn};
use std::sync::Arc;

use super::password::{hash_password, verify_password};
use super::users_model::{NewUser, User};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::{DatabaseError, Error, Result};
use crate::utils::pagination::Page;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Service for registering and authenticating users.
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, new_user: NewUser) -> Result<User> {
        let new_user = new_user.normalized();
        new_user.validate()?;

        if self
            .repository
            .find_by_username(&new_user.username)?
            .is_some()
        {
            warn!("Registration rejected: username '{}' taken", new_user.username);
            return Err(Error::ConstraintViolation(format!(
                "Username '{}' is already registered",
                new_user.username
            )));
        }
        if self.repository.find_by_email(&new_user.email)?.is_some() {
            warn!("Registration rejected: email '{}' taken", new_user.email);
            return Err(Error::ConstraintViolation(format!(
                "Email '{}' is already registered",
                new_user.email
            )));
        }

        let user = User {
            id: uuid::Uuid::now_v7().to_string(),
            username: new_user.username,
            email: new_user.email,
            password_hash: hash_password(&new_user.password)?,
            created_at: chrono::Utc::now().naive_utc(),
        };

        let created = self.repository.create(user).await.map_err(|e| match e {
            // Lost a race with a concurrent registration.
            Error::Database(DatabaseError::UniqueViolation(msg)) => {
                Error::ConstraintViolation(msg)
            }
            other => other,
        })?;
        info!("Registered user {} ({})", created.username, created.id);
        Ok(created)
    }

    fn authenticate(&self, username: &str, password: &str) -> Result<User> {
        let user = match self.repository.find_by_username(username.trim())? {
            Some(user) => user,
            None => {
                debug!("Login failed: unknown user '{}'", username.trim());
                return Err(Error::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
        };

        if !verify_password(password, &user.password_hash)? {
            debug!("Login failed: wrong password for '{}'", user.username);
            return Err(Error::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }
        Ok(user)
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository
            .get_by_id(user_id)?
            .ok_or_else(|| Error::NotFound(format!("User {}", user_id)))
    }

    fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.repository.find_by_username(username.trim())
    }

    fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.repository.find_by_email(email.trim())
    }

    fn list_users(&self, skip: Option<i64>, limit: Option<i64>) -> Result<Vec<User>> {
        self.repository.list(Page::new(skip, limit))
    }

    async fn delete_user(&self, user_id: &str) -> Result<bool> {
        let deleted = self.repository.delete(user_id).await?;
        if deleted == 0 {
            warn!("Delete requested for unknown user {}", user_id);
            return Ok(false);
        }
        info!("Deleted user {}", user_id);
        Ok(true)
    }
}
