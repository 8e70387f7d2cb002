//! Service layer for user account creation, lookup, and soft deletion.

use crate::directory::{
    domain::{DirectoryDomainError, NewUser, User, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    first_name: String,
    middle_name: Option<String>,
    last_name: String,
    email: String,
    time_zone: String,
}

impl CreateUserRequest {
    /// Creates a request with the required profile fields.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        time_zone: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            middle_name: None,
            last_name: last_name.into(),
            email: email.into(),
            time_zone: time_zone.into(),
        }
    }

    /// Sets the middle name.
    #[must_use]
    pub fn with_middle_name(mut self, middle_name: impl Into<String>) -> Self {
        self.middle_name = Some(middle_name.into());
        self
    }
}

/// Service-level errors for user account operations.
#[derive(Debug, Error)]
pub enum UserAccountError {
    /// Profile validation failed.
    #[error(transparent)]
    Domain(#[from] DirectoryDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),

    /// No live user exists with the given identifier.
    #[error("user {0} not found or deleted")]
    NotFound(UserId),

    /// The email address is already registered.
    #[error("email already exists: {0}")]
    EmailInUse(String),
}

/// Result type for user account service operations.
pub type UserAccountResult<T> = Result<T, UserAccountError>;

/// User account orchestration service.
#[derive(Clone)]
pub struct UserAccountService<R>
where
    R: UserRepository,
{
    repository: Arc<R>,
}

impl<R> UserAccountService<R>
where
    R: UserRepository,
{
    /// Creates a new user account service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns [`UserAccountError::EmailInUse`] when the email address is
    /// already registered, or validation and persistence errors.
    pub async fn create_user(&self, request: CreateUserRequest) -> UserAccountResult<User> {
        info!(email = %request.email, "creating user");
        if let Some(existing) = self.repository.find_by_email(&request.email).await? {
            warn!(email = %existing.email(), "email already registered");
            return Err(UserAccountError::EmailInUse(request.email));
        }

        let user = User::new(NewUser {
            first_name: request.first_name,
            middle_name: request.middle_name,
            last_name: request.last_name,
            email: request.email,
            time_zone: request.time_zone,
        })?;
        self.repository.store(&user).await?;
        info!(user_id = %user.id(), "user created");
        Ok(user)
    }

    /// Returns the live user with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserAccountError::NotFound`] when the user is absent or
    /// soft-deleted.
    pub async fn get_user(&self, id: UserId) -> UserAccountResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .filter(|user| !user.is_deleted())
            .ok_or(UserAccountError::NotFound(id))
    }

    /// Soft deletes a user. Idempotent in effect: re-deleting an already
    /// deleted user succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`UserAccountError::NotFound`] when no user row exists.
    pub async fn soft_delete_user(&self, id: UserId) -> UserAccountResult<()> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserAccountError::NotFound(id))?;
        user.mark_deleted();
        self.repository.update(&user).await?;
        info!(user_id = %id, "user marked as deleted");
        Ok(())
    }
}
