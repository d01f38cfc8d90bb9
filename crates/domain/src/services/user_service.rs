use crate::entities::{CreateUserRequest, UpdateUserRequest, User};
use crate::errors::DomainError;
use crate::repositories::UserRepository;
use email_address::EmailAddress;
use std::sync::Arc;
use tracing::debug;

/// User Service - Contains business logic
/// This is the APPLICATION LAYER in clean architecture
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    /// Get all users
    pub async fn get_all_users(&self) -> Result<Vec<User>, DomainError> {
        self.user_repository.get_all().await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<User, DomainError> {
        user_exists(self.user_repository.get_by_username(username).await?)
    }

    pub async fn get_user_by_id(&self, id: i64) -> Result<User, DomainError> {
        user_exists(self.user_repository.get_by_id(id).await?)
    }

    pub async fn get_user_by_uuid(&self, uuid: &str) -> Result<User, DomainError> {
        require_non_empty(None, uuid)?;

        user_exists(self.user_repository.get_by_uuid(uuid).await?)
    }

    /// Create a new user with business validation
    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<User, DomainError> {
        require_non_empty(Some("username"), &request.username)?;
        require_non_empty(Some("email"), &request.email)?;
        require_valid_email(&request.email)?;

        let mut user = User::new(
            request.username.clone(),
            request.email.clone(),
            request.full_name.clone(),
        );
        self.user_repository.create(&mut user).await?;

        debug!(id = user.id, uuid = %user.uuid, "created user");
        Ok(user)
    }

    /// Partial update: blank request fields leave the stored value alone.
    pub async fn update_user(
        &self,
        uuid: &str,
        request: &UpdateUserRequest,
    ) -> Result<User, DomainError> {
        require_non_empty(None, uuid)?;

        let mut user = user_exists(self.user_repository.get_by_uuid(uuid).await?)?;

        if !request.email.trim().is_empty() {
            require_valid_email(&request.email)?;
        }

        user.apply(request);
        self.user_repository.update(uuid, &user).await?;

        debug!(uuid, "updated user");
        Ok(user)
    }

    /// Delete user
    pub async fn delete_user(&self, uuid: &str) -> Result<(), DomainError> {
        require_non_empty(None, uuid)?;

        // Check if user exists
        user_exists(self.user_repository.get_by_uuid(uuid).await?)?;

        self.user_repository.delete(uuid).await?;

        debug!(uuid, "deleted user");
        Ok(())
    }
}

fn user_exists(user: Option<User>) -> Result<User, DomainError> {
    user.ok_or(DomainError::NotFound)
}

fn require_non_empty(field: Option<&'static str>, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::EmptyField { field });
    }
    Ok(())
}

/// RFC 5322 address syntax, display-name form included. No DNS lookups.
fn require_valid_email(email: &str) -> Result<(), DomainError> {
    if !EmailAddress::is_valid(email) {
        return Err(DomainError::InvalidEmail);
    }
    Ok(())
}
