use crate::entities::User;
use crate::errors::DomainError;
use async_trait::async_trait;

/// Repository trait - defines what we need from persistence layer
/// This is a PORT in hexagonal architecture
///
/// Lookups return `Ok(None)` when no row matches. `update` and `delete`
/// silently do nothing for an unknown uuid; existence is the caller's concern.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<User>, DomainError>;
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;
    async fn get_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;
    async fn get_by_uuid(&self, uuid: &str) -> Result<Option<User>, DomainError>;
    /// Inserts the user and writes the generated id and uuid back into it.
    async fn create(&self, user: &mut User) -> Result<(), DomainError>;
    async fn update(&self, uuid: &str, user: &User) -> Result<(), DomainError>;
    async fn delete(&self, uuid: &str) -> Result<(), DomainError>;
}
