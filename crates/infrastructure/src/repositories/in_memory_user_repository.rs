use async_trait::async_trait;
use domain::{DomainError, User, UserRepository};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug)]
struct Store {
    users: BTreeMap<i64, User>,
    next_id: i64,
}

/// Process-local repository, the test double for `PostgresUserRepository`.
/// Assigns sequential ids starting at 1 and random v4 uuids, like the
/// database defaults do.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    store: RwLock<Store>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                users: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_all(&self) -> Result<Vec<User>, DomainError> {
        let store = self.store.read().await;
        Ok(store.users.values().cloned().collect())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let store = self.store.read().await;
        Ok(store
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let store = self.store.read().await;
        Ok(store.users.get(&id).cloned())
    }

    async fn get_by_uuid(&self, uuid: &str) -> Result<Option<User>, DomainError> {
        let store = self.store.read().await;
        Ok(store.users.values().find(|user| user.uuid == uuid).cloned())
    }

    async fn create(&self, user: &mut User) -> Result<(), DomainError> {
        let mut store = self.store.write().await;

        user.id = store.next_id;
        user.uuid = uuid::Uuid::new_v4().to_string();
        store.next_id += 1;
        store.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn update(&self, uuid: &str, user: &User) -> Result<(), DomainError> {
        let mut store = self.store.write().await;

        if let Some(existing) = store.users.values_mut().find(|u| u.uuid == uuid) {
            existing.username = user.username.clone();
            existing.email = user.email.clone();
            existing.full_name = user.full_name.clone();
        }
        Ok(())
    }

    async fn delete(&self, uuid: &str) -> Result<(), DomainError> {
        let mut store = self.store.write().await;
        store.users.retain(|_, user| user.uuid != uuid);
        Ok(())
    }
}
