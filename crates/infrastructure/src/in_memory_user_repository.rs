use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use asset_manager_application::{UserRecord, UserRepository};
use asset_manager_core::AppResult;
use asset_manager_domain::UserId;

/// In-memory user repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, UserRecord>>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Seeds a user record, replacing any record with the same id.
    pub async fn insert(&self, user: UserRecord) {
        self.users.write().await.insert(user.id, user);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<UserRecord>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn list_all(&self) -> AppResult<Vec<UserRecord>> {
        let users = self.users.read().await;
        let mut listed: Vec<UserRecord> = users.values().cloned().collect();
        listed.sort_by(|left, right| left.username.cmp(&right.username));
        Ok(listed)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<UserRecord>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn exists_by_username(&self, username: &str) -> AppResult<bool> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .any(|user| user.username == username))
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .any(|user| user.email == email))
    }
}
