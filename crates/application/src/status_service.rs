//! Status taxonomy port and application service.
//!
//! Statuses mirror categories structurally; the initial migration seeds
//! the baseline rows (`AVAILABLE`, `ASSIGNED`, `REPAIR`) and the admin
//! screens manage further values through this service.

use std::sync::Arc;

use async_trait::async_trait;

use asset_manager_core::{AppResult, NonEmptyString};
use asset_manager_domain::StatusId;

/// Stored status row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRecord {
    /// Unique status identifier.
    pub id: StatusId,
    /// Unique status name.
    pub name: String,
}

/// Repository port for status persistence.
#[async_trait]
pub trait StatusRepository: Send + Sync {
    /// Stores a new status. Duplicate names are `Conflict`.
    async fn create(&self, name: &str) -> AppResult<StatusId>;

    /// Lists every status, ordered by name.
    async fn list_all(&self) -> AppResult<Vec<StatusRecord>>;

    /// Renames a status. `NotFound` when absent, `Conflict` on duplicates.
    async fn rename(&self, id: StatusId, name: &str) -> AppResult<()>;

    /// Deletes a status. `NotFound` when absent; `Conflict` while assets
    /// still reference it.
    async fn delete(&self, id: StatusId) -> AppResult<()>;
}

/// Application service for status management.
#[derive(Clone)]
pub struct StatusService {
    status_repository: Arc<dyn StatusRepository>,
}

impl StatusService {
    /// Creates a new status service.
    #[must_use]
    pub fn new(status_repository: Arc<dyn StatusRepository>) -> Self {
        Self { status_repository }
    }

    /// Validates and stores a new status name.
    pub async fn create(&self, name: &str) -> AppResult<StatusId> {
        let name = NonEmptyString::new(name.trim())?;
        self.status_repository.create(name.as_str()).await
    }

    /// Lists every status.
    pub async fn list_all(&self) -> AppResult<Vec<StatusRecord>> {
        self.status_repository.list_all().await
    }

    /// Validates the new name and renames the status.
    pub async fn rename(&self, id: StatusId, name: &str) -> AppResult<()> {
        let name = NonEmptyString::new(name.trim())?;
        self.status_repository.rename(id, name.as_str()).await
    }

    /// Deletes a status that no asset references.
    pub async fn delete(&self, id: StatusId) -> AppResult<()> {
        self.status_repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use asset_manager_core::{AppError, AppResult};
    use asset_manager_domain::StatusId;

    use super::{StatusRecord, StatusRepository, StatusService};

    #[derive(Default)]
    struct FakeStatusRepository {
        statuses: Mutex<Vec<StatusRecord>>,
        in_use: Mutex<Vec<StatusId>>,
    }

    #[async_trait]
    impl StatusRepository for FakeStatusRepository {
        async fn create(&self, name: &str) -> AppResult<StatusId> {
            let mut statuses = self.statuses.lock().await;
            if statuses.iter().any(|status| status.name == name) {
                return Err(AppError::Conflict(format!("status '{name}' already exists")));
            }

            let id = StatusId::from_i64(statuses.len() as i64 + 1);
            statuses.push(StatusRecord {
                id,
                name: name.to_owned(),
            });
            Ok(id)
        }

        async fn list_all(&self) -> AppResult<Vec<StatusRecord>> {
            Ok(self.statuses.lock().await.clone())
        }

        async fn rename(&self, id: StatusId, name: &str) -> AppResult<()> {
            let mut statuses = self.statuses.lock().await;
            let Some(status) = statuses.iter_mut().find(|status| status.id == id) else {
                return Err(AppError::NotFound(format!("status {id} not found")));
            };
            status.name = name.to_owned();
            Ok(())
        }

        async fn delete(&self, id: StatusId) -> AppResult<()> {
            if self.in_use.lock().await.contains(&id) {
                return Err(AppError::Conflict(
                    "status is still referenced by assets".to_owned(),
                ));
            }

            let mut statuses = self.statuses.lock().await;
            let before = statuses.len();
            statuses.retain(|status| status.id != id);
            if statuses.len() == before {
                return Err(AppError::NotFound(format!("status {id} not found")));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn rename_rejects_blank_names() {
        let repository = Arc::new(FakeStatusRepository::default());
        let service = StatusService::new(repository);

        let renamed = service.rename(StatusId::from_i64(1), "  ").await;
        assert!(matches!(renamed, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn duplicate_names_surface_as_conflicts() {
        let repository = Arc::new(FakeStatusRepository::default());
        let service = StatusService::new(repository);

        assert!(service.create("REPAIR").await.is_ok());
        let duplicate = service.create("REPAIR").await;
        assert!(matches!(duplicate, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn renaming_a_missing_status_is_not_found() {
        let repository = Arc::new(FakeStatusRepository::default());
        let service = StatusService::new(repository);

        let renamed = service.rename(StatusId::from_i64(404), "LOANED").await;
        assert!(matches!(renamed, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn deleting_a_referenced_status_propagates_the_conflict() {
        let repository = Arc::new(FakeStatusRepository::default());
        let service = StatusService::new(repository.clone());

        let created = service.create("ASSIGNED").await;
        assert!(created.is_ok());
        let id = created.unwrap_or_else(|_| unreachable!());
        repository.in_use.lock().await.push(id);

        let deleted = service.delete(id).await;
        assert!(matches!(deleted, Err(AppError::Conflict(_))));
    }
}
