//! Category taxonomy port and application service.

use std::sync::Arc;

use async_trait::async_trait;

use asset_manager_core::{AppResult, NonEmptyString};
use asset_manager_domain::CategoryId;

/// Stored category row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRecord {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Unique category name.
    pub name: String,
}

/// Repository port for category persistence.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Stores a new category. Duplicate names are `Conflict`.
    async fn create(&self, name: &str) -> AppResult<CategoryId>;

    /// Lists every category, ordered by name.
    async fn list_all(&self) -> AppResult<Vec<CategoryRecord>>;

    /// Renames a category. `NotFound` when absent, `Conflict` on duplicates.
    async fn rename(&self, id: CategoryId, name: &str) -> AppResult<()>;

    /// Deletes a category. `NotFound` when absent; `Conflict` while assets
    /// still reference it.
    async fn delete(&self, id: CategoryId) -> AppResult<()>;
}

/// Application service for category management.
#[derive(Clone)]
pub struct CategoryService {
    category_repository: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    /// Creates a new category service.
    #[must_use]
    pub fn new(category_repository: Arc<dyn CategoryRepository>) -> Self {
        Self {
            category_repository,
        }
    }

    /// Validates and stores a new category name.
    pub async fn create(&self, name: &str) -> AppResult<CategoryId> {
        let name = NonEmptyString::new(name.trim())?;
        self.category_repository.create(name.as_str()).await
    }

    /// Lists every category.
    pub async fn list_all(&self) -> AppResult<Vec<CategoryRecord>> {
        self.category_repository.list_all().await
    }

    /// Validates the new name and renames the category.
    pub async fn rename(&self, id: CategoryId, name: &str) -> AppResult<()> {
        let name = NonEmptyString::new(name.trim())?;
        self.category_repository.rename(id, name.as_str()).await
    }

    /// Deletes a category that no asset references.
    pub async fn delete(&self, id: CategoryId) -> AppResult<()> {
        self.category_repository.delete(id).await
    }
}
