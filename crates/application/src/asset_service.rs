//! Asset ports and application service.
//!
//! Owns asset lifecycle operations: validated create/update, deletion,
//! and the display listing that resolves category, status, and assignee
//! names for the dashboard.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use asset_manager_core::{AppError, AppResult};
use asset_manager_domain::{AssetId, CategoryId, NewAsset, NewAssetInput, StatusId, UserId};

use crate::{CategoryRepository, StatusRepository, UserRepository};


// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Stored asset row returned by repository queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRecord {
    /// Unique asset identifier.
    pub id: AssetId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Acquisition cost in minor currency units.
    pub cost: i64,
    /// Category reference.
    pub category_id: CategoryId,
    /// Status reference.
    pub status_id: StatusId,
    /// Purchase date.
    pub purchase_date: NaiveDate,
    /// Warranty expiry date, if any.
    pub warranty_expiry: Option<NaiveDate>,
    /// Image URL shown by the dashboard, if any.
    pub image_url: Option<String>,
    /// Assigned user, if any.
    pub assigned_user_id: Option<UserId>,
}

/// Number of assets assigned to one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetAssignmentCount {
    /// The assignee.
    pub user_id: UserId,
    /// Number of assets assigned to them.
    pub asset_count: i64,
}

/// Repository port for asset persistence.
#[async_trait]
pub trait AssetRepository: Send + Sync {
    /// Stores a new asset. Returns the assigned identifier.
    async fn create(&self, asset: NewAsset) -> AppResult<AssetId>;

    /// Finds an asset by its identifier.
    async fn find_by_id(&self, id: AssetId) -> AppResult<Option<AssetRecord>>;

    /// Lists every stored asset, ordered by name.
    async fn list_all(&self) -> AppResult<Vec<AssetRecord>>;

    /// Replaces a stored asset. `NotFound` when the id does not exist.
    async fn update(&self, id: AssetId, change: NewAsset) -> AppResult<()>;

    /// Deletes a stored asset. `NotFound` when the id does not exist.
    async fn delete(&self, id: AssetId) -> AppResult<()>;

    /// Counts assets grouped by assignee; unassigned assets are skipped.
    async fn assignment_counts(&self) -> AppResult<Vec<AssetAssignmentCount>>;
}

/// Asset listing row with referenced names resolved for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDetails {
    /// The stored asset row.
    pub asset: AssetRecord,
    /// Name of the referenced category.
    pub category_name: String,
    /// Name of the referenced status.
    pub status_name: String,
    /// Username of the assignee, when the asset is assigned.
    pub assigned_username: Option<String>,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Application service for asset management.
#[derive(Clone)]
pub struct AssetService {
    asset_repository: Arc<dyn AssetRepository>,
    category_repository: Arc<dyn CategoryRepository>,
    status_repository: Arc<dyn StatusRepository>,
    user_repository: Arc<dyn UserRepository>,
}

impl AssetService {
    /// Creates a new asset service.
    #[must_use]
    pub fn new(
        asset_repository: Arc<dyn AssetRepository>,
        category_repository: Arc<dyn CategoryRepository>,
        status_repository: Arc<dyn StatusRepository>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            asset_repository,
            category_repository,
            status_repository,
            user_repository,
        }
    }

    /// Validates and stores a new asset. Returns the assigned identifier.
    pub async fn create(&self, input: NewAssetInput) -> AppResult<AssetId> {
        let asset = NewAsset::new(input)?;
        self.asset_repository.create(asset).await
    }

    /// Returns an asset by id, if it exists.
    pub async fn find_by_id(&self, id: AssetId) -> AppResult<Option<AssetRecord>> {
        self.asset_repository.find_by_id(id).await
    }

    /// Lists every stored asset.
    pub async fn list_all(&self) -> AppResult<Vec<AssetRecord>> {
        self.asset_repository.list_all().await
    }

    /// Validates a replacement payload and updates the stored asset.
    pub async fn update(&self, id: AssetId, input: NewAssetInput) -> AppResult<()> {
        let change = NewAsset::new(input)?;
        self.asset_repository.update(id, change).await
    }

    /// Deletes a stored asset.
    pub async fn delete(&self, id: AssetId) -> AppResult<()> {
        self.asset_repository.delete(id).await
    }

    /// Lists every asset with category, status, and assignee names resolved.
    ///
    /// A stored row referencing a missing category, status, or user is
    /// reported as `Internal`; the schema's foreign keys make that
    /// unreachable short of corruption.
    pub async fn list_detailed(&self) -> AppResult<Vec<AssetDetails>> {
        let assets = self.asset_repository.list_all().await?;
        let categories: HashMap<CategoryId, String> = self
            .category_repository
            .list_all()
            .await?
            .into_iter()
            .map(|category| (category.id, category.name))
            .collect();
        let statuses: HashMap<StatusId, String> = self
            .status_repository
            .list_all()
            .await?
            .into_iter()
            .map(|status| (status.id, status.name))
            .collect();
        let usernames: HashMap<UserId, String> = self
            .user_repository
            .list_all()
            .await?
            .into_iter()
            .map(|user| (user.id, user.username))
            .collect();

        assets
            .into_iter()
            .map(|asset| -> AppResult<AssetDetails> {
                let category_name =
                    categories.get(&asset.category_id).cloned().ok_or_else(|| {
                        AppError::Internal(format!(
                            "asset {} references missing category {}",
                            asset.id, asset.category_id
                        ))
                    })?;
                let status_name = statuses.get(&asset.status_id).cloned().ok_or_else(|| {
                    AppError::Internal(format!(
                        "asset {} references missing status {}",
                        asset.id, asset.status_id
                    ))
                })?;
                let assigned_username = asset
                    .assigned_user_id
                    .map(|user_id| {
                        usernames.get(&user_id).cloned().ok_or_else(|| {
                            AppError::Internal(format!(
                                "asset {} references missing user {user_id}",
                                asset.id
                            ))
                        })
                    })
                    .transpose()?;

                Ok(AssetDetails {
                    asset,
                    category_name,
                    status_name,
                    assigned_username,
                })
            })
            .collect()
    }
}
