//! User lookup ports and application service.
//!
//! The user store is written by collaborators outside this workspace
//! (registration lives elsewhere), so the surface here is strictly
//! read-only: point lookups, existence probes, and the admin directory.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use asset_manager_core::AppResult;
use asset_manager_domain::{UserId, UserRole};

use crate::AssetRepository;


// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// User record returned by repository queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Granted role.
    pub role: UserRole,
}

/// Read-only repository port for the user store.
///
/// Lookups match exactly; a miss is an absent result, never an error.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by their unique identifier.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<UserRecord>>;

    /// Lists every stored user, ordered by username.
    async fn list_all(&self) -> AppResult<Vec<UserRecord>>;

    /// Finds the user with this exact username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<UserRecord>>;

    /// Reports whether a user with this exact username exists.
    async fn exists_by_username(&self, username: &str) -> AppResult<bool>;

    /// Reports whether a user with this exact email exists.
    async fn exists_by_email(&self, email: &str) -> AppResult<bool>;
}

/// One row of the admin user directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDirectoryEntry {
    /// The user record.
    pub user: UserRecord,
    /// Number of assets currently assigned to the user.
    pub assigned_asset_count: i64,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Application service exposing the read-only user query surface.
#[derive(Clone)]
pub struct UserLookupService {
    user_repository: Arc<dyn UserRepository>,
    asset_repository: Arc<dyn AssetRepository>,
}

impl UserLookupService {
    /// Creates a new user lookup service.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        asset_repository: Arc<dyn AssetRepository>,
    ) -> Self {
        Self {
            user_repository,
            asset_repository,
        }
    }

    /// Returns a user record by id, if it exists.
    pub async fn find_by_id(&self, id: UserId) -> AppResult<Option<UserRecord>> {
        self.user_repository.find_by_id(id).await
    }

    /// Lists every stored user.
    pub async fn list_all(&self) -> AppResult<Vec<UserRecord>> {
        self.user_repository.list_all().await
    }

    /// Returns the user with this exact username, if one exists.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<UserRecord>> {
        self.user_repository.find_by_username(username).await
    }

    /// Reports whether this exact username is already taken.
    pub async fn exists_by_username(&self, username: &str) -> AppResult<bool> {
        self.user_repository.exists_by_username(username).await
    }

    /// Reports whether this exact email is already taken.
    pub async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        self.user_repository.exists_by_email(email).await
    }

    /// Returns every user together with their assigned-asset count.
    ///
    /// Users without assignments report a count of zero.
    pub async fn directory(&self) -> AppResult<Vec<UserDirectoryEntry>> {
        let users = self.user_repository.list_all().await?;
        let counts: HashMap<UserId, i64> = self
            .asset_repository
            .assignment_counts()
            .await?
            .into_iter()
            .map(|count| (count.user_id, count.asset_count))
            .collect();

        Ok(users
            .into_iter()
            .map(|user| {
                let assigned_asset_count = counts.get(&user.id).copied().unwrap_or(0);
                UserDirectoryEntry {
                    user,
                    assigned_asset_count,
                }
            })
            .collect())
    }
}
