use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use asset_manager_application::{AssetAssignmentCount, AssetRecord, AssetRepository};
use asset_manager_core::{AppError, AppResult};
use asset_manager_domain::{AssetId, NewAsset, UserId};

/// In-memory asset repository implementation.
#[derive(Debug)]
pub struct InMemoryAssetRepository {
    assets: RwLock<HashMap<AssetId, AssetRecord>>,
    next_id: AtomicI64,
}

impl InMemoryAssetRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            assets: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryAssetRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn record_from(id: AssetId, asset: &NewAsset) -> AssetRecord {
    AssetRecord {
        id,
        name: asset.name().as_str().to_owned(),
        description: asset.description().to_owned(),
        cost: asset.cost(),
        category_id: asset.category_id(),
        status_id: asset.status_id(),
        purchase_date: asset.purchase_date(),
        warranty_expiry: asset.warranty_expiry(),
        image_url: asset.image_url().map(str::to_owned),
        assigned_user_id: asset.assigned_user_id(),
    }
}

#[async_trait]
impl AssetRepository for InMemoryAssetRepository {
    async fn create(&self, asset: NewAsset) -> AppResult<AssetId> {
        let id = AssetId::from_i64(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.assets
            .write()
            .await
            .insert(id, record_from(id, &asset));
        Ok(id)
    }

    async fn find_by_id(&self, id: AssetId) -> AppResult<Option<AssetRecord>> {
        Ok(self.assets.read().await.get(&id).cloned())
    }

    async fn list_all(&self) -> AppResult<Vec<AssetRecord>> {
        let assets = self.assets.read().await;
        let mut listed: Vec<AssetRecord> = assets.values().cloned().collect();
        listed.sort_by(|left, right| left.name.cmp(&right.name).then(left.id.cmp(&right.id)));
        Ok(listed)
    }

    async fn update(&self, id: AssetId, change: NewAsset) -> AppResult<()> {
        let mut assets = self.assets.write().await;
        if !assets.contains_key(&id) {
            return Err(AppError::NotFound(format!("asset {id} does not exist")));
        }

        assets.insert(id, record_from(id, &change));
        Ok(())
    }

    async fn delete(&self, id: AssetId) -> AppResult<()> {
        if self.assets.write().await.remove(&id).is_none() {
            return Err(AppError::NotFound(format!("asset {id} does not exist")));
        }

        Ok(())
    }

    async fn assignment_counts(&self) -> AppResult<Vec<AssetAssignmentCount>> {
        let assets = self.assets.read().await;
        let mut grouped: HashMap<UserId, i64> = HashMap::new();
        for asset in assets.values() {
            if let Some(user_id) = asset.assigned_user_id {
                *grouped.entry(user_id).or_insert(0) += 1;
            }
        }

        let mut counts: Vec<AssetAssignmentCount> = grouped
            .into_iter()
            .map(|(user_id, asset_count)| AssetAssignmentCount {
                user_id,
                asset_count,
            })
            .collect();
        counts.sort_by_key(|count| count.user_id);
        Ok(counts)
    }
}
