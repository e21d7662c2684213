//! PostgreSQL-backed asset repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};

use asset_manager_application::{AssetAssignmentCount, AssetRecord, AssetRepository};
use asset_manager_core::{AppError, AppResult};
use asset_manager_domain::{AssetId, CategoryId, NewAsset, StatusId, UserId};

/// PostgreSQL implementation of the asset persistence port.
#[derive(Clone)]
pub struct PostgresAssetRepository {
    pool: PgPool,
}

impl PostgresAssetRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AssetRow {
    id: i64,
    name: String,
    description: String,
    cost: i64,
    category_id: i64,
    status_id: i64,
    purchase_date: NaiveDate,
    warranty_expiry: Option<NaiveDate>,
    image_url: Option<String>,
    assigned_user_id: Option<i64>,
}

impl From<AssetRow> for AssetRecord {
    fn from(row: AssetRow) -> Self {
        Self {
            id: AssetId::from_i64(row.id),
            name: row.name,
            description: row.description,
            cost: row.cost,
            category_id: CategoryId::from_i64(row.category_id),
            status_id: StatusId::from_i64(row.status_id),
            purchase_date: row.purchase_date,
            warranty_expiry: row.warranty_expiry,
            image_url: row.image_url,
            assigned_user_id: row.assigned_user_id.map(UserId::from_i64),
        }
    }
}

#[async_trait]
impl AssetRepository for PostgresAssetRepository {
    async fn create(&self, asset: NewAsset) -> AppResult<AssetId> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO assets (
                name,
                description,
                cost,
                category_id,
                status_id,
                purchase_date,
                warranty_expiry,
                image_url,
                assigned_user_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(asset.name().as_str())
        .bind(asset.description())
        .bind(asset.cost())
        .bind(asset.category_id().as_i64())
        .bind(asset.status_id().as_i64())
        .bind(asset.purchase_date())
        .bind(asset.warranty_expiry())
        .bind(asset.image_url())
        .bind(asset.assigned_user_id().map(|user_id| user_id.as_i64()))
        .fetch_one(&self.pool)
        .await
        .map_err(|error| missing_reference_or_internal(error, "create asset"))?;

        Ok(AssetId::from_i64(id))
    }

    async fn find_by_id(&self, id: AssetId) -> AppResult<Option<AssetRecord>> {
        let row = sqlx::query_as::<_, AssetRow>(
            r#"
            SELECT
                id,
                name,
                description,
                cost,
                category_id,
                status_id,
                purchase_date,
                warranty_expiry,
                image_url,
                assigned_user_id
            FROM assets
            WHERE id = $1
            LIMIT 1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load asset '{id}': {error}")))?;

        Ok(row.map(AssetRecord::from))
    }

    async fn list_all(&self) -> AppResult<Vec<AssetRecord>> {
        let rows = sqlx::query_as::<_, AssetRow>(
            r#"
            SELECT
                id,
                name,
                description,
                cost,
                category_id,
                status_id,
                purchase_date,
                warranty_expiry,
                image_url,
                assigned_user_id
            FROM assets
            ORDER BY name, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list assets: {error}")))?;

        Ok(rows.into_iter().map(AssetRecord::from).collect())
    }

    async fn update(&self, id: AssetId, change: NewAsset) -> AppResult<()> {
        let updated = sqlx::query(
            r#"
            UPDATE assets
            SET name = $2,
                description = $3,
                cost = $4,
                category_id = $5,
                status_id = $6,
                purchase_date = $7,
                warranty_expiry = $8,
                image_url = $9,
                assigned_user_id = $10
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .bind(change.name().as_str())
        .bind(change.description())
        .bind(change.cost())
        .bind(change.category_id().as_i64())
        .bind(change.status_id().as_i64())
        .bind(change.purchase_date())
        .bind(change.warranty_expiry())
        .bind(change.image_url())
        .bind(change.assigned_user_id().map(|user_id| user_id.as_i64()))
        .execute(&self.pool)
        .await
        .map_err(|error| missing_reference_or_internal(error, "update asset"))?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("asset {id} does not exist")));
        }

        Ok(())
    }

    async fn delete(&self, id: AssetId) -> AppResult<()> {
        let deleted = sqlx::query(
            r#"
            DELETE FROM assets
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete asset '{id}': {error}")))?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("asset {id} does not exist")));
        }

        Ok(())
    }

    async fn assignment_counts(&self) -> AppResult<Vec<AssetAssignmentCount>> {
        let rows = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT assigned_user_id, COUNT(*)
            FROM assets
            WHERE assigned_user_id IS NOT NULL
            GROUP BY assigned_user_id
            ORDER BY assigned_user_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to count asset assignments: {error}"))
        })?;

        Ok(rows
            .into_iter()
            .map(|(user_id, asset_count)| AssetAssignmentCount {
                user_id: UserId::from_i64(user_id),
                asset_count,
            })
            .collect())
    }
}

fn missing_reference_or_internal(error: sqlx::Error, operation: &str) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23503")
    {
        return AppError::Validation(
            "asset references an unknown category, status, or user".to_owned(),
        );
    }

    AppError::Internal(format!("failed to {operation}: {error}"))
}
