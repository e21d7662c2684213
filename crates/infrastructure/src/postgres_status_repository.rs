//! PostgreSQL-backed status repository.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use asset_manager_application::{StatusRecord, StatusRepository};
use asset_manager_core::{AppError, AppResult};
use asset_manager_domain::StatusId;

/// PostgreSQL implementation of the status persistence port.
#[derive(Clone)]
pub struct PostgresStatusRepository {
    pool: PgPool,
}

impl PostgresStatusRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct StatusRow {
    id: i64,
    name: String,
}

impl From<StatusRow> for StatusRecord {
    fn from(row: StatusRow) -> Self {
        Self {
            id: StatusId::from_i64(row.id),
            name: row.name,
        }
    }
}

#[async_trait]
impl StatusRepository for PostgresStatusRepository {
    async fn create(&self, name: &str) -> AppResult<StatusId> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO statuses (name)
            VALUES ($1)
            RETURNING id
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| name_conflict_or_internal(error, name, "create status"))?;

        Ok(StatusId::from_i64(id))
    }

    async fn list_all(&self) -> AppResult<Vec<StatusRecord>> {
        let rows = sqlx::query_as::<_, StatusRow>(
            r#"
            SELECT id, name
            FROM statuses
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list statuses: {error}")))?;

        Ok(rows.into_iter().map(StatusRecord::from).collect())
    }

    async fn rename(&self, id: StatusId, name: &str) -> AppResult<()> {
        let updated = sqlx::query(
            r#"
            UPDATE statuses
            SET name = $2
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .bind(name)
        .execute(&self.pool)
        .await
        .map_err(|error| name_conflict_or_internal(error, name, "rename status"))?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("status {id} does not exist")));
        }

        Ok(())
    }

    async fn delete(&self, id: StatusId) -> AppResult<()> {
        let deleted = sqlx::query(
            r#"
            DELETE FROM statuses
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|error| in_use_conflict_or_internal(error, "delete status"))?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("status {id} does not exist")));
        }

        Ok(())
    }
}

fn name_conflict_or_internal(error: sqlx::Error, name: &str, operation: &str) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict(format!("status '{name}' already exists"));
    }

    AppError::Internal(format!("failed to {operation}: {error}"))
}

fn in_use_conflict_or_internal(error: sqlx::Error, operation: &str) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23503")
    {
        return AppError::Conflict("status is still referenced by assets".to_owned());
    }

    AppError::Internal(format!("failed to {operation}: {error}"))
}

#[cfg(test)]
mod tests {
    use asset_manager_application::StatusRepository;
    use asset_manager_core::AppError;
    use asset_manager_domain::StatusId;
    use sqlx::PgPool;
    use sqlx::migrate::Migrator;
    use sqlx::postgres::PgPoolOptions;

    use super::PostgresStatusRepository;

    static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

    async fn test_pool() -> Option<PgPool> {
        let Ok(database_url) = std::env::var("DATABASE_URL") else {
            return None;
        };

        let pool = match PgPoolOptions::new()
            .max_connections(2)
            .connect(database_url.as_str())
            .await
        {
            Ok(pool) => pool,
            Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
        };

        if let Err(error) = MIGRATOR.run(&pool).await {
            panic!("failed to run migrations for postgres status tests: {error}");
        }

        Some(pool)
    }

    async fn remove_status(pool: &PgPool, name: &str) {
        let cleanup = sqlx::query(
            r#"
            DELETE FROM statuses
            WHERE name = $1
            "#,
        )
        .bind(name)
        .execute(pool)
        .await;
        assert!(cleanup.is_ok());
    }

    #[tokio::test]
    async fn created_statuses_are_listed_and_renamable() {
        let Some(pool) = test_pool().await else {
            return;
        };

        let repository = PostgresStatusRepository::new(pool.clone());
        remove_status(&pool, "pg-lifecycle-status").await;
        remove_status(&pool, "pg-lifecycle-status-v2").await;

        let created = repository.create("pg-lifecycle-status").await;
        assert!(created.is_ok());
        let id = created.unwrap_or_else(|_| unreachable!());

        let listed = repository.list_all().await;
        assert!(listed.is_ok());
        assert!(
            listed
                .unwrap_or_default()
                .iter()
                .any(|status| status.id == id && status.name == "pg-lifecycle-status")
        );

        let renamed = repository.rename(id, "pg-lifecycle-status-v2").await;
        assert!(renamed.is_ok());

        let listed = repository.list_all().await;
        assert!(listed.is_ok());
        assert!(
            listed
                .unwrap_or_default()
                .iter()
                .any(|status| status.id == id && status.name == "pg-lifecycle-status-v2")
        );
    }

    #[tokio::test]
    async fn duplicate_names_surface_as_conflicts() {
        let Some(pool) = test_pool().await else {
            return;
        };

        let repository = PostgresStatusRepository::new(pool.clone());
        remove_status(&pool, "pg-duplicate-status").await;
        remove_status(&pool, "pg-duplicate-status-alt").await;

        let first = repository.create("pg-duplicate-status").await;
        assert!(first.is_ok());

        let second = repository.create("pg-duplicate-status").await;
        assert!(matches!(second, Err(AppError::Conflict(_))));

        let alternate = repository.create("pg-duplicate-status-alt").await;
        assert!(alternate.is_ok());
        let alternate_id = alternate.unwrap_or_else(|_| unreachable!());

        let renamed = repository.rename(alternate_id, "pg-duplicate-status").await;
        assert!(matches!(renamed, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn deleting_a_referenced_status_is_a_conflict() {
        let Some(pool) = test_pool().await else {
            return;
        };

        let repository = PostgresStatusRepository::new(pool.clone());

        let asset_cleanup = sqlx::query(
            r#"
            DELETE FROM assets
            WHERE name = 'status-in-use-asset'
            "#,
        )
        .execute(&pool)
        .await;
        assert!(asset_cleanup.is_ok());
        remove_status(&pool, "pg-referenced-status").await;

        let created = repository.create("pg-referenced-status").await;
        assert!(created.is_ok());
        let id = created.unwrap_or_else(|_| unreachable!());

        let category_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO categories (name)
            VALUES ('status-in-use-category')
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id
            "#,
        )
        .fetch_one(&pool)
        .await;
        assert!(category_id.is_ok());

        let asset_insert = sqlx::query(
            r#"
            INSERT INTO assets (name, cost, category_id, status_id, purchase_date)
            VALUES ('status-in-use-asset', 0, $1, $2, '2025-04-01')
            "#,
        )
        .bind(category_id.unwrap_or_default())
        .bind(id.as_i64())
        .execute(&pool)
        .await;
        assert!(asset_insert.is_ok());

        let deleted = repository.delete(id).await;
        assert!(matches!(deleted, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn missing_statuses_are_not_found() {
        let Some(pool) = test_pool().await else {
            return;
        };

        let repository = PostgresStatusRepository::new(pool.clone());

        let renamed = repository
            .rename(StatusId::from_i64(i64::MAX), "pg-ghost-status")
            .await;
        assert!(matches!(renamed, Err(AppError::NotFound(_))));

        let deleted = repository.delete(StatusId::from_i64(i64::MAX)).await;
        assert!(matches!(deleted, Err(AppError::NotFound(_))));
    }
}
