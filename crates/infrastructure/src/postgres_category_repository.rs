//! PostgreSQL-backed category repository.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use asset_manager_application::{CategoryRecord, CategoryRepository};
use asset_manager_core::{AppError, AppResult};
use asset_manager_domain::CategoryId;

/// PostgreSQL implementation of the category persistence port.
#[derive(Clone)]
pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
}

impl From<CategoryRow> for CategoryRecord {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId::from_i64(row.id),
            name: row.name,
        }
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn create(&self, name: &str) -> AppResult<CategoryId> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO categories (name)
            VALUES ($1)
            RETURNING id
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| name_conflict_or_internal(error, name, "create category"))?;

        Ok(CategoryId::from_i64(id))
    }

    async fn list_all(&self) -> AppResult<Vec<CategoryRecord>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name
            FROM categories
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list categories: {error}")))?;

        Ok(rows.into_iter().map(CategoryRecord::from).collect())
    }

    async fn rename(&self, id: CategoryId, name: &str) -> AppResult<()> {
        let updated = sqlx::query(
            r#"
            UPDATE categories
            SET name = $2
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .bind(name)
        .execute(&self.pool)
        .await
        .map_err(|error| name_conflict_or_internal(error, name, "rename category"))?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("category {id} does not exist")));
        }

        Ok(())
    }

    async fn delete(&self, id: CategoryId) -> AppResult<()> {
        let deleted = sqlx::query(
            r#"
            DELETE FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|error| in_use_conflict_or_internal(error, "delete category"))?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("category {id} does not exist")));
        }

        Ok(())
    }
}

fn name_conflict_or_internal(error: sqlx::Error, name: &str, operation: &str) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict(format!("category '{name}' already exists"));
    }

    AppError::Internal(format!("failed to {operation}: {error}"))
}

fn in_use_conflict_or_internal(error: sqlx::Error, operation: &str) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23503")
    {
        return AppError::Conflict("category is still referenced by assets".to_owned());
    }

    AppError::Internal(format!("failed to {operation}: {error}"))
}
