//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_asset_repository;
mod in_memory_user_repository;
mod postgres_asset_repository;
mod postgres_category_repository;
mod postgres_status_repository;
mod postgres_user_repository;

pub use in_memory_asset_repository::InMemoryAssetRepository;
pub use in_memory_user_repository::InMemoryUserRepository;
pub use postgres_asset_repository::PostgresAssetRepository;
pub use postgres_category_repository::PostgresCategoryRepository;
pub use postgres_status_repository::PostgresStatusRepository;
pub use postgres_user_repository::PostgresUserRepository;
