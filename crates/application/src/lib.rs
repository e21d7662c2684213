//! Application services and ports.

#![forbid(unsafe_code)]

mod asset_service;
mod category_service;
mod status_service;
mod user_lookup_service;

pub use asset_service::{
    AssetAssignmentCount, AssetDetails, AssetRecord, AssetRepository, AssetService,
};
pub use category_service::{CategoryRecord, CategoryRepository, CategoryService};
pub use status_service::{StatusRecord, StatusRepository, StatusService};
pub use user_lookup_service::{UserDirectoryEntry, UserLookupService, UserRecord, UserRepository};
