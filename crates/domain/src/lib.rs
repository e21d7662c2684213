//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod asset;
mod ids;
mod user;

pub use asset::{NewAsset, NewAssetInput};
pub use ids::{AssetId, CategoryId, StatusId, UserId};
pub use user::UserRole;
