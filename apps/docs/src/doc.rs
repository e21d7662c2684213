//! OpenAPI document for the Asset Manager backend.
//!
//! The persistence records stay framework-agnostic; this module mirrors
//! them as `ToSchema` wrappers so the generated document can describe
//! the data model without coupling the other crates to utoipa.

use utoipa::{OpenApi, ToSchema};

/// OpenAPI schema for stored user accounts.
#[derive(ToSchema)]
#[schema(as = User)]
#[expect(dead_code, reason = "referenced only by the OpenAPI derive")]
struct UserSchema {
    /// Unique user identifier.
    #[schema(example = 1)]
    id: i64,
    /// Unique login name.
    #[schema(example = "asmith")]
    username: String,
    /// Unique email address.
    #[schema(example = "asmith@example.com")]
    email: String,
    /// Granted role.
    #[schema(example = "ROLE_USER")]
    role: String,
}

/// OpenAPI schema for stored assets.
#[derive(ToSchema)]
#[schema(as = Asset)]
#[expect(dead_code, reason = "referenced only by the OpenAPI derive")]
struct AssetSchema {
    /// Unique asset identifier.
    #[schema(example = 42)]
    id: i64,
    /// Display name.
    #[schema(example = "MacBook Pro 14")]
    name: String,
    /// Free-text description.
    #[schema(example = "Engineering laptop")]
    description: String,
    /// Acquisition cost in minor currency units.
    #[schema(example = 219900)]
    cost: i64,
    /// Identifier of the owning category.
    #[schema(example = 3)]
    category_id: i64,
    /// Identifier of the lifecycle status.
    #[schema(example = 1)]
    status_id: i64,
    /// Purchase date in ISO 8601 format.
    #[schema(example = "2024-05-10")]
    purchase_date: String,
    /// Warranty expiry date in ISO 8601 format, if any.
    #[schema(example = "2026-05-10")]
    warranty_expiry: Option<String>,
    /// Image URL shown by the dashboard, if any.
    image_url: Option<String>,
    /// Identifier of the assigned user, if any.
    #[schema(example = 7)]
    assigned_user_id: Option<i64>,
}

/// OpenAPI schema for asset categories.
#[derive(ToSchema)]
#[schema(as = Category)]
#[expect(dead_code, reason = "referenced only by the OpenAPI derive")]
struct CategorySchema {
    /// Unique category identifier.
    #[schema(example = 3)]
    id: i64,
    /// Unique category name.
    #[schema(example = "Laptops")]
    name: String,
}

/// OpenAPI schema for asset lifecycle statuses.
#[derive(ToSchema)]
#[schema(as = Status)]
#[expect(dead_code, reason = "referenced only by the OpenAPI derive")]
struct StatusSchema {
    /// Unique status identifier.
    #[schema(example = 1)]
    id: i64,
    /// Unique status name.
    #[schema(example = "AVAILABLE")]
    name: String,
}

/// OpenAPI document published for the Asset Manager backend.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Asset Manager API",
        version = "1.0.0",
        description = "Documentation for Asset Manager Backend"
    ),
    components(schemas(UserSchema, AssetSchema, CategorySchema, StatusSchema))
)]
pub struct ApiDoc;
