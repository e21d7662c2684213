//! Asset domain types and validation rules.

use asset_manager_core::{AppError, AppResult, NonEmptyString};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ids::{CategoryId, StatusId, UserId};

/// Validated asset payload, ready for persistence.
///
/// Construction is the single place the asset invariants are checked;
/// referential integrity of the foreign keys is the schema's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAsset {
    name: NonEmptyString,
    description: String,
    cost: i64,
    category_id: CategoryId,
    status_id: StatusId,
    purchase_date: NaiveDate,
    warranty_expiry: Option<NaiveDate>,
    image_url: Option<String>,
    assigned_user_id: Option<UserId>,
}

/// Input payload used to construct a validated asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAssetInput {
    /// Display name of the asset.
    pub name: String,
    /// Free-text description; may be empty.
    pub description: String,
    /// Acquisition cost in minor currency units.
    pub cost: i64,
    /// Category the asset belongs to.
    pub category_id: CategoryId,
    /// Lifecycle status of the asset.
    pub status_id: StatusId,
    /// Date the asset was purchased.
    pub purchase_date: NaiveDate,
    /// Optional warranty expiry date.
    pub warranty_expiry: Option<NaiveDate>,
    /// Optional image URL shown by the dashboard.
    pub image_url: Option<String>,
    /// User the asset is assigned to, if any.
    pub assigned_user_id: Option<UserId>,
}

impl NewAsset {
    /// Creates a validated asset payload.
    pub fn new(input: NewAssetInput) -> AppResult<Self> {
        let NewAssetInput {
            name,
            description,
            cost,
            category_id,
            status_id,
            purchase_date,
            warranty_expiry,
            image_url,
            assigned_user_id,
        } = input;

        if cost < 0 {
            return Err(AppError::Validation(
                "asset cost must not be negative".to_owned(),
            ));
        }

        if let Some(expiry) = warranty_expiry
            && expiry < purchase_date
        {
            return Err(AppError::Validation(
                "warranty expiry must not precede the purchase date".to_owned(),
            ));
        }

        let image_url = image_url.and_then(|value| {
            let trimmed = value.trim().to_owned();
            (!trimmed.is_empty()).then_some(trimmed)
        });

        Ok(Self {
            name: NonEmptyString::new(name)?,
            description: description.trim().to_owned(),
            cost,
            category_id,
            status_id,
            purchase_date,
            warranty_expiry,
            image_url,
            assigned_user_id,
        })
    }

    /// Returns the asset display name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the free-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Returns the acquisition cost in minor currency units.
    #[must_use]
    pub fn cost(&self) -> i64 {
        self.cost
    }

    /// Returns the category reference.
    #[must_use]
    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    /// Returns the status reference.
    #[must_use]
    pub fn status_id(&self) -> StatusId {
        self.status_id
    }

    /// Returns the purchase date.
    #[must_use]
    pub fn purchase_date(&self) -> NaiveDate {
        self.purchase_date
    }

    /// Returns the warranty expiry date, if any.
    #[must_use]
    pub fn warranty_expiry(&self) -> Option<NaiveDate> {
        self.warranty_expiry
    }

    /// Returns the image URL, if any.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Returns the assigned user, if any.
    #[must_use]
    pub fn assigned_user_id(&self) -> Option<UserId> {
        self.assigned_user_id
    }
}
