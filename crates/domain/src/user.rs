//! User directory domain types.

use std::str::FromStr;

use asset_manager_core::AppError;
use serde::{Deserialize, Serialize};

/// Role granted to a user account.
///
/// Stored and serialized with the `ROLE_` prefix the rest of the system
/// already uses; display layers strip the prefix themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    /// Administrator with access to the management screens.
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
    /// Regular member with dashboard access only.
    #[serde(rename = "ROLE_USER")]
    Member,
}

impl UserRole {
    /// Returns the storage string for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ROLE_ADMIN",
            Self::Member => "ROLE_USER",
        }
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ROLE_ADMIN" => Ok(Self::Admin),
            "ROLE_USER" => Ok(Self::Member),
            _ => Err(AppError::Validation(format!("unknown user role '{value}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::UserRole;

    #[test]
    fn roles_round_trip_through_storage_strings() {
        assert_eq!("ROLE_ADMIN".parse::<UserRole>().ok(), Some(UserRole::Admin));
        assert_eq!("ROLE_USER".parse::<UserRole>().ok(), Some(UserRole::Member));
        assert_eq!(UserRole::Member.as_str(), "ROLE_USER");
    }

    #[test]
    fn unknown_role_string_is_rejected() {
        assert!("ROLE_SUPERVISOR".parse::<UserRole>().is_err());
    }
}
