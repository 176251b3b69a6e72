//! Status enums for catalog entities.

use serde::{Deserialize, Serialize};

/// Product status as reported by the Admin API.
///
/// The platform may add statuses over time; anything unrecognized lands in
/// [`ProductStatus::Other`] instead of failing deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    /// Visible on the storefront.
    Active,
    /// Work in progress, not visible.
    #[default]
    Draft,
    /// Hidden from the storefront and admin lists.
    Archived,
    /// Any status this application does not know about.
    #[serde(other)]
    Other,
}

impl ProductStatus {
    /// Parse a status as written in the API (`ACTIVE`) or in a URL (`active`).
    #[must_use]
    pub fn from_param(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Self::Active,
            "DRAFT" => Self::Draft,
            "ARCHIVED" => Self::Archived,
            _ => Self::Other,
        }
    }

    /// Capitalized label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Draft => "Draft",
            Self::Archived => "Archived",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Reason a user gives when adjusting available inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentReason {
    /// Correction to the counted quantity.
    #[default]
    Correction,
    /// Stock was damaged.
    Damaged,
    /// Stock was lost.
    Lost,
}

impl AdjustmentReason {
    /// All reasons, in display order.
    pub const ALL: [Self; 3] = [Self::Correction, Self::Damaged, Self::Lost];

    /// Parse a form value, defaulting to [`AdjustmentReason::Correction`].
    #[must_use]
    pub fn from_param(value: &str) -> Self {
        match value.trim() {
            "damaged" => Self::Damaged,
            "lost" => Self::Lost,
            _ => Self::Correction,
        }
    }

    /// Form value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Correction => "correction",
            Self::Damaged => "damaged",
            Self::Lost => "lost",
        }
    }
}

impl std::fmt::Display for AdjustmentReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
