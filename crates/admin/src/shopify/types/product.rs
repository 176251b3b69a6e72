//! Product list arguments and catalog lookups.

use banzai_core::PageRequest;
use serde::{Deserialize, Serialize};

// =============================================================================
// Sorting
// =============================================================================

/// Server-side sort order for the products connection (`ProductSortKeys`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductSortKey {
    /// Creation time.
    #[default]
    CreatedAt,
    /// Publication time.
    PublishedAt,
    /// Alphabetical by title.
    Title,
    /// Last update time.
    UpdatedAt,
}

impl ProductSortKey {
    /// All sort keys offered in the UI, in display order.
    pub const ALL: [Self; 4] = [
        Self::CreatedAt,
        Self::PublishedAt,
        Self::Title,
        Self::UpdatedAt,
    ];

    /// Parse the `sortKey` query parameter. Unknown values fall back to
    /// [`ProductSortKey::CreatedAt`].
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("PUBLISHED_AT") => Self::PublishedAt,
            Some("TITLE") => Self::Title,
            Some("UPDATED_AT") => Self::UpdatedAt,
            _ => Self::CreatedAt,
        }
    }

    /// API and query parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "CREATED_AT",
            Self::PublishedAt => "PUBLISHED_AT",
            Self::Title => "TITLE",
            Self::UpdatedAt => "UPDATED_AT",
        }
    }
}

// =============================================================================
// Product List
// =============================================================================

/// Arguments for one page of the products connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductListQuery {
    /// Search syntax filter (`status:draft AND tag:summer`).
    pub query: Option<String>,
    /// Sort order; `None` leaves the API's default (by id).
    pub sort_key: Option<ProductSortKey>,
    /// Reverse the sort order.
    pub reverse: bool,
    /// Cursor window.
    pub page: PageRequest,
}

impl ProductListQuery {
    /// Newest first, no filter.
    #[must_use]
    pub const fn newest(page: PageRequest) -> Self {
        Self {
            query: None,
            sort_key: Some(ProductSortKey::CreatedAt),
            reverse: true,
            page,
        }
    }

    /// The API's default order, no filter.
    #[must_use]
    pub const fn default_order(page: PageRequest) -> Self {
        Self {
            query: None,
            sort_key: None,
            reverse: false,
            page,
        }
    }

    /// Add a search filter.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }
}

// =============================================================================
// Catalog Lookups
// =============================================================================

/// A collection as offered in the products filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionOption {
    /// Collection global id.
    pub id: String,
    /// Collection title.
    pub title: String,
}

/// Collections and tags available for filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogMeta {
    /// First 100 collections.
    pub collections: Vec<CollectionOption>,
    /// First 100 product tags.
    pub tags: Vec<String>,
}

impl CatalogMeta {
    /// Title of the collection whose id (full or short) matches `id`.
    #[must_use]
    pub fn collection_title(&self, id: &str) -> Option<&str> {
        let wanted = banzai_core::short_id(id);
        self.collections
            .iter()
            .find(|c| c.id == id || banzai_core::short_id(&c.id) == wanted)
            .map(|c| c.title.as_str())
    }
}
