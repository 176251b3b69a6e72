//! Catalog page pipelines.
//!
//! Each page fetches one cursor window of products, flattens it into
//! [`records::ProductRecord`]s, optionally merges inventory levels, applies
//! the filters the remote can't, and resolves prev/next navigation.
//!
//! - [`source`] - The remote seam ([`CatalogSource`])
//! - [`records`] - Flat product records
//! - [`merge`] - Product/inventory join
//! - [`filtering`] - URL filter state and post-fetch filters
//! - [`batch`] - Batch inventory set
//! - [`pages`] - Dashboard, inventory and products loaders

pub mod batch;
pub mod filtering;
pub mod merge;
pub mod pages;
pub mod records;
pub mod source;

use banzai_core::PaginationError;
use thiserror::Error;

use crate::shopify::AdminShopifyError;

pub use filtering::{FilterState, ListParams};
pub use pages::{DashboardData, InventoryPage, ProductsPage};
pub use records::{ProductRecord, QuantitySource};
pub use source::CatalogSource;

/// Errors loading a catalog page.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A remote call failed.
    #[error(transparent)]
    Shopify(#[from] AdminShopifyError),

    /// The page request was malformed.
    #[error("Invalid page request: {0}")]
    Pagination(#[from] PaginationError),
}
