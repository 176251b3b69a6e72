//! Core types for Banzai Admin.
//!
//! This module provides type-safe wrappers for catalog concepts shared by the
//! admin server and its tests.

pub mod id;
pub mod pagination;
pub mod status;

pub use id::short_id;
pub use pagination::{
    Cursored, Direction, PageNavigation, PageRequest, PageWindow, PaginationError,
};
pub use status::{AdjustmentReason, ProductStatus};
