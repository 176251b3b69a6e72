//! Domain types for Shopify Admin API.
//!
//! These types are the arguments and results of [`super::AdminClient`]
//! methods, separate from the raw GraphQL response shapes in
//! [`super::queries`].

pub mod inventory;
pub mod product;

// Re-export all types for convenience
pub use inventory::*;
pub use product::*;
