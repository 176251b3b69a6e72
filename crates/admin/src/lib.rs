//! Banzai Apps admin library.
//!
//! An embedded Shopify admin app: a dashboard, an inventory page with batch
//! quantity updates, and a filterable products page, all rendered on the
//! server from the store's Admin API.
//!
//! # Security
//!
//! This crate holds an Admin API access token with inventory write scope.
//! Session handling is delegated to the embedding admin; the app only sets
//! the framing policy that lets the admin host it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod components;
pub mod config;
pub mod error;
pub mod filters;
pub mod i18n;
pub mod middleware;
pub mod routes;
pub mod shopify;
pub mod state;
