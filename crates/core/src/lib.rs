//! Banzai Core - Shared types library.
//!
//! This crate provides the types used by the Banzai admin dashboard:
//! - `admin` - Embedded store admin (dashboard, inventory, products pages)
//! - `integration-tests` - End-to-end checks against a running server
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Global ids, statuses, and the cursor pagination state machine

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
