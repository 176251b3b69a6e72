//! Integration tests for the Banzai admin app.
//!
//! The tests talk to a running server over HTTP and are `#[ignore]`d by
//! default.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the admin server against a development store
//! cargo run -p banzai-admin
//!
//! # Run the ignored tests
//! ADMIN_BASE_URL=http://localhost:3001 cargo test -p banzai-integration-tests -- --ignored
//! ```

use reqwest::{Client, redirect};

/// Base URL for the admin server (configurable via environment).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// Client that reports redirects instead of following them.
///
/// # Panics
///
/// Panics if the HTTP client cannot be built.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .redirect(redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}
