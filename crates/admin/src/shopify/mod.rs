//! Shopify Admin API client.
//!
//! # Security
//!
//! The admin access token grants read/write access to products and inventory
//! for the whole store. It is held in a [`secrecy::SecretString`] and only
//! exposed when building the request header.
//!
//! # Architecture
//!
//! - GraphQL (`graphql_client` envelopes) for product pages and catalog lookups
//! - REST for inventory levels, which the dashboard reads and sets by numeric id
//! - Direct API calls per request; nothing is cached locally
//!
//! # Example
//!
//! ```rust,ignore
//! use banzai_admin::shopify::{AdminClient, ProductListQuery};
//! use banzai_core::PageRequest;
//!
//! let client = AdminClient::new(&config.shopify)?;
//!
//! let query = ProductListQuery::newest(PageRequest::first_page(25)?);
//! let page = client.get_product_page(query).await?;
//! let ids: Vec<String> = vec!["4410".into()];
//! let levels = client.get_inventory_levels(&ids).await?;
//! ```

mod admin;
pub mod types;

pub use admin::AdminClient;
pub use admin::queries;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when interacting with Shopify Admin API.
#[derive(Debug, Error)]
pub enum AdminShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The request was rejected (e.g., invalid quantity or unknown location).
    #[error("User error: {0}")]
    UserError(String),

    /// Any other non-success status.
    #[error("Unexpected status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },
}

/// A GraphQL error returned by the Shopify Admin API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<String>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

impl GraphQLError {
    /// An error with only a message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: vec![],
            path: vec![],
        }
    }
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.clone())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_shopify_error_display() {
        let err = AdminShopifyError::NotFound("location 12".to_string());
        assert_eq!(err.to_string(), "Not found: location 12");
    }

    #[test]
    fn test_graphql_error_formatting() {
        let errors = vec![
            GraphQLError::message("Field 'totalInventory' doesn't exist"),
            GraphQLError::message("Throttled"),
        ];
        let err = AdminShopifyError::GraphQL(errors);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: Field 'totalInventory' doesn't exist; Throttled"
        );
    }

    #[test]
    fn test_rate_limited_error() {
        let err = AdminShopifyError::RateLimited(2);
        assert_eq!(err.to_string(), "Rate limited, retry after 2 seconds");
    }

    #[test]
    fn test_status_error() {
        let err = AdminShopifyError::Status {
            status: 503,
            body: "upstream unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "Unexpected status 503: upstream unavailable");
    }
}
