//! Application state shared across handlers.

use std::sync::Arc;

use crate::{config::AdminConfig, i18n::Messages, shopify::AdminClient};

/// Application state shared across all handlers.
///
/// Immutable after startup; cloning is an `Arc` bump.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    shopify: AdminClient,
    messages: Messages,
}

impl AppState {
    /// Build state from its parts.
    #[must_use]
    pub fn new(config: AdminConfig, shopify: AdminClient, messages: Messages) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                shopify,
                messages,
            }),
        }
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get the Shopify Admin API client.
    #[must_use]
    pub fn shopify(&self) -> &AdminClient {
        &self.inner.shopify
    }

    /// Get the message bundle.
    #[must_use]
    pub fn messages(&self) -> &Messages {
        &self.inner.messages
    }
}
