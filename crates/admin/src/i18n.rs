//! English message bundle.
//!
//! The bundle is compiled into the binary and parsed once at startup; a
//! malformed bundle fails [`Messages::load`], never a render.

use serde::Deserialize;

const EN_MESSAGES: &str = include_str!("../locales/en.json");

/// All user-facing text.
#[derive(Debug, Clone, Deserialize)]
pub struct Messages {
    pub app_title: String,
    pub nav: NavMessages,
    pub common: CommonMessages,
    pub columns: ColumnMessages,
    pub dashboard: DashboardMessages,
    pub inventory: InventoryMessages,
    pub products: ProductsMessages,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NavMessages {
    pub home: String,
    pub products: String,
    pub inventory: String,
    pub drafts: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommonMessages {
    pub all: String,
    pub prev: String,
    pub next: String,
    pub apply: String,
    pub clear: String,
    pub dismiss: String,
    pub empty: String,
    pub product_singular: String,
    pub product_plural: String,
}

/// Table headings.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnMessages {
    pub image: String,
    pub title: String,
    pub sku: String,
    pub status: String,
    pub inventory: String,
    pub collections: String,
    pub committed: String,
    pub available: String,
    pub on_hand: String,
    pub barcode: String,
    pub price: String,
    pub available_qty: String,
    pub created: String,
    pub published: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardMessages {
    pub title: String,
    pub features_heading: String,
    pub features: Vec<String>,
    pub recent: String,
    pub low_stock: String,
    pub drafts: String,
    pub go_products: String,
    pub go_inventory: String,
    pub go_drafts: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InventoryMessages {
    pub title: String,
    pub collection_filter: String,
    pub save_selected: String,
    pub adjust_available: String,
    pub current: String,
    pub adjust_by: String,
    pub reason: String,
    pub reason_correction: String,
    pub reason_damaged: String,
    pub reason_lost: String,
    pub updated: String,
    pub nothing_to_update: String,
    pub partial_failure: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductsMessages {
    pub title: String,
    pub search: String,
    pub status: String,
    pub status_active: String,
    pub status_draft: String,
    pub collection: String,
    pub tag: String,
    pub sort_by: String,
    pub sort_created: String,
    pub sort_published: String,
    pub sort_title: String,
    pub sort_updated: String,
    pub descending: String,
    pub ascending: String,
}

impl Messages {
    /// Parse the embedded English bundle.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundle does not match [`Messages`].
    pub fn load() -> Result<Self, serde_json::Error> {
        serde_json::from_str(EN_MESSAGES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_bundle_parses() {
        let messages = Messages::load().unwrap();
        assert_eq!(messages.dashboard.title, "Banzai Apps Dashboard");
        assert_eq!(messages.dashboard.features.len(), 3);
        assert_eq!(messages.inventory.updated, "Inventory updated");
    }

    #[test]
    fn test_bundle_missing_section_is_rejected() {
        let result: Result<Messages, _> = serde_json::from_str(r#"{"app_title": "x"}"#);
        assert!(result.is_err());
    }
}
