//! Where catalog pages come from.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::shopify::{
    AdminClient, AdminShopifyError, CatalogMeta, InventoryLevel, InventorySetCommand,
    ProductListQuery, queries::get_product_page::ProductConnection,
};

/// Remote reads and writes the page pipelines depend on.
///
/// [`AdminClient`] is the production implementation.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// One cursor page of products.
    async fn product_page(
        &self,
        query: ProductListQuery,
    ) -> Result<ProductConnection, AdminShopifyError>;

    /// Collection and tag filter options.
    async fn catalog_meta(&self) -> Result<CatalogMeta, AdminShopifyError>;

    /// Levels for the given numeric inventory item ids.
    async fn inventory_levels(
        &self,
        inventory_item_ids: &[String],
    ) -> Result<Vec<InventoryLevel>, AdminShopifyError>;

    /// Write one absolute available quantity.
    async fn set_inventory_level(
        &self,
        command: &InventorySetCommand,
    ) -> Result<(), AdminShopifyError>;
}

#[async_trait]
impl CatalogSource for AdminClient {
    async fn product_page(
        &self,
        query: ProductListQuery,
    ) -> Result<ProductConnection, AdminShopifyError> {
        self.get_product_page(query).await
    }

    async fn catalog_meta(&self) -> Result<CatalogMeta, AdminShopifyError> {
        self.get_catalog_meta().await
    }

    async fn inventory_levels(
        &self,
        inventory_item_ids: &[String],
    ) -> Result<Vec<InventoryLevel>, AdminShopifyError> {
        self.get_inventory_levels(inventory_item_ids).await
    }

    async fn set_inventory_level(
        &self,
        command: &InventorySetCommand,
    ) -> Result<(), AdminShopifyError> {
        AdminClient::set_inventory_level(self, command).await
    }
}
