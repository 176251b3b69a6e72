//! Product page and catalog lookup operations for the Admin API.

use tracing::instrument;

use super::{
    AdminClient, AdminShopifyError,
    queries::{GetCatalogMeta, GetProductPage, NoVariables, get_product_page},
};
use crate::shopify::types::{CatalogMeta, CollectionOption, ProductListQuery, ProductSortKey};

impl AdminClient {
    /// Get one cursor page of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(
        skip(self),
        fields(
            sort_key = query.sort_key.map_or("ID", ProductSortKey::as_str),
            size = query.page.size(),
        )
    )]
    pub async fn get_product_page(
        &self,
        query: ProductListQuery,
    ) -> Result<get_product_page::ProductConnection, AdminShopifyError> {
        let variables = get_product_page::Variables {
            query: query.query,
            sort_key: query.sort_key,
            reverse: query.reverse,
            first: query.page.first,
            last: query.page.last,
            after: query.page.after,
            before: query.page.before,
        };

        let response = self.execute::<GetProductPage>(variables).await?;

        tracing::debug!(
            count = response.products.edges.len(),
            has_next = response.products.page_info.has_next_page,
            "Loaded product page"
        );

        Ok(response.products)
    }

    /// Get the first 100 collections and product tags.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn get_catalog_meta(&self) -> Result<CatalogMeta, AdminShopifyError> {
        let response = self.execute::<GetCatalogMeta>(NoVariables {}).await?;

        Ok(CatalogMeta {
            collections: response
                .collections
                .into_nodes()
                .map(|c| CollectionOption {
                    id: c.id,
                    title: c.title,
                })
                .collect(),
            tags: response.product_tags.into_nodes().collect(),
        })
    }
}
