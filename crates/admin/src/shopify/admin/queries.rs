//! GraphQL query definitions for Shopify Admin API.
//!
//! Each operation is a unit struct implementing [`GraphQLQuery`] plus a
//! snake_case module holding its `Variables` and `ResponseData`, the same
//! layout `graphql_client` codegen produces. Response shapes are written out
//! by hand and cover only the fields the documents select; nested lists
//! default to empty so a missing connection never fails deserialization.

use graphql_client::{GraphQLQuery, QueryBody};
use serde::{Deserialize, Serialize};

// =============================================================================
// Shared connection shapes
// =============================================================================

/// `{ edges { node } }` with no page info.
#[derive(Debug, Clone, Deserialize)]
pub struct Connection<T> {
    /// Edges in order.
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

impl<T> Connection<T> {
    /// First node, if any.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.edges.first().map(|e| &e.node)
    }

    /// Consume into nodes.
    pub fn into_nodes(self) -> impl Iterator<Item = T> {
        self.edges.into_iter().map(|e| e.node)
    }
}

/// Edge without a cursor.
#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    /// The node.
    pub node: T,
}

/// Serializes as an empty object so operations without variables still send
/// `"variables": {}`.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct NoVariables {}

/// Image `url` and `altText`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageNode {
    /// Image URL.
    pub url: Option<String>,
    /// Alt text.
    pub alt_text: Option<String>,
}

// =============================================================================
// GetProductPage
// =============================================================================

/// One cursor page of products.
pub struct GetProductPage;

pub mod get_product_page {
    use banzai_core::{PageWindow, ProductStatus};
    use serde::{Deserialize, Serialize};

    use super::{Connection, ImageNode};
    use crate::shopify::ProductSortKey;

    pub const OPERATION_NAME: &str = "GetProductPage";
    pub const QUERY: &str = include_str!("../../../graphql/admin/queries/products.graphql");

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub query: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub sort_key: Option<ProductSortKey>,
        pub reverse: bool,
        pub first: Option<i64>,
        pub last: Option<i64>,
        pub after: Option<String>,
        pub before: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub products: ProductConnection,
    }

    /// `products` connection.
    #[derive(Debug, Clone, Default, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductConnection {
        #[serde(default)]
        pub page_info: PageWindow,
        #[serde(default)]
        pub edges: Vec<ProductEdge>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductEdge {
        pub cursor: Option<String>,
        pub node: ProductNode,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductNode {
        pub id: String,
        pub title: String,
        #[serde(default)]
        pub status: ProductStatus,
        pub total_inventory: Option<i64>,
        pub created_at: Option<String>,
        pub published_at: Option<String>,
        pub description_html: Option<String>,
        #[serde(default)]
        pub images: Option<Connection<ImageNode>>,
        #[serde(default)]
        pub collections: Option<Connection<CollectionTitle>>,
        #[serde(default)]
        pub variants: Option<Connection<VariantNode>>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct CollectionTitle {
        pub title: String,
    }

    #[derive(Debug, Clone, Default, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct VariantNode {
        pub sku: Option<String>,
        pub price: Option<String>,
        pub barcode: Option<String>,
        pub inventory_quantity: Option<i64>,
        pub image: Option<ImageNode>,
        pub inventory_item: Option<InventoryItemRef>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct InventoryItemRef {
        pub id: String,
    }
}

impl GraphQLQuery for GetProductPage {
    type Variables = get_product_page::Variables;
    type ResponseData = get_product_page::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: get_product_page::QUERY,
            operation_name: get_product_page::OPERATION_NAME,
        }
    }
}

// =============================================================================
// GetCatalogMeta
// =============================================================================

/// Collections and product tags for the filter dropdowns.
pub struct GetCatalogMeta;

pub mod get_catalog_meta {
    use serde::Deserialize;

    use super::Connection;

    pub const OPERATION_NAME: &str = "GetCatalogMeta";
    pub const QUERY: &str = include_str!("../../../graphql/admin/queries/catalog_meta.graphql");

    pub type Variables = super::NoVariables;

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        #[serde(default)]
        pub collections: Connection<CollectionNode>,
        #[serde(default)]
        pub product_tags: Connection<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct CollectionNode {
        pub id: String,
        pub title: String,
    }
}

impl GraphQLQuery for GetCatalogMeta {
    type Variables = get_catalog_meta::Variables;
    type ResponseData = get_catalog_meta::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: get_catalog_meta::QUERY,
            operation_name: get_catalog_meta::OPERATION_NAME,
        }
    }
}
