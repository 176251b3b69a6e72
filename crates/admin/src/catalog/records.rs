//! Flat product records built from product connection edges.
//!
//! Singleton lists (first image, first variant) collapse to an `Option`, and
//! optional text stays optional: display placeholders are a template concern.

use banzai_core::{Cursored, PageWindow, ProductStatus, short_id};

use crate::shopify::queries::{
    ImageNode,
    get_product_page::{ProductConnection, ProductEdge},
};

/// Shown when a product has neither a variant image nor a product image.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://cdn.shopify.com/s/files/1/0533/2089/files/placeholder-image.png";

/// Alt text for the placeholder image.
pub const PLACEHOLDER_IMAGE_ALT: &str = "No image";

/// Which remote number a record's `quantity` carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantitySource {
    /// Product-level `totalInventory` (dashboard, inventory page).
    TotalInventory,
    /// First variant's `inventoryQuantity` (products page).
    FirstVariant,
}

/// An image URL with optional alt text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Image URL.
    pub url: String,
    /// Alt text.
    pub alt: Option<String>,
}

impl ImageRef {
    fn from_node(node: &ImageNode) -> Option<Self> {
        let url = non_empty(node.url.clone())?;
        Some(Self {
            url,
            alt: non_empty(node.alt_text.clone()),
        })
    }
}

/// A product flattened for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    /// Full global id.
    pub id: String,
    /// Product title.
    pub title: String,
    /// Product status.
    pub status: ProductStatus,
    /// ISO-8601 creation time.
    pub created_at: Option<String>,
    /// ISO-8601 publication time.
    pub published_at: Option<String>,
    /// First product image.
    pub image: Option<ImageRef>,
    /// First variant's image.
    pub variant_image: Option<ImageRef>,
    /// First variant's SKU.
    pub sku: Option<String>,
    /// First variant's barcode.
    pub barcode: Option<String>,
    /// First variant's price, as the decimal string the API returns.
    pub price: Option<String>,
    /// Description HTML.
    pub description_html: Option<String>,
    /// Collection titles, in order.
    pub collections: Vec<String>,
    /// Stock count, see [`QuantitySource`].
    pub quantity: i64,
    /// Numeric id of the first variant's inventory item.
    pub inventory_item_id: Option<String>,
    /// Cursor of the edge this record came from.
    pub cursor: Option<String>,
}

impl ProductRecord {
    /// Flatten one connection edge.
    #[must_use]
    pub fn from_edge(edge: ProductEdge, quantity: QuantitySource) -> Self {
        let ProductEdge { cursor, node } = edge;

        let image = node
            .images
            .as_ref()
            .and_then(|images| images.first())
            .and_then(ImageRef::from_node);
        let collections = node
            .collections
            .map(|c| c.into_nodes().map(|c| c.title).collect())
            .unwrap_or_default();
        let variant = node.variants.and_then(|v| v.into_nodes().next());

        let quantity = match quantity {
            QuantitySource::TotalInventory => node.total_inventory,
            QuantitySource::FirstVariant => variant.as_ref().and_then(|v| v.inventory_quantity),
        }
        .unwrap_or(0);

        let (sku, barcode, price, variant_image, inventory_item_id) = match variant {
            Some(v) => (
                non_empty(v.sku),
                non_empty(v.barcode),
                non_empty(v.price),
                v.image.as_ref().and_then(ImageRef::from_node),
                v.inventory_item
                    .map(|item| short_id(&item.id).to_string())
                    .filter(|id| !id.is_empty()),
            ),
            None => (None, None, None, None, None),
        };

        Self {
            id: node.id,
            title: node.title,
            status: node.status,
            created_at: non_empty(node.created_at),
            published_at: non_empty(node.published_at),
            image,
            variant_image,
            sku,
            barcode,
            price,
            description_html: non_empty(node.description_html),
            collections,
            quantity,
            inventory_item_id,
            cursor,
        }
    }

    /// Numeric product id, for URLs and form field names.
    #[must_use]
    pub fn short_id(&self) -> &str {
        short_id(&self.id)
    }

    /// Variant image, then product image, then the placeholder.
    #[must_use]
    pub fn display_image(&self) -> (&str, &str) {
        match self.variant_image.as_ref().or(self.image.as_ref()) {
            Some(image) => (
                image.url.as_str(),
                image.alt.as_deref().unwrap_or(PLACEHOLDER_IMAGE_ALT),
            ),
            None => (PLACEHOLDER_IMAGE_URL, PLACEHOLDER_IMAGE_ALT),
        }
    }

    /// Whether the product belongs to a collection with this title.
    #[must_use]
    pub fn in_collection(&self, title: &str) -> bool {
        self.collections.iter().any(|c| c == title)
    }
}

impl Cursored for ProductRecord {
    fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }
}

/// Records of one loaded window plus its page info.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordWindow {
    /// Records in remote order.
    pub records: Vec<ProductRecord>,
    /// Page boundaries.
    pub window: PageWindow,
}

impl RecordWindow {
    /// Flatten a whole connection.
    #[must_use]
    pub fn from_connection(connection: ProductConnection, quantity: QuantitySource) -> Self {
        Self {
            records: connection
                .edges
                .into_iter()
                .map(|edge| ProductRecord::from_edge(edge, quantity))
                .collect(),
            window: connection.page_info,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
