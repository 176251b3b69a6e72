//! Joining product records with inventory levels.

use std::collections::{BTreeMap, HashMap};

use banzai_core::Cursored;

use super::{CatalogSource, records::ProductRecord};
use crate::shopify::{AdminShopifyError, InventoryLevel};

/// A product row on the inventory page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRow {
    /// The product.
    pub record: ProductRecord,
    /// Numeric inventory item id, empty when the product has no variant.
    pub inventory_item_id: String,
    /// Numeric location id, empty when no level was found.
    pub location_id: String,
    /// Units available.
    pub available: i64,
    /// Units committed.
    pub committed: i64,
}

impl Cursored for InventoryRow {
    fn cursor(&self) -> Option<&str> {
        self.record.cursor()
    }
}

/// Inventory item id to product id, for the items present on one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryItemIndex {
    products_by_item: BTreeMap<String, String>,
}

impl InventoryItemIndex {
    /// One pass over the page.
    #[must_use]
    pub fn build(records: &[ProductRecord]) -> Self {
        let products_by_item = records
            .iter()
            .filter_map(|r| {
                r.inventory_item_id
                    .as_ref()
                    .map(|item| (item.clone(), r.id.clone()))
            })
            .collect();
        Self { products_by_item }
    }

    /// Ids to look up, deduplicated and sorted.
    #[must_use]
    pub fn item_ids(&self) -> Vec<String> {
        self.products_by_item.keys().cloned().collect()
    }

    /// Product that owns an inventory item.
    #[must_use]
    pub fn product_for(&self, inventory_item_id: &str) -> Option<&str> {
        self.products_by_item
            .get(inventory_item_id)
            .map(String::as_str)
    }

    /// Whether no product on the page has an inventory item.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products_by_item.is_empty()
    }
}

/// Join records with levels.
///
/// Items with no level get `available = 0`, `committed = 0` and an empty
/// location. When an item has levels at several locations, the last one
/// returned wins.
#[must_use]
pub fn merge_levels(records: &[ProductRecord], levels: &[InventoryLevel]) -> Vec<InventoryRow> {
    let mut by_item: HashMap<&str, &InventoryLevel> = HashMap::with_capacity(levels.len());
    for level in levels {
        by_item.insert(level.inventory_item_id.as_str(), level);
    }

    records
        .iter()
        .map(|record| {
            let inventory_item_id = record.inventory_item_id.clone().unwrap_or_default();
            let level = by_item.get(inventory_item_id.as_str());
            InventoryRow {
                record: record.clone(),
                location_id: level.map(|l| l.location_id.clone()).unwrap_or_default(),
                available: level.map_or(0, |l| l.available),
                committed: level.map_or(0, |l| l.committed),
                inventory_item_id,
            }
        })
        .collect()
}

/// Look up levels for the items on a page and merge them in.
///
/// A page without inventory items skips the remote call.
///
/// # Errors
///
/// Returns an error if the level lookup fails.
pub async fn load_inventory_rows<S: CatalogSource + ?Sized>(
    source: &S,
    records: &[ProductRecord],
) -> Result<Vec<InventoryRow>, AdminShopifyError> {
    let index = InventoryItemIndex::build(records);
    if index.is_empty() {
        return Ok(merge_levels(records, &[]));
    }

    let levels = source.inventory_levels(&index.item_ids()).await?;
    for level in &levels {
        if index.product_for(&level.inventory_item_id).is_none() {
            tracing::debug!(
                inventory_item_id = %level.inventory_item_id,
                "Ignoring level for an item not on this page"
            );
        }
    }

    Ok(merge_levels(records, &levels))
}

#[cfg(test)]
mod tests {
    use banzai_core::ProductStatus;

    use super::*;
    use crate::catalog::source::MockCatalogSource;

    fn record(id: &str, item: Option<&str>) -> ProductRecord {
        ProductRecord {
            id: format!("gid://shopify/Product/{id}"),
            title: format!("Product {id}"),
            status: ProductStatus::Active,
            created_at: None,
            published_at: None,
            image: None,
            variant_image: None,
            sku: None,
            barcode: None,
            price: None,
            description_html: None,
            collections: vec![],
            quantity: 0,
            inventory_item_id: item.map(String::from),
            cursor: Some(format!("cursor-{id}")),
        }
    }

    fn level(item: &str, location: &str, available: i64) -> InventoryLevel {
        InventoryLevel {
            inventory_item_id: item.to_string(),
            location_id: location.to_string(),
            available,
            committed: 1,
        }
    }

    #[test]
    fn test_missing_level_defaults_like_genuine_zero() {
        let records = vec![record("1", Some("41")), record("2", Some("42"))];
        let genuine_zero = InventoryLevel {
            inventory_item_id: "42".to_string(),
            location_id: String::new(),
            available: 0,
            committed: 0,
        };

        let rows = merge_levels(&records, &[genuine_zero]);

        assert_eq!(rows[0].available, 0);
        assert_eq!(rows[0].committed, 0);
        assert_eq!(rows[0].location_id, "");
        assert_eq!(
            (rows[0].available, rows[0].committed, rows[0].location_id.as_str()),
            (rows[1].available, rows[1].committed, rows[1].location_id.as_str())
        );
    }

    #[test]
    fn test_last_level_wins_for_multiple_locations() {
        let records = vec![record("1", Some("41"))];
        let rows = merge_levels(&records, &[level("41", "7", 3), level("41", "8", 9)]);
        assert_eq!(rows[0].location_id, "8");
        assert_eq!(rows[0].available, 9);
    }

    #[test]
    fn test_merge_leaves_inputs_untouched() {
        let records = vec![record("1", Some("41"))];
        let levels = vec![level("41", "7", 3)];
        let before = (records.clone(), levels.clone());

        let rows = merge_levels(&records, &levels);

        assert_eq!((records, levels), before);
        assert_eq!(rows[0].record.title, "Product 1");
        assert_eq!(rows[0].cursor(), Some("cursor-1"));
    }

    #[test]
    fn test_index_dedupes_item_ids() {
        let records = vec![
            record("1", Some("41")),
            record("2", None),
            record("3", Some("41")),
            record("4", Some("40")),
        ];
        let index = InventoryItemIndex::build(&records);
        assert_eq!(index.item_ids(), vec!["40", "41"]);
        assert_eq!(index.product_for("40"), Some("gid://shopify/Product/4"));
    }

    #[tokio::test]
    async fn test_no_inventory_items_skips_lookup() {
        let mut source = MockCatalogSource::new();
        source.expect_inventory_levels().never();

        let rows = load_inventory_rows(&source, &[record("1", None)]).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].inventory_item_id, "");
        assert_eq!(rows[0].available, 0);
    }

    #[tokio::test]
    async fn test_lookup_requests_only_observed_ids() {
        let mut source = MockCatalogSource::new();
        source
            .expect_inventory_levels()
            .once()
            .withf(|ids| ids == ["41".to_string(), "42".to_string()])
            .returning(|_| Ok(vec![level("41", "7", 5)]));

        let records = vec![record("1", Some("41")), record("2", Some("42"))];
        let rows = load_inventory_rows(&source, &records).await.unwrap();

        assert_eq!(rows[0].available, 5);
        assert_eq!(rows[0].location_id, "7");
        assert_eq!(rows[1].available, 0);
    }

    #[tokio::test]
    async fn test_lookup_failure_propagates() {
        let mut source = MockCatalogSource::new();
        source
            .expect_inventory_levels()
            .once()
            .returning(|_| Err(AdminShopifyError::Unauthorized("revoked".to_string())));

        let result = load_inventory_rows(&source, &[record("1", Some("41"))]).await;
        assert!(matches!(result, Err(AdminShopifyError::Unauthorized(_))));
    }
}
