//! Page loaders: fetch, reshape, merge, filter, paginate.

use banzai_core::{PageNavigation, PageRequest};

use super::{
    CatalogError, CatalogSource,
    filtering::{FilterState, distinct_collections, filter_by_collection, select_low_stock},
    merge::{InventoryRow, load_inventory_rows},
    records::{ProductRecord, QuantitySource, RecordWindow},
};
use crate::shopify::{CatalogMeta, ProductListQuery};

/// Rows in each dashboard table.
pub const DASHBOARD_SLICE_SIZE: u32 = 5;
/// Stock below this counts as low.
pub const LOW_STOCK_THRESHOLD: i64 = 6;
/// Low-stock candidates fetched per displayed row.
pub const LOW_STOCK_OVERFETCH: u32 = 4;
/// Products per inventory page.
pub const INVENTORY_PAGE_SIZE: u32 = 20;
/// Products per products page.
pub const PRODUCTS_PAGE_SIZE: u32 = 25;

/// The three dashboard tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardData {
    /// Newest products.
    pub recent: Vec<ProductRecord>,
    /// Lowest stock under the threshold, ascending.
    pub low_stock: Vec<ProductRecord>,
    /// Newest drafts.
    pub drafts: Vec<ProductRecord>,
}

/// Load the dashboard.
///
/// The three slices are fetched concurrently; if any fails, the whole load
/// fails.
///
/// # Errors
///
/// Returns the first remote failure.
pub async fn load_dashboard<S: CatalogSource + ?Sized>(
    source: &S,
) -> Result<DashboardData, CatalogError> {
    let recent = ProductListQuery::newest(PageRequest::first_page(DASHBOARD_SLICE_SIZE)?);
    let low_stock = ProductListQuery::default_order(PageRequest::first_page(
        DASHBOARD_SLICE_SIZE * LOW_STOCK_OVERFETCH,
    )?)
    .with_query(format!("inventory_total:<{LOW_STOCK_THRESHOLD}"));
    let drafts = ProductListQuery::newest(PageRequest::first_page(DASHBOARD_SLICE_SIZE)?)
        .with_query("status:draft");

    let (recent, low_stock, drafts) = tokio::try_join!(
        source.product_page(recent),
        source.product_page(low_stock),
        source.product_page(drafts),
    )?;

    let records = |connection| {
        RecordWindow::from_connection(connection, QuantitySource::TotalInventory).records
    };

    Ok(DashboardData {
        recent: records(recent),
        low_stock: select_low_stock(
            records(low_stock),
            LOW_STOCK_THRESHOLD,
            DASHBOARD_SLICE_SIZE as usize,
        ),
        drafts: records(drafts),
    })
}

/// One loaded inventory page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryPage {
    /// Rows to display, after the collection filter.
    pub rows: Vec<InventoryRow>,
    /// Distinct collection titles on the loaded window.
    pub collections: Vec<String>,
    /// Prev/next links, from the unfiltered window.
    pub navigation: PageNavigation,
}

/// Load one inventory page: products newest first, merged with levels.
///
/// # Errors
///
/// Returns an error if the product page or the level lookup fails.
pub async fn load_inventory_page<S: CatalogSource + ?Sized>(
    source: &S,
    filters: &FilterState,
) -> Result<InventoryPage, CatalogError> {
    let query = ProductListQuery::newest(filters.page_request(INVENTORY_PAGE_SIZE)?);
    let connection = source.product_page(query).await?;
    let loaded = RecordWindow::from_connection(connection, QuantitySource::TotalInventory);

    let navigation = PageNavigation::resolve(&loaded.window, INVENTORY_PAGE_SIZE, &loaded.records);
    let collections = distinct_collections(&loaded.records);
    let rows = load_inventory_rows(source, &loaded.records).await?;
    let rows = filter_by_collection(rows, filters.collection.as_deref(), |row| &row.record);

    Ok(InventoryPage {
        rows,
        collections,
        navigation,
    })
}

/// One loaded products page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductsPage {
    /// Records to display, after the collection filter.
    pub records: Vec<ProductRecord>,
    /// Filter options.
    pub meta: CatalogMeta,
    /// Prev/next links, from the unfiltered window.
    pub navigation: PageNavigation,
}

/// Load one products page and its filter options concurrently.
///
/// # Errors
///
/// Returns the first remote failure.
pub async fn load_products_page<S: CatalogSource + ?Sized>(
    source: &S,
    filters: &FilterState,
) -> Result<ProductsPage, CatalogError> {
    let query = filters.list_query(PRODUCTS_PAGE_SIZE)?;

    let (connection, meta) = tokio::try_join!(source.product_page(query), source.catalog_meta())?;
    let loaded = RecordWindow::from_connection(connection, QuantitySource::FirstVariant);

    let navigation = PageNavigation::resolve(&loaded.window, PRODUCTS_PAGE_SIZE, &loaded.records);
    let collection_title = filters
        .collection
        .as_deref()
        .map(|id| meta.collection_title(id).unwrap_or(id).to_string());
    let records = filter_by_collection(loaded.records, collection_title.as_deref(), |r| r);

    Ok(ProductsPage {
        records,
        meta,
        navigation,
    })
}

#[cfg(test)]
mod tests {
    use banzai_core::{Direction, PageWindow};

    use super::*;
    use crate::catalog::{filtering::ListParams, source::MockCatalogSource};
    use crate::shopify::{
        AdminShopifyError, CollectionOption, InventoryLevel, ProductSortKey,
        queries::get_product_page::ProductConnection,
    };

    /// Build a connection from `(id, quantity, collections)` rows.
    fn connection(
        rows: &[(u32, i64, &[&str])],
        has_next: bool,
        has_prev: bool,
    ) -> ProductConnection {
        let edges: Vec<serde_json::Value> = rows
            .iter()
            .map(|(id, quantity, collections)| {
                serde_json::json!({
                    "cursor": format!("cursor-{id}"),
                    "node": {
                        "id": format!("gid://shopify/Product/{id}"),
                        "title": format!("Product {id}"),
                        "status": "ACTIVE",
                        "totalInventory": quantity,
                        "collections": {"edges": collections.iter()
                            .map(|c| serde_json::json!({"node": {"title": c}}))
                            .collect::<Vec<_>>()},
                        "variants": {"edges": [{"node": {
                            "inventoryQuantity": quantity,
                            "inventoryItem": {"id": format!("gid://shopify/InventoryItem/{}", id + 1000)}
                        }}]}
                    }
                })
            })
            .collect();
        serde_json::from_value(serde_json::json!({
            "pageInfo": {
                "hasNextPage": has_next,
                "hasPreviousPage": has_prev,
                "startCursor": rows.first().map(|(id, _, _)| format!("cursor-{id}")),
                "endCursor": rows.last().map(|(id, _, _)| format!("cursor-{id}")),
            },
            "edges": edges
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_dashboard_queries_and_ranks() {
        let mut source = MockCatalogSource::new();
        source
            .expect_product_page()
            .times(3)
            .returning(|query| {
                match query.query.as_deref() {
                    None => {
                        assert!(query.reverse);
                        assert_eq!(query.sort_key, Some(ProductSortKey::CreatedAt));
                        assert_eq!(query.page.first, Some(5));
                        Ok(connection(&[(1, 10, &[]), (2, 20, &[])], true, false))
                    }
                    Some("inventory_total:<6") => {
                        assert_eq!(query.sort_key, None);
                        assert!(!query.reverse);
                        assert_eq!(query.page.first, Some(20));
                        let rows: Vec<(u32, i64, &[&str])> = [7, 1, 0, 9, 3, 2, 6, 8]
                            .into_iter()
                            .zip(10..)
                            .map(|(q, id)| (id, q, &[][..]))
                            .collect();
                        Ok(connection(&rows, false, false))
                    }
                    Some("status:draft") => {
                        assert!(query.reverse);
                        Ok(connection(&[(3, 0, &[])], false, false))
                    }
                    other => panic!("unexpected query {other:?}"),
                }
            });

        let data = load_dashboard(&source).await.unwrap();

        assert_eq!(data.recent.len(), 2);
        assert_eq!(data.drafts[0].short_id(), "3");
        let low: Vec<i64> = data.low_stock.iter().map(|r| r.quantity).collect();
        assert_eq!(low, vec![0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn test_dashboard_fails_when_any_slice_fails() {
        let mut source = MockCatalogSource::new();
        source.expect_product_page().returning(|query| {
            if query.query.as_deref() == Some("status:draft") {
                Err(AdminShopifyError::Status {
                    status: 500,
                    body: String::new(),
                })
            } else {
                Ok(connection(&[(1, 1, &[])], false, false))
            }
        });

        let result = load_dashboard(&source).await;
        assert!(matches!(
            result,
            Err(CatalogError::Shopify(AdminShopifyError::Status { status: 500, .. }))
        ));
    }

    #[tokio::test]
    async fn test_inventory_page_merges_and_filters() {
        let mut source = MockCatalogSource::new();
        source.expect_product_page().once().returning(|query| {
            assert_eq!(query.page.first, Some(i64::from(INVENTORY_PAGE_SIZE)));
            assert_eq!(query.query, None);
            Ok(connection(
                &[(1, 4, &["Surf"]), (2, 9, &["Sale"]), (3, 0, &["Surf", "Sale"])],
                true,
                false,
            ))
        });
        source.expect_inventory_levels().once().returning(|ids| {
            assert_eq!(ids, ["1001".to_string(), "1002".to_string(), "1003".to_string()]);
            Ok(vec![InventoryLevel {
                inventory_item_id: "1001".to_string(),
                location_id: "7".to_string(),
                available: 4,
                committed: 2,
            }])
        });

        let filters = FilterState::from(ListParams {
            collection: Some("Surf".to_string()),
            ..ListParams::default()
        });
        let page = load_inventory_page(&source, &filters).await.unwrap();

        assert_eq!(page.rows.len(), 2);
        assert_eq!(page.rows[0].available, 4);
        assert_eq!(page.rows[0].committed, 2);
        assert_eq!(page.rows[1].location_id, "");
        assert_eq!(page.collections, vec!["Surf", "Sale"]);
        // Three loaded rows is a short window: no next page.
        assert!(!page.navigation.has_next());
        assert!(!page.navigation.has_prev());
    }

    #[tokio::test]
    async fn test_products_page_resolves_collection_id() {
        let mut source = MockCatalogSource::new();
        source.expect_product_page().once().returning(|query| {
            assert_eq!(query.query.as_deref(), Some("status:ACTIVE"));
            assert_eq!(query.page.first, Some(i64::from(PRODUCTS_PAGE_SIZE)));
            Ok(connection(&[(1, 3, &["Surf"]), (2, 5, &["Sale"])], false, true))
        });
        source.expect_catalog_meta().once().returning(|| {
            Ok(CatalogMeta {
                collections: vec![CollectionOption {
                    id: "gid://shopify/Collection/12".to_string(),
                    title: "Sale".to_string(),
                }],
                tags: vec!["summer".to_string()],
            })
        });

        let filters = FilterState::from(ListParams {
            status: Some("ACTIVE".to_string()),
            collection: Some("gid://shopify/Collection/12".to_string()),
            ..ListParams::default()
        });
        let page = load_products_page(&source, &filters).await.unwrap();

        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0].short_id(), "2");
        assert_eq!(page.records[0].quantity, 5);
        assert_eq!(page.meta.tags, vec!["summer"]);
        assert_eq!(page.navigation.prev_cursor.as_deref(), Some("cursor-1"));
    }

    /// An in-memory catalog of `total` products, newest first, paged by
    /// `after`/`before` cursors.
    struct PagedCatalog {
        total: u32,
    }

    impl PagedCatalog {
        fn page(&self, query: &ProductListQuery) -> ProductConnection {
            let position = |cursor: &Option<String>| {
                cursor
                    .as_deref()
                    .and_then(|c| c.strip_prefix("cursor-"))
                    .and_then(|id| id.parse::<u32>().ok())
                    .map(|id| self.total - id)
            };
            let size = u32::try_from(query.page.size()).unwrap();
            let (start, end) = match (position(&query.page.after), position(&query.page.before)) {
                (Some(after), _) => (after + 1, (after + 1 + size).min(self.total)),
                (None, Some(before)) => (before.saturating_sub(size), before),
                (None, None) => (0, size.min(self.total)),
            };
            // Ids count down so position 0 is the newest product.
            let rows: Vec<(u32, i64, &[&str])> =
                (start..end).map(|p| (self.total - p, 1, &[][..])).collect();
            connection(&rows, end < self.total, start > 0)
        }
    }

    fn paged_source(total: u32) -> MockCatalogSource {
        let catalog = PagedCatalog { total };
        let mut source = MockCatalogSource::new();
        source
            .expect_product_page()
            .returning(move |query| Ok(catalog.page(&query)));
        source.expect_inventory_levels().returning(|_| Ok(vec![]));
        source
    }

    async fn inventory_ids(
        source: &MockCatalogSource,
        filters: &FilterState,
    ) -> (Vec<String>, PageNavigation) {
        let page = load_inventory_page(source, filters).await.unwrap();
        let ids = page
            .rows
            .iter()
            .map(|r| r.record.short_id().to_string())
            .collect();
        (ids, page.navigation)
    }

    #[tokio::test]
    async fn test_next_cursor_round_trip_has_no_gap_or_overlap() {
        let source = paged_source(45);

        let (first, nav) = inventory_ids(&source, &FilterState::default()).await;
        let next = FilterState {
            cursor: nav.next_cursor.clone(),
            direction: Direction::Next,
            ..FilterState::default()
        };
        let (second, nav2) = inventory_ids(&source, &next).await;

        assert_eq!(first.first().map(String::as_str), Some("45"));
        assert_eq!(first.last().map(String::as_str), Some("26"));
        assert_eq!(second.first().map(String::as_str), Some("25"));
        assert_eq!(second.len(), 20);
        assert!(first.iter().all(|id| !second.contains(id)));

        // Going back from the second page returns exactly the first.
        let prev = FilterState {
            cursor: nav2.prev_cursor.clone(),
            direction: Direction::Prev,
            ..FilterState::default()
        };
        let (back, _) = inventory_ids(&source, &prev).await;
        assert_eq!(back, first);
    }

    #[tokio::test]
    async fn test_last_short_page_offers_no_next() {
        let source = paged_source(45);
        let last = FilterState {
            cursor: Some("cursor-6".to_string()),
            direction: Direction::Next,
            ..FilterState::default()
        };
        let (ids, nav) = inventory_ids(&source, &last).await;
        assert_eq!(ids.len(), 5);
        assert!(!nav.has_next());
        assert!(nav.has_prev());
    }

    #[test]
    fn test_window_helpers_agree_with_page_info() {
        let window = RecordWindow::from_connection(
            connection(&[(1, 0, &[])], true, true),
            QuantitySource::TotalInventory,
        );
        assert_eq!(
            window.window,
            PageWindow {
                has_next_page: true,
                has_previous_page: true,
                start_cursor: Some("cursor-1".to_string()),
                end_cursor: Some("cursor-1".to_string()),
            }
        );
    }
}
