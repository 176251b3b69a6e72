//! Filter state carried in the URL, and the filters applied after fetch.

use banzai_core::{Direction, PageRequest, PaginationError, ProductStatus};
use serde::Deserialize;
use url::form_urlencoded;

use super::records::ProductRecord;
use crate::shopify::{ProductListQuery, ProductSortKey};

/// Raw list query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    /// Opaque cursor of the window edge.
    pub cursor: Option<String>,
    /// `next` (default) or `prev`.
    pub direction: Option<String>,
    /// Free-text search.
    pub search: Option<String>,
    /// Product status (`ACTIVE`, `DRAFT`).
    pub status: Option<String>,
    /// Collection id on the products page, title on the inventory page.
    pub collection: Option<String>,
    /// Product tag.
    pub tag: Option<String>,
    /// Sort key; unknown values mean `CREATED_AT`.
    #[serde(rename = "sortKey")]
    pub sort_key: Option<String>,
    /// Anything but `"false"` sorts descending.
    pub reverse: Option<String>,
}

/// Parsed list state for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Free-text search, passed through as search syntax.
    pub search: Option<String>,
    /// Status filter, as given (`DRAFT`, `active`).
    pub status: Option<String>,
    /// Collection filter, applied after fetch.
    pub collection: Option<String>,
    /// Tag filter.
    pub tag: Option<String>,
    /// Sort order.
    pub sort_key: ProductSortKey,
    /// Reverse the sort order.
    pub reverse: bool,
    /// Cursor to page from.
    pub cursor: Option<String>,
    /// Which way to page from the cursor.
    pub direction: Direction,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: None,
            status: None,
            collection: None,
            tag: None,
            sort_key: ProductSortKey::default(),
            reverse: true,
            cursor: None,
            direction: Direction::default(),
        }
    }
}

impl From<ListParams> for FilterState {
    fn from(params: ListParams) -> Self {
        Self {
            search: present(params.search),
            status: present(params.status),
            collection: present(params.collection),
            tag: present(params.tag),
            sort_key: ProductSortKey::from_param(params.sort_key.as_deref()),
            reverse: params.reverse.as_deref() != Some("false"),
            cursor: present(params.cursor),
            direction: Direction::from_param(params.direction.as_deref()),
        }
    }
}

impl FilterState {
    /// Search syntax for the remote: non-empty parts joined with `AND`.
    ///
    /// Collection is never part of it.
    #[must_use]
    pub fn remote_query(&self) -> Option<String> {
        let parts: Vec<String> = [
            self.search.clone(),
            self.status.as_ref().map(|s| format!("status:{s}")),
            self.tag.as_ref().map(|t| format!("tag:{t}")),
        ]
        .into_iter()
        .flatten()
        .collect();

        (!parts.is_empty()).then(|| parts.join(" AND "))
    }

    /// Cursor window for this state.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroPageSize`] if `page_size` is zero.
    pub fn page_request(&self, page_size: u32) -> Result<PageRequest, PaginationError> {
        PageRequest::new(self.cursor.clone(), self.direction, page_size)
    }

    /// Remote list arguments for this state.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroPageSize`] if `page_size` is zero.
    pub fn list_query(&self, page_size: u32) -> Result<ProductListQuery, PaginationError> {
        Ok(ProductListQuery {
            query: self.remote_query(),
            sort_key: Some(self.sort_key),
            reverse: self.reverse,
            page: self.page_request(page_size)?,
        })
    }

    /// Parsed status, if one is set.
    #[must_use]
    pub fn status_filter(&self) -> Option<ProductStatus> {
        self.status.as_deref().map(ProductStatus::from_param)
    }

    /// Query string that keeps the filters and sort but starts from the
    /// first page.
    #[must_use]
    pub fn filter_query(&self) -> String {
        self.serializer().finish()
    }

    /// Query string for a navigation link from this state.
    #[must_use]
    pub fn page_query(&self, cursor: &str, direction: Direction) -> String {
        let mut serializer = self.serializer();
        serializer
            .append_pair("cursor", cursor)
            .append_pair("direction", direction.as_str());
        serializer.finish()
    }

    /// Query string with a different sort, back on the first page.
    #[must_use]
    pub fn sort_query(&self, sort_key: ProductSortKey, reverse: bool) -> String {
        Self {
            sort_key,
            reverse,
            ..self.clone()
        }
        .filter_query()
    }

    fn serializer(&self) -> form_urlencoded::Serializer<'static, String> {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in [
            ("search", &self.search),
            ("status", &self.status),
            ("collection", &self.collection),
            ("tag", &self.tag),
        ] {
            if let Some(value) = value {
                serializer.append_pair(key, value);
            }
        }
        if self.sort_key != ProductSortKey::default() {
            serializer.append_pair("sortKey", self.sort_key.as_str());
        }
        if !self.reverse {
            serializer.append_pair("reverse", "false");
        }
        serializer
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Keep the items in a collection; no collection keeps everything.
///
/// Operates on one loaded window only.
#[must_use]
pub fn filter_by_collection<T>(
    items: Vec<T>,
    collection_title: Option<&str>,
    record: impl Fn(&T) -> &ProductRecord,
) -> Vec<T> {
    match collection_title {
        Some(title) => items
            .into_iter()
            .filter(|item| record(item).in_collection(title))
            .collect(),
        None => items,
    }
}

/// Collection titles present on a window, in first-seen order.
#[must_use]
pub fn distinct_collections<'a>(records: impl IntoIterator<Item = &'a ProductRecord>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for title in records.into_iter().flat_map(|r| r.collections.iter()) {
        if !seen.contains(title) {
            seen.push(title.clone());
        }
    }
    seen
}

/// Rank low-stock candidates.
///
/// Keeps records with quantity below `threshold`, sorts ascending by quantity
/// (stable), and truncates to `limit`. Never pads.
#[must_use]
pub fn select_low_stock(
    candidates: Vec<ProductRecord>,
    threshold: i64,
    limit: usize,
) -> Vec<ProductRecord> {
    let mut low: Vec<ProductRecord> = candidates
        .into_iter()
        .filter(|r| r.quantity < threshold)
        .collect();
    low.sort_by_key(|r| r.quantity);
    low.truncate(limit);
    low
}
