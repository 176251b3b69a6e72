//! Products list route handlers.

use std::str::FromStr;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use banzai_core::{Direction, ProductStatus};
use rust_decimal::Decimal;
use tracing::instrument;

use super::Layout;
use crate::{
    catalog::{FilterState, ListParams, ProductRecord, ProductsPage, pages::load_products_page},
    components::{FilterOption, SelectFilter, TableColumn},
    error::AppError,
    filters,
    shopify::ProductSortKey,
    state::AppState,
};

/// Product view for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub title: String,
    pub admin_url: String,
    pub image_url: String,
    pub image_alt: String,
    pub collections: String,
    pub sku: String,
    pub barcode: String,
    pub price: String,
    pub quantity: i64,
    pub status: ProductStatus,
    pub status_tone: &'static str,
    pub created_at: String,
    pub published_at: String,
    pub description_html: String,
}

// =============================================================================
// Type Conversions
// =============================================================================

/// Format the API's decimal price string as dollars; blank stays blank.
fn format_price(amount: Option<&str>) -> String {
    amount.map_or_else(String::new, |raw| {
        Decimal::from_str(raw.trim()).map_or_else(
            |_| format!("${raw}"),
            |amount| format!("${:.2}", amount.round_dp(2)),
        )
    })
}

impl ProductView {
    fn from_record(record: &ProductRecord, store: &str) -> Self {
        let (image_url, image_alt) = record.display_image();
        Self {
            title: record.title.clone(),
            admin_url: format!("https://{store}/admin/products/{}", record.short_id()),
            image_url: image_url.to_string(),
            image_alt: image_alt.to_string(),
            collections: record.collections.join(", "),
            sku: record.sku.clone().unwrap_or_default(),
            barcode: record.barcode.clone().unwrap_or_default(),
            price: format_price(record.price.as_deref()),
            quantity: record.quantity,
            status: record.status,
            status_tone: filters::status_tone(record.status),
            created_at: record.created_at.clone().unwrap_or_default(),
            published_at: record.published_at.clone().unwrap_or_default(),
            description_html: record.description_html.clone().unwrap_or_default(),
        }
    }
}

/// Products list page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate<'a> {
    pub layout: Layout<'a>,
    pub columns: Vec<TableColumn>,
    pub products: Vec<ProductView>,
    pub search: String,
    pub status_select: SelectFilter,
    pub collection_select: SelectFilter,
    pub tag_select: SelectFilter,
    pub sort_select: SelectFilter,
    /// Filters to carry along when only the sort changes.
    pub sort_hidden: Vec<(&'static str, String)>,
    pub reverse: bool,
    pub reverse_href: String,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
}

impl<'a> ProductsIndexTemplate<'a> {
    fn new(layout: Layout<'a>, store: &str, list: &FilterState, page: ProductsPage) -> Self {
        let m = &layout.messages;

        let columns = vec![
            TableColumn::new(&m.columns.image),
            TableColumn::new(&m.columns.title).width("9%"),
            TableColumn::new(&m.columns.collections),
            TableColumn::new(&m.columns.sku),
            TableColumn::new(&m.columns.barcode),
            TableColumn::new(&m.columns.price),
            TableColumn::new(&m.columns.available_qty),
            TableColumn::new(&m.columns.status),
            TableColumn::new(&m.columns.created),
            TableColumn::new(&m.columns.published),
            TableColumn::new(&m.columns.description).width("12%"),
        ];

        let status_select = SelectFilter::with_all(
            "status",
            &m.products.status,
            &m.common.all,
            vec![
                FilterOption::new("ACTIVE", &m.products.status_active),
                FilterOption::new("DRAFT", &m.products.status_draft),
            ],
            list.status.as_deref(),
        );
        let collection_select = SelectFilter::with_all(
            "collection",
            &m.products.collection,
            &m.common.all,
            page.meta
                .collections
                .iter()
                .map(|c| FilterOption::new(c.id.as_str(), c.title.as_str()))
                .collect(),
            list.collection.as_deref(),
        );
        let tag_select = SelectFilter::with_all(
            "tag",
            &m.products.tag,
            &m.common.all,
            page.meta
                .tags
                .iter()
                .map(|t| FilterOption::new(t.as_str(), t.as_str()))
                .collect(),
            list.tag.as_deref(),
        );
        let sort_select = SelectFilter::exact(
            "sortKey",
            &m.products.sort_by,
            ProductSortKey::ALL
                .iter()
                .map(|key| FilterOption::new(key.as_str(), sort_label(&layout, *key)))
                .collect(),
            list.sort_key.as_str(),
        );

        let sort_hidden = [
            ("search", &list.search),
            ("status", &list.status),
            ("collection", &list.collection),
            ("tag", &list.tag),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.clone().map(|v| (name, v)))
        .chain((!list.reverse).then(|| ("reverse", "false".to_string())))
        .collect();

        let navigation = &page.navigation;
        Self {
            columns,
            products: page
                .records
                .iter()
                .map(|r| ProductView::from_record(r, store))
                .collect(),
            search: list.search.clone().unwrap_or_default(),
            status_select,
            collection_select,
            tag_select,
            sort_select,
            sort_hidden,
            reverse: list.reverse,
            reverse_href: format!(
                "/products?{}",
                list.sort_query(list.sort_key, !list.reverse)
            ),
            prev_href: navigation
                .prev_cursor
                .as_deref()
                .map(|c| format!("/products?{}", list.page_query(c, Direction::Prev))),
            next_href: navigation
                .next_cursor
                .as_deref()
                .map(|c| format!("/products?{}", list.page_query(c, Direction::Next))),
            layout,
        }
    }
}

fn sort_label(layout: &Layout<'_>, key: ProductSortKey) -> String {
    let m = &layout.messages.products;
    match key {
        ProductSortKey::CreatedAt => m.sort_created.clone(),
        ProductSortKey::PublishedAt => m.sort_published.clone(),
        ProductSortKey::Title => m.sort_title.clone(),
        ProductSortKey::UpdatedAt => m.sort_updated.clone(),
    }
}

/// Products list page handler.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Response, AppError> {
    let list = FilterState::from(params);
    let page = load_products_page(state.shopify(), &list).await?;

    tracing::debug!(
        products = page.records.len(),
        has_next = page.navigation.has_next(),
        status = ?list.status_filter(),
        "Products page loaded"
    );

    let store = state.shopify().store().to_string();
    Ok(
        ProductsIndexTemplate::new(Layout::new(&state, "/products"), &store, &list, page)
            .into_response(),
    )
}

/// Draft products: the products page with the draft status filter.
pub async fn drafts() -> Redirect {
    Redirect::to("/products?status=DRAFT")
}
