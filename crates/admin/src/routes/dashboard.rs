//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use banzai_core::ProductStatus;
use tracing::instrument;

use super::Layout;
use crate::{
    catalog::{DashboardData, ProductRecord, pages::load_dashboard},
    error::AppError,
    filters,
    state::AppState,
};

/// Product row in a dashboard table.
#[derive(Debug, Clone)]
pub struct DashboardRowView {
    pub title: String,
    pub sku: String,
    pub status: ProductStatus,
    pub quantity: i64,
    pub image_url: Option<String>,
}

impl From<&ProductRecord> for DashboardRowView {
    fn from(record: &ProductRecord) -> Self {
        Self {
            title: record.title.clone(),
            sku: record.sku.clone().unwrap_or_default(),
            status: record.status,
            quantity: record.quantity,
            image_url: record.image.as_ref().map(|image| image.url.clone()),
        }
    }
}

/// One titled table with a link to the full page.
#[derive(Debug, Clone)]
pub struct DashboardTable {
    pub title: String,
    pub link_label: String,
    pub link_href: &'static str,
    pub rows: Vec<DashboardRowView>,
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate<'a> {
    pub layout: Layout<'a>,
    pub tables: Vec<DashboardTable>,
}

impl<'a> DashboardTemplate<'a> {
    fn new(layout: Layout<'a>, data: &DashboardData) -> Self {
        let messages = &layout.messages.dashboard;
        let table = |title: &str, link_label: &str, link_href, records: &[ProductRecord]| {
            DashboardTable {
                title: title.to_string(),
                link_label: link_label.to_string(),
                link_href,
                rows: records.iter().map(DashboardRowView::from).collect(),
            }
        };

        Self {
            tables: vec![
                table(&messages.recent, &messages.go_products, "/products", &data.recent),
                table(
                    &messages.low_stock,
                    &messages.go_inventory,
                    "/inventory",
                    &data.low_stock,
                ),
                table(&messages.drafts, &messages.go_drafts, "/drafts", &data.drafts),
            ],
            layout,
        }
    }
}

/// Dashboard page handler.
///
/// Any failed slice fails the whole page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Response, AppError> {
    let data = load_dashboard(state.shopify()).await?;

    tracing::debug!(
        recent = data.recent.len(),
        low_stock = data.low_stock.len(),
        drafts = data.drafts.len(),
        "Dashboard loaded"
    );

    Ok(DashboardTemplate::new(Layout::new(&state, "/"), &data).into_response())
}
