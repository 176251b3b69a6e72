//! Inventory management route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use banzai_core::{AdjustmentReason, Direction};
use serde::Deserialize;
use tracing::instrument;
use url::form_urlencoded;

use super::Layout;
use crate::{
    catalog::{
        FilterState, InventoryPage, ListParams,
        batch::{BatchReport, InventoryEditForm, submit_batch},
        merge::InventoryRow,
        pages::load_inventory_page,
    },
    components::{FilterOption, SelectFilter, TableColumn},
    error::AppError,
    filters,
    state::AppState,
};

/// Outcome counts carried back after a batch submit.
#[derive(Debug, Default, Deserialize)]
pub struct BatchOutcomeQuery {
    pub updated: Option<String>,
    pub failed: Option<String>,
}

/// What to tell the user after a submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Every item was written; dismisses itself.
    Updated(String),
    /// The submit carried no items; dismisses itself.
    NothingToUpdate(String),
    /// Some items failed; stays until dismissed.
    PartialFailure(String),
}

impl Notice {
    fn from_query(query: &BatchOutcomeQuery, layout: &Layout<'_>) -> Option<Self> {
        let count = |value: &Option<String>| {
            value
                .as_deref()
                .and_then(|v| v.trim().parse::<usize>().ok())
        };
        let messages = &layout.messages.inventory;
        match (count(&query.updated), count(&query.failed)) {
            (_, Some(failed)) if failed > 0 => Some(Self::PartialFailure(format!(
                "{} ({failed})",
                messages.partial_failure
            ))),
            (Some(0), _) => Some(Self::NothingToUpdate(messages.nothing_to_update.clone())),
            (Some(_), _) => Some(Self::Updated(messages.updated.clone())),
            _ => None,
        }
    }

    /// Text to show.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Updated(text) | Self::NothingToUpdate(text) | Self::PartialFailure(text) => text,
        }
    }

    /// Whether the notice stays until dismissed.
    #[must_use]
    pub const fn is_persistent(&self) -> bool {
        matches!(self, Self::PartialFailure(_))
    }
}

/// Inventory row view for templates.
#[derive(Debug, Clone)]
pub struct InventoryRowView {
    /// Product short id, the row key in form field names.
    pub id: String,
    pub title: String,
    pub sku: String,
    pub collections: String,
    pub image_url: Option<String>,
    pub committed: i64,
    pub available: i64,
    pub inventory_item_id: String,
    /// Empty when no level was found; a submit then fails for this row.
    pub location_id: String,
}

impl From<&InventoryRow> for InventoryRowView {
    fn from(row: &InventoryRow) -> Self {
        let record = &row.record;
        Self {
            id: record.short_id().to_string(),
            title: record.title.clone(),
            sku: record.sku.clone().unwrap_or_default(),
            collections: record.collections.join(", "),
            image_url: record.image.as_ref().map(|image| image.url.clone()),
            committed: row.committed,
            available: row.available,
            inventory_item_id: row.inventory_item_id.clone(),
            location_id: row.location_id.clone(),
        }
    }
}

/// Inventory index page template.
#[derive(Template, WebTemplate)]
#[template(path = "inventory/index.html")]
pub struct InventoryIndexTemplate<'a> {
    pub layout: Layout<'a>,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<InventoryRowView>,
    pub collection_select: SelectFilter,
    pub reasons: Vec<FilterOption>,
    /// Page state to return to after a submit.
    pub return_fields: Vec<(&'static str, String)>,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
    pub notice: Option<Notice>,
}

impl<'a> InventoryIndexTemplate<'a> {
    fn new(
        layout: Layout<'a>,
        list: &FilterState,
        page: &InventoryPage,
        notice: Option<Notice>,
    ) -> Self {
        let m = &layout.messages;

        let columns = vec![
            TableColumn::new(""),
            TableColumn::new(&m.columns.image),
            TableColumn::new(&m.columns.title).width("10%"),
            TableColumn::new(&m.columns.sku),
            TableColumn::new(&m.columns.collections).width("10%"),
            TableColumn::new(&m.columns.committed),
            TableColumn::new(&m.columns.available),
            TableColumn::new(&m.columns.on_hand),
        ];

        let collection_select = SelectFilter::with_all(
            "collection",
            &m.inventory.collection_filter,
            &m.common.all,
            page.collections
                .iter()
                .map(|title| FilterOption::new(title.as_str(), title.as_str()))
                .collect(),
            list.collection.as_deref(),
        );

        let reasons = AdjustmentReason::ALL
            .iter()
            .map(|reason| {
                let label = match reason {
                    AdjustmentReason::Correction => &m.inventory.reason_correction,
                    AdjustmentReason::Damaged => &m.inventory.reason_damaged,
                    AdjustmentReason::Lost => &m.inventory.reason_lost,
                };
                FilterOption::new(reason.as_str(), label.as_str())
            })
            .collect();

        let return_fields = [
            ("cursor", list.cursor.clone()),
            (
                "direction",
                list.cursor.as_ref().map(|_| list.direction.as_str().to_string()),
            ),
            ("collection", list.collection.clone()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect();

        let link = |cursor: &str, direction| {
            format!("/inventory?{}", list.page_query(cursor, direction))
        };

        Self {
            columns,
            rows: page.rows.iter().map(InventoryRowView::from).collect(),
            collection_select,
            reasons,
            return_fields,
            prev_href: page
                .navigation
                .prev_cursor
                .as_deref()
                .map(|c| link(c, Direction::Prev)),
            next_href: page
                .navigation
                .next_cursor
                .as_deref()
                .map(|c| link(c, Direction::Next)),
            notice,
            layout,
        }
    }
}

/// Inventory index page handler.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(outcome): Query<BatchOutcomeQuery>,
) -> Result<Response, AppError> {
    let list = FilterState::from(params);
    let page = load_inventory_page(state.shopify(), &list).await?;

    tracing::debug!(
        rows = page.rows.len(),
        collections = page.collections.len(),
        has_next = page.navigation.has_next(),
        "Inventory page loaded"
    );

    let layout = Layout::new(&state, "/inventory");
    let notice = Notice::from_query(&outcome, &layout);
    Ok(InventoryIndexTemplate::new(layout, &list, &page, notice).into_response())
}

/// Batch set handler.
///
/// Always redirects back to the page that submitted, with outcome counts, so
/// a reload shows fresh quantities and no stale edits.
#[instrument(skip(state, pairs))]
pub async fn submit(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect, AppError> {
    let form = InventoryEditForm::from_pairs(&pairs).map_err(|e| {
        tracing::warn!(error = %e, "Rejected inventory form");
        AppError::BadRequest(e.to_string())
    })?;

    let report = submit_batch(state.shopify(), form.planned).await;
    Ok(Redirect::to(&return_location(&form.return_to, &report)))
}

/// `/inventory` with the submitting page's cursor and collection, plus the
/// outcome counts.
fn return_location(return_to: &ListParams, report: &BatchReport) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    for (key, value) in [
        ("cursor", &return_to.cursor),
        ("direction", &return_to.direction),
        ("collection", &return_to.collection),
    ] {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            query.append_pair(key, value);
        }
    }
    query
        .append_pair("updated", &report.succeeded.to_string())
        .append_pair("failed", &report.failed.to_string());
    format!("/inventory?{}", query.finish())
}
