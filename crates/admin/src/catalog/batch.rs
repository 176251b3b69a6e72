//! Batch "available" updates from the inventory page.
//!
//! The page edits deltas, the remote only accepts absolute values: each
//! selected row becomes `available + delta` for its item and location.
//! Commands are independent; one failure never stops the others.

use banzai_core::AdjustmentReason;
use futures::{StreamExt, stream};
use serde::Serialize;
use thiserror::Error;

use super::{CatalogSource, filtering::ListParams};
use crate::shopify::{AdminShopifyError, InventorySetCommand};

/// Form field carrying a JSON-encoded [`InventorySetCommand`].
pub const ITEMS_FIELD: &str = "items[]";

/// Most set commands in flight at once; the Admin API is rate limited.
pub const MAX_CONCURRENT_SETS: usize = 4;

/// Interpret the "adjust by" text as a signed delta. Anything that is not an
/// integer counts as zero.
///
/// ```
/// use banzai_admin::catalog::batch::parse_delta;
///
/// assert_eq!(parse_delta("-3"), -3);
/// assert_eq!(parse_delta(" +4 "), 4);
/// assert_eq!(parse_delta("abc"), 0);
/// ```
#[must_use]
pub fn parse_delta(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

/// Unsaved edit for one row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PendingEdit {
    /// Raw "adjust by" text.
    pub adjust_by: String,
    /// Why the quantity changes.
    pub reason: AdjustmentReason,
}

impl PendingEdit {
    /// Signed delta, see [`parse_delta`].
    #[must_use]
    pub fn delta(&self) -> i64 {
        parse_delta(&self.adjust_by)
    }
}

/// A row as rendered: where its stock lives and how much is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditableRow {
    /// Numeric inventory item id.
    pub inventory_item_id: String,
    /// Numeric location id, empty when no level was found.
    pub location_id: String,
    /// Available quantity when the page was rendered.
    pub available: i64,
}

/// One command to send, with the edit that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedSet {
    /// Absolute value to write.
    pub command: InventorySetCommand,
    /// Reason given on the page, if the row was edited there.
    pub reason: Option<AdjustmentReason>,
}

/// Build the absolute set command for an edited row.
#[must_use]
pub fn plan_set(row: &EditableRow, edit: &PendingEdit) -> PlannedSet {
    PlannedSet {
        command: InventorySetCommand {
            inventory_item_id: row.inventory_item_id.clone(),
            location_id: row.location_id.clone(),
            available: row.available.saturating_add(edit.delta()),
        },
        reason: Some(edit.reason),
    }
}

/// Why a submitted inventory form cannot be read.
#[derive(Debug, Error)]
pub enum BatchFormError {
    /// An `items[]` entry is not a valid command.
    #[error("invalid items[] entry: {0}")]
    InvalidItem(#[from] serde_json::Error),
    /// A selected row is missing one of its hidden fields.
    #[error("selected row {row} is missing field {field}")]
    MissingField {
        /// Product short id.
        row: String,
        /// Field name.
        field: String,
    },
    /// A selected row's available quantity is not an integer.
    #[error("selected row {row} has a non-numeric available quantity")]
    InvalidAvailable {
        /// Product short id.
        row: String,
    },
}

/// A submitted inventory form.
///
/// Accepts `items[]` JSON commands and per-row fields for selected rows
/// (`selected`, `available.{id}`, `inventory_item.{id}`, `location.{id}`,
/// `adjust_by.{id}`, `reason.{id}`), in any mix.
#[derive(Debug, Clone, Default)]
pub struct InventoryEditForm {
    /// Commands to send, in form order.
    pub planned: Vec<PlannedSet>,
    /// Pagination and collection state to return to.
    pub return_to: ListParams,
}

impl InventoryEditForm {
    /// Read the form from its raw pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if an `items[]` entry is malformed or a selected row is
    /// missing its hidden fields.
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self, BatchFormError> {
        let field = |name: &str| {
            pairs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str())
        };

        let mut planned = Vec::new();
        for (key, value) in pairs {
            if key == ITEMS_FIELD {
                planned.push(PlannedSet {
                    command: serde_json::from_str(value)?,
                    reason: None,
                });
            }
        }

        let selected = pairs
            .iter()
            .filter(|(key, _)| key == "selected")
            .map(|(_, value)| value.trim())
            .filter(|value| !value.is_empty());

        for row in selected {
            let required = |prefix: &str| {
                let name = format!("{prefix}.{row}");
                field(&name).ok_or_else(|| BatchFormError::MissingField {
                    row: row.to_string(),
                    field: name.clone(),
                })
            };

            let available = required("available")?
                .trim()
                .parse::<i64>()
                .map_err(|_| BatchFormError::InvalidAvailable {
                    row: row.to_string(),
                })?;
            let editable = EditableRow {
                inventory_item_id: required("inventory_item")?.trim().to_string(),
                location_id: required("location")?.trim().to_string(),
                available,
            };
            let edit = PendingEdit {
                adjust_by: field(&format!("adjust_by.{row}"))
                    .unwrap_or_default()
                    .to_string(),
                reason: field(&format!("reason.{row}"))
                    .map(AdjustmentReason::from_param)
                    .unwrap_or_default(),
            };
            planned.push(plan_set(&editable, &edit));
        }

        let return_to = ListParams {
            cursor: field("cursor").map(String::from),
            direction: field("direction").map(String::from),
            collection: field("collection").map(String::from),
            ..ListParams::default()
        };

        Ok(Self { planned, return_to })
    }
}

/// Result of one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemOutcome {
    /// Inventory item id as submitted.
    pub inventory_item_id: String,
    /// Location id as submitted.
    pub location_id: String,
    /// Value that was written, or would have been.
    pub available: i64,
    /// Whether the write succeeded.
    pub ok: bool,
    /// Short reason when it did not.
    pub error: Option<String>,
}

/// Per-item results of a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// Items written.
    pub succeeded: usize,
    /// Items not written.
    pub failed: usize,
    /// One outcome per command, in submission order.
    pub results: Vec<ItemOutcome>,
}

impl BatchReport {
    fn from_outcomes(results: Vec<ItemOutcome>) -> Self {
        let succeeded = results.iter().filter(|r| r.ok).count();
        Self {
            failed: results.len() - succeeded,
            succeeded,
            results,
        }
    }

    /// Whether every command succeeded.
    #[must_use]
    pub const fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Send every command, at most [`MAX_CONCURRENT_SETS`] at a time, and collect
/// per-item outcomes in submission order.
///
/// Commands with no location or non-numeric ids fail locally without a
/// remote call.
pub async fn submit_batch<S: CatalogSource + ?Sized>(
    source: &S,
    planned: Vec<PlannedSet>,
) -> BatchReport {
    let outcomes = stream::iter(planned)
        .map(|plan| submit_one(source, plan))
        .buffered(MAX_CONCURRENT_SETS)
        .collect::<Vec<_>>()
        .await;
    let report = BatchReport::from_outcomes(outcomes);

    tracing::info!(
        succeeded = report.succeeded,
        failed = report.failed,
        "Inventory batch submitted"
    );
    report
}

async fn submit_one<S: CatalogSource + ?Sized>(source: &S, plan: PlannedSet) -> ItemOutcome {
    let PlannedSet { command, reason } = plan;
    let reason = reason.map_or("none", AdjustmentReason::as_str);

    let result = match command.numeric_ids() {
        Err(invalid) => Err(invalid.to_string()),
        Ok(_) => source
            .set_inventory_level(&command)
            .await
            .map_err(|e| {
                tracing::warn!(
                    inventory_item_id = %command.inventory_item_id,
                    location_id = %command.location_id,
                    available = command.available,
                    reason,
                    error = %e,
                    "Inventory set failed"
                );
                client_message(&e)
            }),
    };

    match &result {
        Ok(()) => tracing::info!(
            inventory_item_id = %command.inventory_item_id,
            location_id = %command.location_id,
            available = command.available,
            reason,
            "Inventory set"
        ),
        Err(message) => tracing::debug!(
            inventory_item_id = %command.inventory_item_id,
            error = %message,
            "Inventory item not updated"
        ),
    }

    ItemOutcome {
        inventory_item_id: command.inventory_item_id,
        location_id: command.location_id,
        available: command.available,
        ok: result.is_ok(),
        error: result.err(),
    }
}

/// What the page may say about a remote failure.
fn client_message(err: &AdminShopifyError) -> String {
    match err {
        AdminShopifyError::UserError(_) => "Rejected by Shopify".to_string(),
        AdminShopifyError::RateLimited(secs) => format!("Rate limited, retry in {secs}s"),
        AdminShopifyError::NotFound(_) => "Item or location not found".to_string(),
        _ => "Update failed".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::source::MockCatalogSource;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn row(item: &str, available: i64) -> EditableRow {
        EditableRow {
            inventory_item_id: item.to_string(),
            location_id: "7".to_string(),
            available,
        }
    }

    fn edit(adjust_by: &str) -> PendingEdit {
        PendingEdit {
            adjust_by: adjust_by.to_string(),
            reason: AdjustmentReason::Correction,
        }
    }

    #[test]
    fn test_parse_delta() {
        assert_eq!(parse_delta("-3"), -3);
        assert_eq!(parse_delta("12"), 12);
        assert_eq!(parse_delta(""), 0);
        assert_eq!(parse_delta("abc"), 0);
        assert_eq!(parse_delta("2.5"), 0);
    }

    #[test]
    fn test_plan_set_applies_delta() {
        let planned = [
            plan_set(&row("41", 10), &edit("-3")),
            plan_set(&row("42", 5), &edit("abc")),
        ];
        assert_eq!(planned[0].command.available, 7);
        assert_eq!(planned[1].command.available, 5);
        assert_eq!(planned[0].command.location_id, "7");
    }

    #[test]
    fn test_plan_set_saturates() {
        let planned = plan_set(&row("41", i64::MAX), &edit("5"));
        assert_eq!(planned.command.available, i64::MAX);
    }

    #[test]
    fn test_form_reads_selected_rows_only() {
        let form = InventoryEditForm::from_pairs(&pairs(&[
            ("selected", "10"),
            ("available.10", "10"),
            ("inventory_item.10", "41"),
            ("location.10", "7"),
            ("adjust_by.10", "-3"),
            ("reason.10", "damaged"),
            ("available.11", "5"),
            ("inventory_item.11", "42"),
            ("location.11", "7"),
            ("adjust_by.11", "9"),
            ("cursor", "c1"),
            ("direction", "next"),
        ]))
        .unwrap();

        assert_eq!(form.planned.len(), 1);
        assert_eq!(form.planned[0].command.inventory_item_id, "41");
        assert_eq!(form.planned[0].command.available, 7);
        assert_eq!(form.planned[0].reason, Some(AdjustmentReason::Damaged));
        assert_eq!(form.return_to.cursor.as_deref(), Some("c1"));
    }

    #[test]
    fn test_form_accepts_items_json() {
        let form = InventoryEditForm::from_pairs(&pairs(&[(
            ITEMS_FIELD,
            r#"{"inventoryItemId":"41","locationId":"7","available":3}"#,
        )]))
        .unwrap();

        assert_eq!(form.planned.len(), 1);
        assert_eq!(form.planned[0].command.available, 3);
        assert_eq!(form.planned[0].reason, None);
    }

    #[test]
    fn test_form_rejects_malformed_items() {
        let result = InventoryEditForm::from_pairs(&pairs(&[(ITEMS_FIELD, "{not json")]));
        assert!(matches!(result, Err(BatchFormError::InvalidItem(_))));
    }

    #[test]
    fn test_form_rejects_selected_row_without_fields() {
        let result = InventoryEditForm::from_pairs(&pairs(&[("selected", "10")]));
        assert!(matches!(result, Err(BatchFormError::MissingField { .. })));
    }

    #[tokio::test]
    async fn test_batch_continues_past_failures() {
        let mut source = MockCatalogSource::new();
        source
            .expect_set_inventory_level()
            .times(2)
            .returning(|command| {
                if command.inventory_item_id == "41" {
                    Err(AdminShopifyError::UserError("quantity too large".to_string()))
                } else {
                    Ok(())
                }
            });

        let report = submit_batch(
            &source,
            vec![
                plan_set(&row("41", 10), &edit("-3")),
                plan_set(&row("42", 5), &edit("1")),
            ],
        )
        .await;

        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed, 1);
        assert!(!report.results[0].ok);
        assert_eq!(report.results[0].error.as_deref(), Some("Rejected by Shopify"));
        assert!(report.results[1].ok);
        assert_eq!(report.results[1].available, 6);
    }

    #[tokio::test]
    async fn test_missing_location_fails_locally() {
        let mut source = MockCatalogSource::new();
        source.expect_set_inventory_level().never();

        let no_location = EditableRow {
            inventory_item_id: "41".to_string(),
            location_id: String::new(),
            available: 2,
        };
        let report = submit_batch(&source, vec![plan_set(&no_location, &edit("1"))]).await;

        assert_eq!(report.failed, 1);
        assert!(!report.all_succeeded());
        assert!(report.results[0].error.is_some());
    }

    #[tokio::test]
    async fn test_selected_row_without_level_is_submitted_and_fails() {
        let mut source = MockCatalogSource::new();
        source.expect_set_inventory_level().never();

        let form = InventoryEditForm::from_pairs(&pairs(&[
            ("selected", "12"),
            ("available.12", "0"),
            ("inventory_item.12", "43"),
            ("location.12", ""),
            ("adjust_by.12", "5"),
        ]))
        .unwrap();
        assert_eq!(form.planned.len(), 1);
        assert_eq!(form.planned[0].command.available, 5);

        let report = submit_batch(&source, form.planned).await;
        assert_eq!(report.failed, 1);
        assert_eq!(report.results[0].inventory_item_id, "43");
    }

    #[tokio::test]
    async fn test_large_batch_keeps_submission_order() {
        let mut source = MockCatalogSource::new();
        source
            .expect_set_inventory_level()
            .times(MAX_CONCURRENT_SETS * 3)
            .returning(|_| Ok(()));

        let planned = (0..MAX_CONCURRENT_SETS * 3)
            .map(|i| plan_set(&row(&format!("{}", 100 + i), 1), &edit("1")))
            .collect();
        let report = submit_batch(&source, planned).await;

        assert_eq!(report.succeeded, MAX_CONCURRENT_SETS * 3);
        let ids: Vec<_> = report
            .results
            .iter()
            .map(|r| r.inventory_item_id.as_str())
            .collect();
        let expected: Vec<_> = (0..MAX_CONCURRENT_SETS * 3)
            .map(|i| format!("{}", 100 + i))
            .collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let source = MockCatalogSource::new();
        let report = submit_batch(&source, vec![]).await;
        assert_eq!(report, BatchReport::default());
        assert!(report.all_succeeded());
    }
}
