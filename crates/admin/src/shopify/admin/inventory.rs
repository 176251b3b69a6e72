//! Inventory level operations for the Admin REST API.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{AdminClient, AdminShopifyError};
use crate::shopify::types::{InventoryLevel, InventorySetCommand};

/// Largest page the inventory levels endpoint returns.
const LEVELS_LIMIT: &str = "250";

#[derive(Debug, Deserialize)]
struct InventoryLevelsResponse {
    #[serde(default)]
    inventory_levels: Vec<RestInventoryLevel>,
}

#[derive(Debug, Deserialize)]
struct RestInventoryLevel {
    inventory_item_id: u64,
    location_id: u64,
    available: Option<i64>,
    #[serde(default)]
    committed: Option<i64>,
}

impl From<RestInventoryLevel> for InventoryLevel {
    fn from(level: RestInventoryLevel) -> Self {
        Self {
            inventory_item_id: level.inventory_item_id.to_string(),
            location_id: level.location_id.to_string(),
            available: level.available.unwrap_or(0),
            committed: level.committed.unwrap_or(0),
        }
    }
}

#[derive(Debug, Serialize)]
struct SetInventoryLevelBody {
    inventory_item_id: u64,
    location_id: u64,
    available: i64,
}

impl AdminClient {
    /// Get inventory levels for a set of inventory items, across locations.
    ///
    /// Follows the `Link` header until every page has been read.
    ///
    /// # Arguments
    ///
    /// * `inventory_item_ids` - Numeric inventory item ids
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self, inventory_item_ids), fields(count = inventory_item_ids.len()))]
    pub async fn get_inventory_levels(
        &self,
        inventory_item_ids: &[String],
    ) -> Result<Vec<InventoryLevel>, AdminShopifyError> {
        if inventory_item_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut levels = Vec::new();
        let mut page_info: Option<String> = None;
        loop {
            // Follow-up pages accept only `limit` and `page_info`.
            let query = match page_info.take() {
                None => vec![
                    ("inventory_item_ids", inventory_item_ids.join(",")),
                    ("limit", LEVELS_LIMIT.to_string()),
                ],
                Some(token) => vec![
                    ("limit", LEVELS_LIMIT.to_string()),
                    ("page_info", token),
                ],
            };
            let (response, next): (InventoryLevelsResponse, _) =
                self.rest_get("inventory_levels.json", &query).await?;

            levels.extend(response.inventory_levels.into_iter().map(InventoryLevel::from));
            match next {
                Some(token) => {
                    tracing::debug!(fetched = levels.len(), "Fetching next inventory levels page");
                    page_info = Some(token);
                }
                None => break,
            }
        }

        Ok(levels)
    }

    /// Set the available quantity of an inventory item at a location.
    ///
    /// # Errors
    ///
    /// Returns `AdminShopifyError::UserError` if the ids are not numeric or the
    /// store rejects the update, or another error if the request fails.
    #[instrument(
        skip(self, command),
        fields(
            inventory_item_id = %command.inventory_item_id,
            location_id = %command.location_id,
            available = command.available,
        )
    )]
    pub async fn set_inventory_level(
        &self,
        command: &InventorySetCommand,
    ) -> Result<(), AdminShopifyError> {
        let (inventory_item_id, location_id) = command
            .numeric_ids()
            .map_err(|e| AdminShopifyError::UserError(e.to_string()))?;

        let body = SetInventoryLevelBody {
            inventory_item_id,
            location_id,
            available: command.available,
        };

        self.rest_post("inventory_levels/set.json", &body).await?;

        tracing::info!("Inventory level set");
        Ok(())
    }
}
