//! Inventory level domain types for the REST inventory endpoints.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

// =============================================================================
// Inventory Levels
// =============================================================================

/// Stock of one inventory item at one location.
///
/// Ids are the numeric form used by the REST API, as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryLevel {
    /// Numeric inventory item id.
    pub inventory_item_id: String,
    /// Numeric location id.
    pub location_id: String,
    /// Units available to sell.
    pub available: i64,
    /// Units committed to unfulfilled orders.
    pub committed: i64,
}

// =============================================================================
// Set Commands
// =============================================================================

/// Why a set command cannot be sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSetCommand {
    /// The row had no inventory level, so there is no location to set.
    #[error("no location for inventory item {0}")]
    MissingLocation(String),
    /// An id is not the numeric form the REST API expects.
    #[error("{field} is not a numeric id: {value:?}")]
    NonNumericId {
        /// Which id.
        field: &'static str,
        /// The offending value.
        value: String,
    },
}

/// An absolute "available" quantity to write for one item at one location.
///
/// Serialized in camelCase, the shape posted as `items[]` by the inventory
/// page and accepted by the JSON endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySetCommand {
    /// Inventory item id (numeric or global).
    #[serde(deserialize_with = "id_string")]
    pub inventory_item_id: String,
    /// Location id (numeric or global).
    #[serde(deserialize_with = "id_string")]
    pub location_id: String,
    /// New available quantity.
    pub available: i64,
}

impl InventorySetCommand {
    /// Numeric `(inventory_item_id, location_id)` for the REST call.
    ///
    /// Global ids are accepted and reduced to their numeric suffix.
    ///
    /// # Errors
    ///
    /// Returns an error if the location is empty or either id is not numeric.
    pub fn numeric_ids(&self) -> Result<(u64, u64), InvalidSetCommand> {
        if self.location_id.trim().is_empty() {
            return Err(InvalidSetCommand::MissingLocation(
                self.inventory_item_id.clone(),
            ));
        }
        let item = parse_numeric("inventory_item_id", &self.inventory_item_id)?;
        let location = parse_numeric("location_id", &self.location_id)?;
        Ok((item, location))
    }
}

/// Accept ids posted either as JSON strings or as bare numbers.
fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

fn parse_numeric(field: &'static str, value: &str) -> Result<u64, InvalidSetCommand> {
    banzai_core::short_id(value.trim())
        .parse()
        .map_err(|_| InvalidSetCommand::NonNumericId {
            field,
            value: value.to_string(),
        })
}
