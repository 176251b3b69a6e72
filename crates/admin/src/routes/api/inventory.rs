//! Inventory JSON API handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Deserialize;

use crate::{
    catalog::batch::{PlannedSet, submit_batch},
    shopify::InventorySetCommand,
    state::AppState,
};

/// Build the inventory API router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/inventory/set", post(set_levels))
}

/// Request body for a batch set.
#[derive(Debug, Deserialize)]
pub struct SetLevelsRequest {
    pub items: Vec<InventorySetCommand>,
}

/// Set available quantities and report each item's outcome.
///
/// Responds `200` when every item succeeded and `207 Multi-Status` when any
/// failed; the body always carries the per-item results.
pub async fn set_levels(
    State(state): State<AppState>,
    Json(body): Json<SetLevelsRequest>,
) -> Response {
    let planned = body
        .items
        .into_iter()
        .map(|command| PlannedSet {
            command,
            reason: None,
        })
        .collect();

    let report = submit_batch(state.shopify(), planned).await;
    let status = if report.all_succeeded() {
        StatusCode::OK
    } else {
        StatusCode::MULTI_STATUS
    };
    (status, Json(report)).into_response()
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, header},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::routes::test_support;

    async fn post_json(body: &'static str) -> Response {
        test_support::app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/inventory/set")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_local_failures_are_reported_per_item() {
        let response = post_json(
            r#"{"items": [
                {"inventoryItemId": "101", "locationId": "", "available": 4},
                {"inventoryItemId": "abc", "locationId": 7, "available": 1}
            ]}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::MULTI_STATUS);
        let body = axum::body::to_bytes(response.into_body(), 4096).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["succeeded"], 0);
        assert_eq!(json["failed"], 2);
        assert_eq!(json["results"][0]["inventoryItemId"], "101");
        assert_eq!(json["results"][0]["ok"], false);
        assert_eq!(json["results"][1]["locationId"], "7");
    }

    #[tokio::test]
    async fn test_empty_batch_is_ok() {
        let response = post_json(r#"{"items": []}"#).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let response = post_json(r#"{"items": [{"available": "ten"}]}"#).await;
        assert!(response.status().is_client_error());
    }
}
