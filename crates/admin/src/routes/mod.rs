//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//!
//! # Dashboard
//! GET  /                       - Recent, low-stock and draft products
//!
//! # Inventory (read/write to Shopify)
//! GET  /inventory              - Products merged with inventory levels
//! POST /inventory              - Batch set available quantities
//!
//! # Products (read from Shopify)
//! GET  /products               - Filterable, sortable product list
//! GET  /drafts                 - Redirect to draft products
//!
//! # JSON API
//! POST /api/inventory/set      - Batch set, per-item outcomes
//! ```

pub mod api;
pub mod dashboard;
pub mod inventory;
pub mod products;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Request, Response},
    middleware::{from_fn, from_fn_with_state},
    routing::get,
};
use tower_http::{
    services::ServeDir,
    trace::{DefaultOnResponse, OnResponse, TraceLayer},
};
use tracing::Span;

use crate::{
    i18n::Messages,
    middleware::{SecurityHeaders, request_id_middleware, security_headers_middleware},
    state::AppState,
};

/// Directory served under `/static`, relative to the workspace root.
pub const STATIC_DIR: &str = "crates/admin/static";

/// Shared page chrome: navigation, titles and the app bridge key.
#[derive(Debug, Clone, Copy)]
pub struct Layout<'a> {
    /// Message bundle.
    pub messages: &'a Messages,
    /// API key for the embedded app bridge; no bridge script without it.
    pub api_key: Option<&'a str>,
    /// Path of the current page, for the active nav entry.
    pub current_path: &'static str,
}

impl<'a> Layout<'a> {
    /// Chrome for the page at `current_path`.
    #[must_use]
    pub fn new(state: &'a AppState, current_path: &'static str) -> Self {
        Self {
            messages: state.messages(),
            api_key: state.config().shopify.api_key.as_deref(),
            current_path,
        }
    }
}

/// Page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/inventory", get(inventory::index).post(inventory::submit))
        .route("/products", get(products::index))
        .route("/drafts", get(products::drafts))
        .merge(api::router())
}

/// The full application: routes, static files and the middleware stack.
///
/// Sentry layers are added by the binary, outside this router.
pub fn app(state: AppState, security: SecurityHeaders) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(from_fn_with_state(
            Arc::new(security),
            security_headers_middleware,
        ))
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(|response: &Response<_>, latency: Duration, span: &Span| {
                    span.record("status", response.status().as_u16());
                    span.record(
                        "latency_ms",
                        u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                    );
                    DefaultOnResponse::default().on_response(response, latency, span);
                }),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check Shopify.
async fn health() -> &'static str {
    "ok"
}
