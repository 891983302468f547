//! HTTP routes.
//!
//! The probe lives at `/` and accepts any method. Every other path gets the
//! router's plain 404. Request tracing is enabled via middleware that
//! generates a unique request ID for each incoming request.

pub mod health;

use axum::{middleware, routing::any, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router for the probe.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", any(health::check))
        .with_state(state)
        // Probe results must always be fresh
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
