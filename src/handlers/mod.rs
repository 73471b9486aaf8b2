// HTTP handlers for PhishGuard Backend

pub mod docs;
pub mod health;
pub mod rules;
pub mod scan;

use crate::app::AppState;
use axum::{
    routing::{get, post},
    Router,
};

// Scan routes
pub fn scan_routes() -> Router<AppState> {
    Router::new()
        .route("/scan", post(scan::scan_url))
        .route("/rules", get(rules::list_rules))
}

// Liveness routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::home))
        .route("/health", get(health::health_check))
}

// Documentation routes, mounted only when docs are enabled
pub fn docs_routes() -> Router<AppState> {
    Router::new()
        .route("/v1/docs", get(docs::serve_swagger_ui))
        .route("/v1/docs/openapi.json", get(docs::serve_openapi_spec))
}
