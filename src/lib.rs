// Library exports for PhishGuard Backend
// This file exposes modules and the router builder for binaries and tests

pub mod app;
pub mod app_config;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use app::AppState;
pub use app_config::{AppConfig, ConfigError, Environment};
pub use services::{
    HeuristicDetector, RiskReport, ScanFailure, ScanOutcome, TrainingConfig, TrainingError,
    TrainingReport, UrlClassifier, Verdict,
};
pub use utils::{ScanApiError, ScanErrorResponse};

// Re-export handler route builders
pub use handlers::{docs_routes, health_routes, scan_routes};

use axum::{middleware::from_fn_with_state, Router};
use tower_http::trace::TraceLayer;

/// Build the full application router around a prepared state
pub fn create_app(state: AppState) -> Router {
    let mut router = Router::new().merge(health_routes()).merge(scan_routes());

    if state.config.enable_swagger_ui {
        router = router.merge(docs_routes());
    }

    router
        .layer(from_fn_with_state(
            state.clone(),
            middleware::dynamic_cors_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
