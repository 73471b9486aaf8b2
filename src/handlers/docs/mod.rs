// API Documentation handlers
pub mod swagger_ui;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;

use crate::{
    handlers::{health, rules, scan},
    services::heuristics::{RiskReport, ScanFailure, ScanOutcome, Verdict},
    utils::scan_errors::ScanErrorResponse,
};

/// OpenAPI document for every public endpoint
#[derive(OpenApi)]
#[openapi(
    info(
        title = "PhishGuard Backend API",
        description = "Heuristic phishing risk scoring for URLs",
        version = "1.0.0"
    ),
    paths(
        health::home,
        health::health_check,
        scan::scan_url,
        rules::list_rules,
    ),
    components(
        schemas(
            scan::ScanRequest,
            ScanOutcome,
            RiskReport,
            ScanFailure,
            Verdict,
            ScanErrorResponse,
            rules::RuleTableResponse,
            rules::RuleSummary,
            rules::VerdictThresholds,
            health::StatusResponse,
            health::HealthResponse,
        )
    ),
    tags(
        (name = "Scan", description = "URL risk scoring"),
        (name = "Health", description = "Service health checks")
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification at /v1/docs/openapi.json
pub async fn serve_openapi_spec() -> Response {
    match ApiDoc::openapi().to_json() {
        Ok(spec) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            spec,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to serialize OpenAPI spec: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Re-export swagger UI handler
pub use swagger_ui::serve_swagger_ui;
