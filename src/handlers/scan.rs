// URL scan handler
// POST /scan -> heuristic risk report

use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::{
    app::AppState,
    services::heuristics::ScanOutcome,
    utils::scan_errors::{ScanApiError, ScanApiResult, ScanErrorResponse},
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "url": "http://192.168.1.55/login" }))]
pub struct ScanRequest {
    /// URL to score; a scheme is optional
    #[serde(default)]
    pub url: Option<String>,
}

/// Score a URL against the heuristic rule table
#[utoipa::path(
    post,
    path = "/scan",
    tag = "Scan",
    operation_id = "scanUrl",
    request_body = ScanRequest,
    responses(
        (status = 200, description = "Risk report, or an error body when the URL cannot be parsed", body = ScanOutcome),
        (status = 400, description = "Missing url or malformed request body", body = ScanErrorResponse)
    )
)]
pub async fn scan_url(
    State(state): State<AppState>,
    payload: Result<Json<ScanRequest>, JsonRejection>,
) -> ScanApiResult<impl IntoResponse> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected scan request: {}", rejection.body_text());
        ScanApiError::InvalidBody(rejection.body_text())
    })?;

    // Only an absent or null field is missing; "" is scored like any other input
    let url = request.url.ok_or(ScanApiError::MissingUrl)?;

    let outcome = state.detector.check_url(&url);
    match &outcome {
        ScanOutcome::Report(report) => info!(
            url = %report.url,
            risk_score = report.risk_score,
            verdict = %report.verdict,
            flags = report.flags.len(),
            "URL scanned"
        ),
        ScanOutcome::Failed(failure) => warn!(error = %failure.error, "URL could not be scanned"),
    }

    Ok(Json(outcome))
}
