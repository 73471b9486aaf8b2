// Scan API error handling
// Transport-level failures raised before the detector is ever invoked

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

// =============================================================================
// ERROR TYPES
// =============================================================================

#[derive(Error, Debug)]
pub enum ScanApiError {
    #[error("No URL provided")]
    MissingUrl,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "error": "No URL provided", "code": "MISSING_URL" }))]
pub struct ScanErrorResponse {
    pub error: String,
    pub code: String,
}

impl ScanApiError {
    /// Get HTTP status code for error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ScanApiError::MissingUrl | ScanApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get error code for API response
    pub fn error_code(&self) -> &'static str {
        match self {
            ScanApiError::MissingUrl => "MISSING_URL",
            ScanApiError::InvalidBody(_) => "INVALID_BODY",
        }
    }

    pub fn to_response(&self) -> ScanErrorResponse {
        ScanErrorResponse {
            error: self.to_string(),
            code: self.error_code().to_string(),
        }
    }
}

impl IntoResponse for ScanApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = self.to_response();

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// RESULT TYPE
// =============================================================================

pub type ScanApiResult<T> = Result<T, ScanApiError>;

// =============================================================================
// TESTS
// =============================================================================
