use axum::{
    body::Body,
    extract::State,
    http::{
        header::{self, HeaderValue},
        Method, Request, Response, StatusCode,
    },
    middleware::Next,
};
use tracing::debug;

use crate::{app::AppState, app_config::AppConfig};

/// Value to send back in `Access-Control-Allow-Origin`, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigin {
    Any,
    Exact(String),
}

/// Decide which origin, if any, the response should allow
pub fn resolve_allowed_origin(config: &AppConfig, origin: Option<&str>) -> Option<AllowedOrigin> {
    if config.allows_any_origin() {
        debug!("CORS: Wildcard configured, allowing any origin");
        return Some(AllowedOrigin::Any);
    }

    origin.and_then(|req_origin| {
        if config.cors_allowed_origins.iter().any(|o| o == req_origin) {
            debug!("CORS: Origin allowed from whitelist: {}", req_origin);
            Some(AllowedOrigin::Exact(req_origin.to_string()))
        } else {
            debug!("CORS: Origin not in whitelist: {}", req_origin);
            None
        }
    })
}

fn apply_origin(response: &mut Response<Body>, allowed: &AllowedOrigin) {
    let headers = response.headers_mut();
    match allowed {
        AllowedOrigin::Any => {
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("*"),
            );
        }
        AllowedOrigin::Exact(origin) => {
            // Origin came from a request header, so it is always a valid value
            if let Ok(value) = HeaderValue::from_str(origin) {
                headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
                headers.insert(header::VARY, HeaderValue::from_static("Origin"));
            }
        }
    }
}

/// CORS middleware driven by `CORS_ALLOWED_ORIGINS`
pub async fn dynamic_cors_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response<Body>, StatusCode> {
    let origin = req
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let allowed_origin = resolve_allowed_origin(&state.config, origin.as_deref());

    // Handle preflight OPTIONS requests
    if req.method() == Method::OPTIONS {
        let mut response = Response::new(Body::empty());

        if let Some(allowed) = &allowed_origin {
            apply_origin(&mut response, allowed);
            let headers = response.headers_mut();
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static("GET, POST, OPTIONS"),
            );
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static("content-type, accept, origin, x-requested-with"),
            );
            headers.insert(
                header::ACCESS_CONTROL_MAX_AGE,
                HeaderValue::from_static("3600"),
            );
        }

        *response.status_mut() = StatusCode::OK;
        return Ok(response);
    }

    let mut response = next.run(req).await;

    if let Some(allowed) = &allowed_origin {
        apply_origin(&mut response, allowed);
    }

    Ok(response)
}
