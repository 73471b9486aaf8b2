// Common test utilities and helper structs
// Shared across all test files to avoid duplication
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, Response, StatusCode},
    Router,
};
use phishguard_backend::{create_app, AppConfig, AppState, Environment};
use serde::Serialize;
use tower::util::ServiceExt;

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
}

impl TestApp {
    /// Send a POST request
    pub fn post(&self, uri: &str) -> TestRequest {
        TestRequest::new(self, "POST", uri)
    }

    /// Send a GET request
    pub fn get(&self, uri: &str) -> TestRequest {
        TestRequest::new(self, "GET", uri)
    }

    /// Send an OPTIONS request
    pub fn options(&self, uri: &str) -> TestRequest {
        TestRequest::new(self, "OPTIONS", uri)
    }
}

/// Test request builder
pub struct TestRequest<'a> {
    app: &'a TestApp,
    request: Request<Body>,
}

impl<'a> TestRequest<'a> {
    fn new(app: &'a TestApp, method: &str, uri: &str) -> Self {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        Self { app, request }
    }

    /// Add JSON body to request
    pub fn json<T: Serialize>(self, body: &T) -> Self {
        let body_bytes = serde_json::to_vec(body).unwrap();
        self.raw_body("application/json", body_bytes)
    }

    /// Add an arbitrary body with the given content type
    pub fn raw_body(mut self, content_type: &str, body: impl Into<Body>) -> Self {
        let (parts, _) = self.request.into_parts();
        let mut request = Request::from_parts(parts, body.into());
        request.headers_mut().insert(
            header::CONTENT_TYPE,
            content_type.parse().unwrap(),
        );
        self.request = request;
        self
    }

    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        self.request
            .headers_mut()
            .insert(name, value.parse().unwrap());
        self
    }

    /// Send the request
    pub async fn send(self) -> TestResponse {
        let response = self.app.app.clone().oneshot(self.request).await.unwrap();

        TestResponse { response }
    }
}

/// Test response wrapper
pub struct TestResponse {
    response: Response<Body>,
}

impl TestResponse {
    /// Get status code
    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.response.headers()
    }

    /// Parse JSON response
    pub async fn json<T: serde::de::DeserializeOwned>(self) -> T {
        let body = axum::body::to_bytes(self.response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    /// Get response body as text
    pub async fn text(self) -> String {
        let body = axum::body::to_bytes(self.response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }
}

/// Configuration used by API tests, independent of the process environment
pub fn test_config() -> AppConfig {
    AppConfig {
        environment: Environment::Test,
        ..AppConfig::default()
    }
}

/// Setup test application with the default rule table
pub fn setup_test_app() -> TestApp {
    setup_test_app_with(test_config())
}

pub fn setup_test_app_with(config: AppConfig) -> TestApp {
    TestApp {
        app: create_app(AppState::new(config)),
    }
}

/// Write a labeled CSV into `dir` and return its path
pub fn write_dataset(dir: &Path, rows: &[(&str, &str)]) -> PathBuf {
    let path = dir.join("phishing_data.csv");
    let mut content = String::from("url,label\n");
    for (url, label) in rows {
        content.push_str(&format!("{},{}\n", url, label));
    }
    std::fs::write(&path, content).unwrap();
    path
}
