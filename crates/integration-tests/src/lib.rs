//! Integration tests for Tillpoint.
//!
//! The back-office router is driven in-process with `tower::ServiceExt`:
//! no port binding, no external server. Session state lives in the router's
//! in-memory store, so cloning the router for each request still shares
//! sessions across a test.
//!
//! # Test Categories
//!
//! - `auth_flow` - Login, logout, session cookie round-trips
//! - `user_management` - RBAC and the user admin operations
//! - `audit_and_settings` - Audit queries, permission groups, settings

// Panics in the harness surface as test failures, which is what we want.
#![allow(clippy::unwrap_used)]
#![allow(clippy::missing_panics_doc)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use tillpoint_backoffice::config::BackofficeConfig;

/// Build a fresh back-office app with default (demo) configuration.
#[must_use]
pub fn test_app() -> Router {
    tillpoint_backoffice::app(BackofficeConfig::default())
}

/// A logged-in test client: the app plus the session cookie.
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    /// Create a client with no session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            app: test_app(),
            cookie: None,
        }
    }

    /// Create a client and log in with the given demo credentials.
    pub async fn logged_in(email: &str, password: &str) -> Self {
        let mut client = Self::new();
        let response = client
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK, "demo login failed");
        client
    }

    /// Send a request, carrying and capturing the session cookie.
    pub async fn request(
        &mut self,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let raw = set_cookie.to_str().unwrap();
            // Keep only the name=value pair; attributes are not echoed back.
            let pair = raw.split(';').next().unwrap().to_owned();
            self.cookie = Some(pair);
        }

        response
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

/// The raw `Set-Cookie` header of a response, if present.
#[must_use]
pub fn set_cookie_header(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .map(|value| value.to_str().unwrap().to_owned())
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
