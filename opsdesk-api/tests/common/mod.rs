/// Common test utilities for integration tests
///
/// Builds the full application on top of the in-memory repositories, so
/// every test runs against a private, isolated store with no external
/// services. Request helpers drive the router directly through tower.
use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use opsdesk_api::app::{build_router, AppState, StorageBackend};
use opsdesk_api::config::Config;
use opsdesk_api::identity::USER_ID_HEADER;
use opsdesk_shared::repos::memory::{
    MemoryClientRepo, MemoryProjectRepo, MemoryTaskRepo, MemoryUserRepo,
};
use opsdesk_shared::seed;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Test context wrapping the assembled router
pub struct TestContext {
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a context with empty in-memory stores
    pub fn new() -> Self {
        let state = AppState::new(
            Arc::new(MemoryUserRepo::new()),
            Arc::new(MemoryClientRepo::new()),
            Arc::new(MemoryProjectRepo::new()),
            Arc::new(MemoryTaskRepo::new()),
            StorageBackend::Memory,
            Config::default(),
        );
        Self {
            app: build_router(state),
        }
    }

    /// Creates a context pre-populated with the demo dataset
    pub async fn seeded() -> Self {
        let users = Arc::new(MemoryUserRepo::new());
        let clients = Arc::new(MemoryClientRepo::new());
        let projects = Arc::new(MemoryProjectRepo::new());
        let tasks = Arc::new(MemoryTaskRepo::new());
        seed::seed(
            users.as_ref(),
            clients.as_ref(),
            projects.as_ref(),
            tasks.as_ref(),
        )
        .await
        .unwrap();
        let state = AppState::new(
            users,
            clients,
            projects,
            tasks,
            StorageBackend::Memory,
            Config::default(),
        );
        Self {
            app: build_router(state),
        }
    }

    /// Sends a request with an optional JSON body and optional acting user
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        user_id: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(id) = user_id {
            builder = builder.header(USER_ID_HEADER, id);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.app.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> Response<Body> {
        self.request(Method::POST, uri, Some(body), None).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> Response<Body> {
        self.request(Method::PUT, uri, Some(body), None).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> Response<Body> {
        self.request(Method::PATCH, uri, Some(body), None).await
    }

    pub async fn delete(&self, uri: &str) -> Response<Body> {
        self.request(Method::DELETE, uri, None, None).await
    }
}

/// Reads a response body as JSON
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Sends a request and asserts the status before decoding the body
pub async fn expect_json(response: Response<Body>, expected: StatusCode) -> Value {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    if status != expected {
        panic!(
            "Expected {expected}, got {status}: {}",
            String::from_utf8_lossy(&bytes)
        );
    }
    serde_json::from_slice(&bytes).unwrap()
}
