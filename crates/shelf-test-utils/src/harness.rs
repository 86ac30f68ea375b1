// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end gateway testing.
//!
//! `TestHarness` assembles the full router over a file store in a temp
//! directory (or over any supplied store) and drives it in-process, without
//! binding a socket.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use serde_json::Value;
use shelf_core::{ItemStore, ShelfError};
use shelf_gateway::{GatewayState, router};
use shelf_storage::FileStore;
use tempfile::TempDir;
use tower::ServiceExt;

/// Status and decoded body of a response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    /// Parsed JSON body; `Value::Null` for an empty body, or the raw text as a
    /// string if the body is not JSON.
    pub body: Value,
}

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    app_name: String,
    api_prefix: String,
    store: Option<Arc<dyn ItemStore>>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            app_name: "Shelf".to_string(),
            api_prefix: "/api".to_string(),
            store: None,
        }
    }

    /// Set the application name shown by the welcome route.
    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }

    /// Mount the API under a different prefix.
    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    /// Serve a caller-supplied store instead of a fresh file store.
    pub fn with_store(mut self, store: Arc<dyn ItemStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the harness, creating a temp directory and file store if no
    /// store was supplied.
    pub async fn build(self) -> Result<TestHarness, ShelfError> {
        let (store, db_path, temp_dir) = match self.store {
            Some(store) => (store, None, None),
            None => {
                let temp_dir = TempDir::new().map_err(|e| ShelfError::Io {
                    path: std::env::temp_dir(),
                    source: e,
                })?;
                let db_path = temp_dir.path().join("data/db.json");
                let store: Arc<dyn ItemStore> = Arc::new(FileStore::open(&db_path).await?);
                (store, Some(db_path), Some(temp_dir))
            }
        };

        let state = GatewayState::new(Arc::clone(&store), self.app_name);
        Ok(TestHarness {
            app: router(state, &self.api_prefix),
            store,
            db_path,
            _temp_dir: temp_dir,
        })
    }
}

/// The full gateway over a real or mock store.
pub struct TestHarness {
    app: Router,
    store: Arc<dyn ItemStore>,
    db_path: Option<PathBuf>,
    _temp_dir: Option<TempDir>,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Default harness: file store in a temp dir, API under `/api`.
    pub async fn new() -> Result<Self, ShelfError> {
        Self::builder().build().await
    }

    /// The store behind the router, for asserting on state directly.
    pub fn store(&self) -> &Arc<dyn ItemStore> {
        &self.store
    }

    /// Path of the backing file, when the harness owns a file store.
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Send a request with an optional JSON body.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        match body {
            Some(json) => {
                self.raw(method, uri, Some("application/json"), json.to_string())
                    .await
            }
            None => self.raw(method, uri, None, String::new()).await,
        }
    }

    /// Send a request with an arbitrary body and content type.
    pub async fn raw(
        &self,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: String,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let request = builder.body(Body::from(body)).expect("valid request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }
}
