// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;

use axum::{Router, routing::get};
use shelf_core::{ItemStore, ShelfError};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Item store backing the REST API.
    pub store: Arc<dyn ItemStore>,
    /// Application name shown on the welcome route.
    pub app_name: Arc<str>,
}

impl GatewayState {
    pub fn new(store: Arc<dyn ItemStore>, app_name: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            app_name: app_name.into(),
        }
    }
}

/// Gateway server configuration (mirrors the `[server]` section of the config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind. 0 picks a free port.
    pub port: u16,
    /// Path prefix for the API routes, e.g. "/api". Empty mounts them at the root.
    pub api_prefix: String,
}

/// Build the application router.
///
/// Routes under `api_prefix`:
/// - GET/POST /items
/// - GET/PUT/DELETE /items/{id}
/// - GET /health
///
/// plus the welcome route at `/`.
pub fn router(state: GatewayState, api_prefix: &str) -> Router {
    let api_routes = Router::new()
        .route(
            "/items",
            get(handlers::list_items).post(handlers::create_item),
        )
        .route(
            "/items/{id}",
            get(handlers::get_item)
                .put(handlers::update_item)
                .delete(handlers::delete_item),
        )
        .route("/health", get(handlers::get_health));

    let api_routes = if api_prefix.is_empty() {
        api_routes
    } else {
        Router::new().nest(api_prefix, api_routes)
    };

    Router::new()
        .route("/", get(handlers::get_root))
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind a TCP listener on the configured host:port.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener, ShelfError> {
    let addr = format!("{}:{}", config.host, config.port);
    TcpListener::bind(&addr)
        .await
        .map_err(|e| ShelfError::Server {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })
}

/// Serve `app` on `listener` until `shutdown` is cancelled.
///
/// In-flight requests are allowed to finish before this returns.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: CancellationToken,
) -> Result<(), ShelfError> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "gateway server listening");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| ShelfError::Server {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("gateway server stopped");
    Ok(())
}

/// Start the gateway HTTP server and run it until `shutdown` is cancelled.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: CancellationToken,
) -> Result<(), ShelfError> {
    let app = router(state, &config.api_prefix);
    let listener = bind(config).await?;
    serve(listener, app, shutdown).await
}
