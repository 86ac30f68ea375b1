// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the items REST API.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use shelf_core::{Item, ItemId, ItemPatch, NewItem};

use crate::error::ApiError;
use crate::server::GatewayState;

/// Response body for GET {prefix}/health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Response body for GET /.
#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub message: String,
}

fn parse_id(raw: &str) -> Result<ItemId, ApiError> {
    raw.parse::<ItemId>().map_err(ApiError::from)
}

/// GET {prefix}/items
pub async fn list_items(State(state): State<GatewayState>) -> Result<Json<Vec<Item>>, ApiError> {
    let items = state.store.list().await?;
    Ok(Json(items))
}

/// POST {prefix}/items
///
/// Validates the body before touching the store.
pub async fn create_item(
    State(state): State<GatewayState>,
    body: Result<Json<NewItem>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(data) = body?;
    data.validate()?;
    let item = state.store.create(data).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET {prefix}/items/{id}
pub async fn get_item(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<Json<Item>, ApiError> {
    let id = parse_id(&id)?;
    state
        .store
        .get(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// PUT {prefix}/items/{id}
///
/// Partial update: absent fields keep their stored value.
pub async fn update_item(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    body: Result<Json<ItemPatch>, JsonRejection>,
) -> Result<Json<Item>, ApiError> {
    let id = parse_id(&id)?;
    let Json(patch) = body?;
    patch.validate()?;
    state
        .store
        .update(id, patch)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// DELETE {prefix}/items/{id}
pub async fn delete_item(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    if state.store.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

/// GET {prefix}/health
pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// GET /
pub async fn get_root(State(state): State<GatewayState>) -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: format!("Welcome to {}", state.app_name),
    })
}
