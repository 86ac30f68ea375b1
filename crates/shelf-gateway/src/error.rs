// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping from domain and extractor errors to HTTP responses.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use shelf_core::{FieldViolation, ShelfError};

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
    /// Per-field validation failures, when the request body was rejected.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldViolation>,
}

/// Errors a handler can return.
#[derive(Debug)]
pub enum ApiError {
    /// No item with the requested id.
    NotFound,
    /// The path id is not a valid item id.
    BadRequest(String),
    /// The body parsed but failed field validation.
    Unprocessable(Vec<FieldViolation>),
    /// The body could not be extracted as JSON of the expected shape.
    Body(JsonRejection),
    /// Storage or other server-side failure.
    Internal(ShelfError),
}

impl From<ShelfError> for ApiError {
    fn from(err: ShelfError) -> Self {
        match err {
            ShelfError::Validation { violations } => Self::Unprocessable(violations),
            ShelfError::InvalidId(value) => Self::BadRequest(format!("invalid item id: {value}")),
            other => Self::Internal(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Body(rejection)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Body(rejection) => rejection.status(),
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::NotFound => ErrorResponse {
                error: "item not found".to_string(),
                details: Vec::new(),
            },
            Self::BadRequest(message) => ErrorResponse {
                error: message,
                details: Vec::new(),
            },
            Self::Unprocessable(details) => ErrorResponse {
                error: "validation failed".to_string(),
                details,
            },
            Self::Body(rejection) => ErrorResponse {
                error: rejection.body_text(),
                details: Vec::new(),
            },
            Self::Internal(err) => {
                tracing::error!(error = %err, "request failed");
                ErrorResponse {
                    error: "internal server error".to_string(),
                    details: Vec::new(),
                }
            }
        };
        (status, Json(body)).into_response()
    }
}
