// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for Shelf.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// The primary error type used by the item store and its callers.
///
/// Absence of a record is not an error: store operations report it through
/// `Option` and `bool` return values.
#[derive(Debug, Error)]
pub enum ShelfError {
    /// Caller-supplied item fields violate their constraints.
    #[error("invalid item: {}", join_violations(violations))]
    Validation { violations: Vec<FieldViolation> },

    /// A string could not be parsed as an item identifier.
    #[error("invalid item id `{0}`")]
    InvalidId(String),

    /// Reading or writing the backing file failed.
    #[error("storage I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The backing file holds malformed or incomplete data.
    #[error("corrupt store file {}: {source}", path.display())]
    Corruption {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// HTTP server errors (bind failure, accept loop failure).
    #[error("server error: {message}")]
    Server {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

/// A single field constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Name of the offending field.
    pub field: &'static str,
    /// Human-readable description of the constraint.
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}
