// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Shelf.
//!
//! This crate provides the item model, the shared error type, and the
//! [`ItemStore`] trait implemented by persistence backends and consumed by
//! the HTTP gateway.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{FieldViolation, ShelfError};
pub use traits::ItemStore;
pub use types::{Item, ItemId, ItemPatch, NewItem};
