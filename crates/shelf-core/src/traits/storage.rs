// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Item store trait for persistence backends.

use async_trait::async_trait;

use crate::error::ShelfError;
use crate::types::{Item, ItemId, ItemPatch, NewItem};

/// Persistence backend for items.
///
/// Every method returns owned copies; callers never hold references into the
/// store's state. Absence is reported through `Option`/`bool`, not errors.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// All items in insertion order.
    async fn list(&self) -> Result<Vec<Item>, ShelfError>;

    /// The item with the given id, if present.
    async fn get(&self, id: ItemId) -> Result<Option<Item>, ShelfError>;

    /// Insert a new item, assigning its id and timestamps.
    async fn create(&self, data: NewItem) -> Result<Item, ShelfError>;

    /// Apply a partial update. Returns `None` if no item has this id.
    async fn update(&self, id: ItemId, patch: ItemPatch) -> Result<Option<Item>, ShelfError>;

    /// Remove an item. Returns whether anything was removed.
    async fn delete(&self, id: ItemId) -> Result<bool, ShelfError>;
}
