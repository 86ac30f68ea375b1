// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory item store for deterministic gateway tests.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use shelf_core::types::now;
use shelf_core::{Item, ItemId, ItemPatch, ItemStore, NewItem, ShelfError};
use tokio::sync::Mutex;

/// A mock store holding items in memory.
///
/// Every call is counted. When failing, each call returns a storage I/O
/// error instead of touching the items.
pub struct MockStore {
    items: Mutex<Vec<Item>>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl MockStore {
    /// Create an empty, working store.
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }

    /// Create a store whose every operation fails.
    pub fn failing() -> Self {
        let store = Self::new();
        store.set_failing(true);
        store
    }

    /// Switch failure mode on or off.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of store operations invoked so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self) -> Result<(), ShelfError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(ShelfError::Io {
                path: PathBuf::from("mock://items.json"),
                source: std::io::Error::other("mock storage failure"),
            });
        }
        Ok(())
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemStore for MockStore {
    async fn list(&self) -> Result<Vec<Item>, ShelfError> {
        self.enter()?;
        Ok(self.items.lock().await.clone())
    }

    async fn get(&self, id: ItemId) -> Result<Option<Item>, ShelfError> {
        self.enter()?;
        Ok(self.items.lock().await.iter().find(|i| i.id == id).cloned())
    }

    async fn create(&self, data: NewItem) -> Result<Item, ShelfError> {
        self.enter()?;
        let item = Item::from_new(data, now());
        self.items.lock().await.push(item.clone());
        Ok(item)
    }

    async fn update(&self, id: ItemId, patch: ItemPatch) -> Result<Option<Item>, ShelfError> {
        self.enter()?;
        let mut items = self.items.lock().await;
        Ok(items.iter_mut().find(|i| i.id == id).map(|item| {
            item.apply(patch, now());
            item.clone()
        }))
    }

    async fn delete(&self, id: ItemId) -> Result<bool, ShelfError> {
        self.enter()?;
        let mut items = self.items.lock().await;
        let before = items.len();
        items.retain(|i| i.id != id);
        Ok(items.len() != before)
    }
}
