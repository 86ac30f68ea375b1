// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! File-backed item store.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use shelf_core::types::now;
use shelf_core::{Item, ItemId, ItemPatch, ItemStore, NewItem, ShelfError};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::file;

/// Item store persisted to a single JSON file.
///
/// Mutations hold the write side of the lock across read-modify-write, so they
/// are serialized and never lose each other's effects. Reads hold the read
/// side and therefore always see the state after some complete mutation.
///
/// The lock guard is moved into the blocking task that touches the file, so a
/// caller that is cancelled mid-operation cannot release the lock while its
/// write is still in flight.
pub struct FileStore {
    path: PathBuf,
    lock: Arc<RwLock<()>>,
}

impl FileStore {
    /// Open the store at `path`, creating the parent directory and an empty
    /// collection if needed. Safe to call repeatedly; existing data is kept.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, ShelfError> {
        let path = path.into();
        let init_path = path.clone();
        let created = run_blocking(move || file::ensure_initialized(&init_path)).await?;
        if created {
            info!(path = %path.display(), "created empty item store");
        } else {
            info!(path = %path.display(), "opened item store");
        }
        Ok(Self {
            path,
            lock: Arc::new(RwLock::new(())),
        })
    }

    async fn read(&self) -> Result<Vec<Item>, ShelfError> {
        let guard = Arc::clone(&self.lock).read_owned().await;
        let path = self.path.clone();
        run_blocking(move || {
            let _guard = guard;
            file::read_items(&path)
        })
        .await
    }

    /// Run `op` on the full collection inside the critical section.
    ///
    /// `op` returns its result and whether the collection changed; the file is
    /// rewritten only when it did.
    async fn mutate<R, F>(&self, op: F) -> Result<R, ShelfError>
    where
        R: Send + 'static,
        F: FnOnce(&mut Vec<Item>) -> (R, bool) + Send + 'static,
    {
        let guard = Arc::clone(&self.lock).write_owned().await;
        let path = self.path.clone();
        run_blocking(move || {
            let _guard = guard;
            let mut items = file::read_items(&path)?;
            let (result, changed) = op(&mut items);
            if changed {
                file::write_items(&path, &items)?;
            }
            Ok(result)
        })
        .await
    }
}

/// Run blocking file work off the async executor.
async fn run_blocking<T, F>(f: F) -> Result<T, ShelfError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ShelfError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ShelfError::Internal(format!("storage task failed: {e}")))?
}

#[async_trait]
impl ItemStore for FileStore {
    async fn list(&self) -> Result<Vec<Item>, ShelfError> {
        self.read().await
    }

    async fn get(&self, id: ItemId) -> Result<Option<Item>, ShelfError> {
        let items = self.read().await?;
        Ok(items.into_iter().find(|item| item.id == id))
    }

    async fn create(&self, data: NewItem) -> Result<Item, ShelfError> {
        let (item, count) = self
            .mutate(move |items| {
                let mut item = Item::from_new(data, now());
                while items.iter().any(|existing| existing.id == item.id) {
                    warn!(
                        id = %item.id,
                        "generated item id collides with an existing item, regenerating"
                    );
                    item.id = ItemId::new_v4();
                }
                items.push(item.clone());
                ((item, items.len()), true)
            })
            .await?;
        debug!(id = %item.id, count, "item created");
        Ok(item)
    }

    async fn update(&self, id: ItemId, patch: ItemPatch) -> Result<Option<Item>, ShelfError> {
        let updated = self
            .mutate(move |items| match items.iter_mut().find(|item| item.id == id) {
                Some(item) => {
                    item.apply(patch, now());
                    (Some(item.clone()), true)
                }
                None => (None, false),
            })
            .await?;
        match &updated {
            Some(_) => debug!(%id, "item updated"),
            None => debug!(%id, "update target not found"),
        }
        Ok(updated)
    }

    async fn delete(&self, id: ItemId) -> Result<bool, ShelfError> {
        let removed = self
            .mutate(move |items| {
                let before = items.len();
                items.retain(|item| item.id != id);
                let removed = items.len() != before;
                (removed, removed)
            })
            .await?;
        debug!(%id, removed, "item delete");
        Ok(removed)
    }
}
