// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the file-backed item store: durability across
//! reopen, corruption handling, and behavior under concurrent callers.

use std::collections::HashSet;
use std::sync::Arc;

use shelf_core::{ItemPatch, ItemStore, NewItem, ShelfError};
use shelf_storage::FileStore;

fn new_item(name: &str, price: f64) -> NewItem {
    NewItem {
        name: name.to_string(),
        description: None,
        price,
    }
}

// ---- Initialization ----

#[tokio::test]
async fn open_twice_keeps_existing_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data/db.json");

    let store = FileStore::open(&path).await.unwrap();
    let item = store.create(new_item("Widget", 9.99)).await.unwrap();

    let reopened = FileStore::open(&path).await.unwrap();
    assert_eq!(reopened.list().await.unwrap(), vec![item]);
}

#[tokio::test]
async fn data_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");

    let (kept, gone) = {
        let store = FileStore::open(&path).await.unwrap();
        let kept = store.create(new_item("kept", 1.0)).await.unwrap();
        let gone = store.create(new_item("gone", 2.0)).await.unwrap();
        let kept = store
            .update(kept.id, ItemPatch {
                price: Some(3.5),
                ..ItemPatch::default()
            })
            .await
            .unwrap()
            .unwrap();
        assert!(store.delete(gone.id).await.unwrap());
        (kept, gone)
    };

    let store = FileStore::open(&path).await.unwrap();
    assert_eq!(store.get(kept.id).await.unwrap(), Some(kept));
    assert_eq!(store.get(gone.id).await.unwrap(), None);
}

#[tokio::test]
async fn file_is_human_readable_json_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");
    let store = FileStore::open(&path).await.unwrap();
    let item = store.create(new_item("Widget", 9.99)).await.unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let records = raw.as_array().expect("top-level array");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], item.id.to_string());
    assert_eq!(records[0]["name"], "Widget");
    assert!(records[0]["created_at"].as_str().unwrap().ends_with("+00:00"));
}

// ---- Corruption ----

#[tokio::test]
async fn corrupt_file_fails_loudly_and_is_not_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");
    let garbage = r#"[{"id": "7f1d1a3e-8a7c-4b51-9a0e-2d3f4b5c6d7e", "name": "half"#;
    std::fs::write(&path, garbage).unwrap();

    let store = FileStore::open(&path).await.expect("open does not parse the file");

    assert!(matches!(store.list().await, Err(ShelfError::Corruption { .. })));
    assert!(matches!(
        store.create(new_item("new", 1.0)).await,
        Err(ShelfError::Corruption { .. })
    ));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), garbage);
}

#[tokio::test]
async fn record_missing_price_is_corruption() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");
    std::fs::write(
        &path,
        r#"[{"id": "7f1d1a3e-8a7c-4b51-9a0e-2d3f4b5c6d7e", "name": "x",
            "created_at": "2026-01-02T03:04:05+00:00",
            "updated_at": "2026-01-02T03:04:05+00:00"}]"#,
    )
    .unwrap();
    let store = FileStore::open(&path).await.unwrap();
    assert!(matches!(
        store.get(shelf_core::ItemId::new_v4()).await,
        Err(ShelfError::Corruption { .. })
    ));
}

#[tokio::test]
async fn records_breaking_item_invariants_are_corruption() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");
    let contents = r#"[
  {"id": "7f1d1a3e-8a7c-4b51-9a0e-2d3f4b5c6d7e", "name": "first", "price": 1.0,
   "created_at": "2026-01-02T03:04:05+00:00", "updated_at": "2026-01-02T03:04:05+00:00"},
  {"id": "7f1d1a3e-8a7c-4b51-9a0e-2d3f4b5c6d7e", "name": "", "price": -5,
   "created_at": "2026-01-02T03:04:05+00:00", "updated_at": "2026-01-01T00:00:00+00:00"}
]"#;
    std::fs::write(&path, contents).unwrap();
    let store = FileStore::open(&path).await.unwrap();

    assert!(matches!(store.list().await, Err(ShelfError::Corruption { .. })));
    let id: shelf_core::ItemId = "7f1d1a3e-8a7c-4b51-9a0e-2d3f4b5c6d7e".parse().unwrap();
    assert!(matches!(store.delete(id).await, Err(ShelfError::Corruption { .. })));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), contents);
}

// ---- Concurrency ----

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_yield_distinct_ids() {
    const N: usize = 50;
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::open(dir.path().join("db.json")).await.unwrap());

    let handles: Vec<_> = (0..N)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store
                    .create(new_item(&format!("item-{i}"), i as f64))
                    .await
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        let item = handle.await.unwrap().unwrap();
        ids.insert(item.id);
    }

    assert_eq!(ids.len(), N);
    let listed = store.list().await.unwrap();
    assert_eq!(listed.len(), N);
    assert!(listed.iter().all(|item| ids.contains(&item.id)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_updates_apply_one_complete_update() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::open(dir.path().join("db.json")).await.unwrap());
    let id = store.create(new_item("original", 1.0)).await.unwrap().id;

    for round in 0..20 {
        let a = {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store
                    .update(id, ItemPatch {
                        name: Some(format!("a-{round}")),
                        price: Some(100.0),
                        description: Some("from a".into()),
                    })
                    .await
            })
        };
        let b = {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store
                    .update(id, ItemPatch {
                        name: Some(format!("b-{round}")),
                        price: Some(200.0),
                        description: Some("from b".into()),
                    })
                    .await
            })
        };
        a.await.unwrap().unwrap().unwrap();
        b.await.unwrap().unwrap().unwrap();

        let current = store.get(id).await.unwrap().unwrap();
        let from_a = current.name == format!("a-{round}")
            && current.price == 100.0
            && current.description.as_deref() == Some("from a");
        let from_b = current.name == format!("b-{round}")
            && current.price == 200.0
            && current.description.as_deref() == Some("from b");
        assert!(from_a || from_b, "mixed update state: {current:?}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn interleaved_creates_and_updates_lose_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::open(dir.path().join("db.json")).await.unwrap());
    let target = store.create(new_item("target", 0.0)).await.unwrap().id;

    // Each task creates its own item while others update the shared one;
    // every create must still be present at the end.
    let handles: Vec<_> = (0..20)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store.create(new_item(&format!("side-{i}"), 1.0)).await.unwrap();
                store
                    .update(target, ItemPatch {
                        price: Some(i as f64),
                        ..ItemPatch::default()
                    })
                    .await
                    .unwrap()
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.list().await.unwrap().len(), 21);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn readers_never_observe_a_torn_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::open(dir.path().join("db.json")).await.unwrap());

    let writer = {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            for i in 0..40 {
                store
                    .create(NewItem {
                        name: format!("bulk-{i}"),
                        description: Some("x".repeat(500)),
                        price: 1.0,
                    })
                    .await
                    .unwrap();
            }
        })
    };

    let mut last_len = 0;
    while !writer.is_finished() {
        let items = store.list().await.expect("reads always see a complete file");
        assert!(items.len() >= last_len);
        last_len = items.len();
    }
    writer.await.unwrap();
    assert_eq!(store.list().await.unwrap().len(), 40);
}

// ---- End-to-end scenario ----

#[tokio::test]
async fn widget_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path().join("db.json")).await.unwrap();

    let created = store.create(new_item("Widget", 9.99)).await.unwrap();
    assert_eq!(created.created_at, created.updated_at);

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let updated = store
        .update(created.id, ItemPatch {
            price: Some(12.0),
            ..ItemPatch::default()
        })
        .await
        .unwrap()
        .expect("item exists");
    assert_eq!(updated.price, 12.0);
    assert_eq!(updated.name, "Widget");
    assert!(updated.updated_at > updated.created_at);

    assert!(store.delete(created.id).await.unwrap());
    assert_eq!(store.get(created.id).await.unwrap(), None);
}
