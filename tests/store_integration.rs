// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! File-backed store: persistence, external edits and change events.

use flavourfi::db::{collections, ChangeKind, ChangeOrigin, LocalStore};
use flavourfi::models::Recipe;
use flavourfi::services::FavoritesService;
use std::fs;
use std::time::Duration;

#[test]
fn test_collections_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = LocalStore::open(dir.path()).unwrap();
        let favorites = FavoritesService::new(store);
        favorites.toggle(Recipe::new(1, "Soup")).unwrap();
        favorites.toggle(Recipe::new(2, "Salad")).unwrap();
    }

    let path = dir.path().join("favorites.json");
    assert!(path.exists());

    let favorites = FavoritesService::new(LocalStore::open(dir.path()).unwrap());
    let ids: Vec<u64> = favorites.list().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn test_corrupt_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("favorites.json"), "{not json").unwrap();

    let store = LocalStore::open(dir.path()).unwrap();
    let favorites = FavoritesService::new(store.clone());
    assert!(favorites.list().is_empty());

    // The next write replaces the corrupt value.
    favorites.toggle(Recipe::new(3, "Pie")).unwrap();
    assert_eq!(favorites.list().len(), 1);
    let on_disk: Vec<Recipe> =
        serde_json::from_str(&fs::read_to_string(dir.path().join("favorites.json")).unwrap())
            .unwrap();
    assert_eq!(on_disk[0].id, 3);
}

#[test]
fn test_refresh_picks_up_external_edits() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::open(dir.path()).unwrap();
    let favorites = FavoritesService::new(store.clone());
    favorites.toggle(Recipe::new(1, "Soup")).unwrap();

    let mut events = store.subscribe();

    // Another process rewrites favorites and drops a shopping list in.
    let edited = serde_json::to_string(&vec![Recipe::new(7, "Curry")]).unwrap();
    fs::write(dir.path().join("favorites.json"), edited).unwrap();
    fs::write(
        dir.path().join("shoppingList.json"),
        r#"[{"id": "1", "name": "Milk"}]"#,
    )
    .unwrap();

    assert_eq!(store.refresh().unwrap(), 2);
    assert_eq!(favorites.list()[0].id, 7);
    let shopping: Vec<serde_json::Value> = store.read_collection(collections::SHOPPING_LIST);
    assert_eq!(shopping.len(), 1);

    let mut keys = Vec::new();
    for _ in 0..2 {
        let event = events.try_recv().unwrap();
        assert_eq!(event.kind, ChangeKind::Written);
        assert_eq!(event.origin, ChangeOrigin::External);
        keys.push(event.key);
    }
    keys.sort();
    assert_eq!(keys, vec!["favorites", "shoppingList"]);

    // Nothing changed since.
    assert_eq!(store.refresh().unwrap(), 0);

    fs::remove_file(dir.path().join("shoppingList.json")).unwrap();
    assert_eq!(store.refresh().unwrap(), 1);
    let event = events.try_recv().unwrap();
    assert_eq!(event.key, "shoppingList");
    assert_eq!(event.kind, ChangeKind::Removed);
    assert!(store
        .read_collection::<serde_json::Value>(collections::SHOPPING_LIST)
        .is_empty());
}

#[tokio::test]
async fn test_refresh_task_polls_directory() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::open(dir.path()).unwrap();
    let mut events = store.subscribe();
    let task = store.spawn_refresh_task(Duration::from_millis(20));

    let edited = serde_json::to_string(&vec![Recipe::new(4, "Tacos")]).unwrap();
    // Rename into place so the poller never sees a half-written file.
    let tmp = dir.path().join("recentlyViewed.json.tmp");
    fs::write(&tmp, edited).unwrap();
    fs::rename(&tmp, dir.path().join("recentlyViewed.json")).unwrap();

    let event = tokio::time::timeout(Duration::from_secs(5), events.recv())
        .await
        .expect("Timed out waiting for refresh")
        .unwrap();
    task.abort();

    assert_eq!(event.key, collections::RECENTLY_VIEWED);
    assert_eq!(event.origin, ChangeOrigin::External);
    let recent: Vec<Recipe> = store.read_collection(collections::RECENTLY_VIEWED);
    assert_eq!(recent[0].title, "Tacos");
}
