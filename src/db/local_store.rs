// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local key-value store for user collections.
//!
//! Each key holds a JSON array. Values are cached in memory and, unless the
//! store is in-memory only, persisted as `<data_dir>/<key>.json`.
//!
//! Reads never fail: an absent or undecodable value reads as an empty list.
//! Writes go through a single lock so read-modify-write callers
//! (`update_collection`) see a consistent collection.
//!
//! Edits made by another process are picked up by `refresh()`, which the
//! server runs on a timer. Every change, local or external, is broadcast to
//! `subscribe()` receivers.

use crate::error::AppError;
use anyhow::Context;
use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;

const EVENT_CHANNEL_CAPACITY: usize = 64;
const MAX_KEY_LEN: usize = 128;
const FILE_EXTENSION: &str = "json";

/// What happened to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Written,
    Removed,
}

/// Whether a change came from this process or was found on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeOrigin {
    Local,
    External,
}

/// Storage-change notification.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct StoreEvent {
    pub key: String,
    pub kind: ChangeKind,
    pub origin: ChangeOrigin,
}

/// Handle to the store. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct LocalStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    /// `None` for in-memory stores
    dir: Option<PathBuf>,
    /// Raw JSON text per key
    cache: DashMap<String, String>,
    write_lock: Mutex<()>,
    events: broadcast::Sender<StoreEvent>,
}

impl LocalStore {
    /// Open (creating if needed) a store rooted at `dir` and load its collections.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, AppError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| {
            AppError::Storage(format!("Failed to create {}: {}", dir.display(), e))
        })?;

        let store = Self::with_dir(Some(dir.clone()));
        store.refresh()?;

        tracing::info!(
            path = %dir.display(),
            collections = store.inner.cache.len(),
            "Opened local store"
        );
        Ok(store)
    }

    /// Store with no backing directory (tests, ephemeral runs).
    pub fn new_in_memory() -> Self {
        Self::with_dir(None)
    }

    fn with_dir(dir: Option<PathBuf>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(StoreInner {
                dir,
                cache: DashMap::new(),
                write_lock: Mutex::new(()),
                events,
            }),
        }
    }

    // ─── Reads ───────────────────────────────────────────────────

    /// Read a collection. Absent or corrupt values read as empty.
    pub fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let Some(raw) = self.inner.cache.get(key).map(|v| v.value().clone()) else {
            return Vec::new();
        };

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(key, error = %e, "Stored collection is corrupt, reading as empty");
                Vec::new()
            }
        }
    }

    // ─── Writes ──────────────────────────────────────────────────

    /// Replace a collection.
    pub fn write_collection<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), AppError> {
        validate_key(key)?;
        let raw = encode(key, items)?;
        let _guard = self.lock();
        self.write_locked(key, raw)
    }

    /// Store raw text under a key without any decoding.
    #[cfg(test)]
    fn write_raw(&self, key: &str, raw: &str) -> Result<(), AppError> {
        validate_key(key)?;
        let _guard = self.lock();
        self.write_locked(key, raw.to_string())
    }

    /// Read-modify-write a collection under the write lock.
    ///
    /// The closure's return value is passed back to the caller.
    pub fn update_collection<T, R, F>(&self, key: &str, f: F) -> Result<R, AppError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut Vec<T>) -> R,
    {
        validate_key(key)?;
        let _guard = self.lock();

        let mut items: Vec<T> = self.read_collection(key);
        let result = f(&mut items);
        let raw = encode(key, &items)?;
        self.write_locked(key, raw)?;
        Ok(result)
    }

    /// Delete a key. Returns whether it existed.
    pub fn remove_collection(&self, key: &str) -> Result<bool, AppError> {
        validate_key(key)?;
        let _guard = self.lock();

        if let Some(path) = self.path_for(key) {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(AppError::Storage(format!(
                        "Failed to remove {}: {}",
                        path.display(),
                        e
                    )))
                }
            }
        }

        let existed = self.inner.cache.remove(key).is_some();
        if existed {
            self.notify(key, ChangeKind::Removed, ChangeOrigin::Local);
        }
        Ok(existed)
    }

    fn write_locked(&self, key: &str, raw: String) -> Result<(), AppError> {
        if let Some(path) = self.path_for(key) {
            persist(&path, &raw)?;
        }
        self.inner.cache.insert(key.to_string(), raw);
        self.notify(key, ChangeKind::Written, ChangeOrigin::Local);
        Ok(())
    }

    // ─── Change tracking ─────────────────────────────────────────

    /// Receive a `StoreEvent` for every change.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.inner.events.subscribe()
    }

    /// Re-read the data directory, adopting values changed by other processes.
    ///
    /// Returns the number of keys that changed. No-op for in-memory stores.
    pub fn refresh(&self) -> Result<usize, AppError> {
        let Some(dir) = self.inner.dir.as_ref() else {
            return Ok(0);
        };
        let _guard = self.lock();

        let entries = fs::read_dir(dir)
            .map_err(|e| AppError::Storage(format!("Failed to list {}: {}", dir.display(), e)))?;

        let mut on_disk: HashMap<String, String> = HashMap::new();
        for entry in entries {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable directory entry");
                    continue;
                }
            };
            if path.extension().and_then(|e| e.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if validate_key(key).is_err() {
                continue;
            }
            match fs::read_to_string(&path) {
                Ok(raw) => {
                    on_disk.insert(key.to_string(), raw);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to read collection file");
                }
            }
        }

        let mut changes = 0;
        for (key, raw) in on_disk.iter() {
            let changed = self
                .inner
                .cache
                .get(key)
                .map(|current| current.value() != raw)
                .unwrap_or(true);
            if changed {
                self.inner.cache.insert(key.clone(), raw.clone());
                self.notify(key, ChangeKind::Written, ChangeOrigin::External);
                changes += 1;
            }
        }

        let vanished: Vec<String> = self
            .inner
            .cache
            .iter()
            .map(|e| e.key().clone())
            .filter(|key| !on_disk.contains_key(key))
            .collect();
        for key in vanished {
            self.inner.cache.remove(&key);
            self.notify(&key, ChangeKind::Removed, ChangeOrigin::External);
            changes += 1;
        }

        if changes > 0 {
            tracing::debug!(changes, "Picked up external store changes");
        }
        Ok(changes)
    }

    /// [`refresh`](Self::refresh) on the blocking pool.
    pub async fn refresh_async(&self) -> Result<usize, AppError> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.refresh())
            .await
            .context("Store refresh task failed")?
    }

    /// Poll the data directory every `every` until the task is aborted.
    pub fn spawn_refresh_task(&self, every: Duration) -> tokio::task::JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if let Err(e) = store.refresh_async().await {
                    tracing::warn!(error = %e, "Store refresh failed");
                }
            }
        })
    }

    fn notify(&self, key: &str, kind: ChangeKind, origin: ChangeOrigin) {
        // No receivers is fine.
        let _ = self.inner.events.send(StoreEvent {
            key: key.to_string(),
            kind,
            origin,
        });
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.inner
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn path_for(&self, key: &str) -> Option<PathBuf> {
        self.inner
            .dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.{}", key, FILE_EXTENSION)))
    }
}

/// Keys become file names, so only `[A-Za-z0-9_]` is allowed.
pub fn validate_key(key: &str) -> Result<(), AppError> {
    if key.is_empty() || key.len() > MAX_KEY_LEN {
        return Err(AppError::BadRequest(format!(
            "Storage key must be 1-{} characters",
            MAX_KEY_LEN
        )));
    }
    if !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(AppError::BadRequest(format!(
            "Invalid storage key: {:?}",
            key
        )));
    }
    Ok(())
}

fn encode<T: Serialize>(key: &str, items: &[T]) -> Result<String, AppError> {
    serde_json::to_string(items)
        .map_err(|e| AppError::Storage(format!("Failed to encode {}: {}", key, e)))
}

/// Write via a temp file and rename so readers never see a partial file.
fn persist(path: &Path, raw: &str) -> Result<(), AppError> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, raw)
        .map_err(|e| AppError::Storage(format!("Failed to write {}: {}", tmp.display(), e)))?;
    fs::rename(&tmp, path)
        .map_err(|e| AppError::Storage(format!("Failed to replace {}: {}", path.display(), e)))
}
