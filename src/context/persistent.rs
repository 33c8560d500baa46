//! Reactive state mirrored into the local store.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{watch, Mutex};

use crate::db::LocalStore;
use crate::errors::AppError;

/// A value kept both in memory and under a fixed store key.
///
/// Seeded from the store on load (default when missing or corrupt). Every
/// change is written to the store before the in-memory value changes, so a
/// failed write leaves both sides untouched. Updates that produce an equal
/// value touch neither side.
pub struct PersistentState<T> {
    key: String,
    store: LocalStore,
    value: Arc<Mutex<T>>,
    updates: Arc<watch::Sender<T>>,
}

impl<T> PersistentState<T>
where
    T: Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    pub async fn load(store: LocalStore, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let value = store.get(&key, default).await;
        let (updates, _) = watch::channel(value.clone());

        Self {
            key,
            store,
            value: Arc::new(Mutex::new(value)),
            updates: Arc::new(updates),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current value.
    pub async fn get(&self) -> T {
        self.value.lock().await.clone()
    }

    /// Replace the value.
    pub async fn set(&self, next: T) -> Result<(), AppError> {
        self.update(|_| next).await.map(|_| ())
    }

    /// Derive the next value from the latest one and persist it.
    ///
    /// Concurrent callers are serialized, so each sees the value written by
    /// the previous one. Once the write has started it runs to completion
    /// even if the caller is dropped, and memory is updated with it.
    pub async fn update<F>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&T) -> T,
    {
        let mut current = Arc::clone(&self.value).lock_owned().await;
        let next = f(&current);
        if next == *current {
            return Ok(next);
        }

        let store = self.store.clone();
        let key = self.key.clone();
        let updates = Arc::clone(&self.updates);

        // The guard moves into the task and is released only after memory
        // matches the store.
        let commit = tokio::spawn(async move {
            store.set(&key, &next).await?;
            *current = next.clone();
            updates.send_replace(next.clone());
            Ok::<T, AppError>(next)
        });

        commit
            .await
            .map_err(|e| AppError::Internal(format!("Persisting {:?} failed: {}", self.key, e)))?
    }

    /// Observe every committed value.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.updates.subscribe()
    }
}
