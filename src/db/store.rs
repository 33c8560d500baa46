//! Typed key-value store over the `kv_store` table.
//!
//! Values are JSON documents. Reads never fail: a missing key, a corrupt
//! document or a database error all yield the caller's default.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;

/// Well-known store keys.
pub mod keys {
    pub const THEME: &str = "codexmind-theme";
    pub const BOOKMARKS: &str = "codexmind-bookmarks";
}

/// Process-wide durable key-value store.
#[derive(Clone)]
pub struct LocalStore {
    pool: SqlitePool,
}

impl LocalStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Read the raw JSON stored under `key`.
    pub async fn get_raw(&self, key: &str) -> Result<Option<String>, AppError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| row.get("value")))
    }

    /// Read and decode `key`, falling back to `default`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.get_raw(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(e) => {
                tracing::warn!("Failed to read store key {:?}: {}", key, e);
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Discarding corrupt value under store key {:?}: {}", key, e);
                default
            }
        }
    }

    /// Encode `value` and write it under `key`, replacing any previous value.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), AppError> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json).await
    }

    /// Write an already-encoded document. Used by tests to plant bad data.
    pub async fn set_raw(&self, key: &str, json: &str) -> Result<(), AppError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(json)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        tracing::debug!("Persisted store key {:?}", key);
        Ok(())
    }

    /// Delete `key`. Deleting a missing key is not an error.
    pub async fn remove(&self, key: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Delete every key.
    pub async fn clear(&self) -> Result<(), AppError> {
        sqlx::query("DELETE FROM kv_store").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        compact: bool,
        font: String,
    }

    async fn store() -> (LocalStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_database(&temp_dir.path().join("store.sqlite"))
            .await
            .unwrap();
        (LocalStore::new(pool), temp_dir)
    }

    #[tokio::test]
    async fn test_missing_key_returns_default() {
        let (store, _dir) = store().await;
        let value: Vec<String> = store.get("never-written", vec!["x".to_string()]).await;
        assert_eq!(value, vec!["x".to_string()]);
    }

    #[tokio::test]
    async fn test_corrupt_value_returns_default() {
        let (store, _dir) = store().await;
        store.set_raw("prefs", "{not json").await.unwrap();

        let value = store
            .get(
                "prefs",
                Prefs {
                    compact: false,
                    font: "mono".to_string(),
                },
            )
            .await;
        assert_eq!(value.font, "mono");
    }

    #[tokio::test]
    async fn test_wrong_shape_returns_default() {
        let (store, _dir) = store().await;
        store.set_raw("count", "\"seven\"").await.unwrap();
        assert_eq!(store.get("count", 7u32).await, 7);
    }

    #[tokio::test]
    async fn test_set_then_get_round_trips() {
        let (store, _dir) = store().await;
        let prefs = Prefs {
            compact: true,
            font: "serif".to_string(),
        };
        store.set("prefs", &prefs).await.unwrap();
        store
            .set(
                "prefs",
                &Prefs {
                    compact: true,
                    font: "sans".to_string(),
                },
            )
            .await
            .unwrap();

        let loaded: Prefs = store
            .get(
                "prefs",
                Prefs {
                    compact: false,
                    font: String::new(),
                },
            )
            .await;
        assert_eq!(loaded.font, "sans");
        assert!(loaded.compact);
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let (store, _dir) = store().await;
        store.set("a", &1u8).await.unwrap();
        store.set("b", &2u8).await.unwrap();

        store.remove("a").await.unwrap();
        store.remove("a").await.unwrap();
        assert_eq!(store.get_raw("a").await.unwrap(), None);
        assert_eq!(store.get_raw("b").await.unwrap().as_deref(), Some("2"));

        store.clear().await.unwrap();
        assert_eq!(store.get_raw("b").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("durable.sqlite");

        {
            let store = LocalStore::new(init_database(&path).await.unwrap());
            store.set("k", &"kept").await.unwrap();
        }

        let store = LocalStore::new(init_database(&path).await.unwrap());
        assert_eq!(store.get("k", String::new()).await, "kept");
    }
}
