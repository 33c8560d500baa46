//! Bookmark collection service.

use chrono::Utc;
use tokio::sync::watch;

use super::PersistentState;
use crate::db::{keys, LocalStore};
use crate::errors::AppError;
use crate::models::{Bookmark, NewBookmark};

/// Downloadable snapshot of the bookmark collection.
#[derive(Debug, Clone)]
pub struct BookmarkExport {
    pub filename: String,
    /// Pretty-printed JSON array of bookmarks.
    pub bytes: Vec<u8>,
}

/// Saved bookmarks, persisted under [`keys::BOOKMARKS`].
pub struct BookmarkService {
    state: PersistentState<Vec<Bookmark>>,
}

impl BookmarkService {
    pub async fn load(store: LocalStore) -> Self {
        Self {
            state: PersistentState::load(store, keys::BOOKMARKS, Vec::new()).await,
        }
    }

    pub async fn list(&self) -> Vec<Bookmark> {
        self.state.get().await
    }

    /// Add a bookmark. Re-adding the same `type:url` returns the existing entry.
    pub async fn add(&self, item: NewBookmark) -> Result<Bookmark, AppError> {
        let id = Bookmark::identity(item.kind, &item.url);
        let mut added = None;

        let bookmarks = self
            .state
            .update(|current| {
                if current.iter().any(|b| b.id == id) {
                    return current.clone();
                }
                let bookmark = Bookmark {
                    id: id.clone(),
                    kind: item.kind,
                    title: item.title,
                    url: item.url,
                    added_at: Utc::now(),
                };
                added = Some(bookmark.clone());
                let mut next = current.clone();
                next.push(bookmark);
                next
            })
            .await?;

        if added.is_some() {
            tracing::info!("Bookmarked {}", id);
        }

        bookmarks
            .into_iter()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::Internal(format!("Bookmark {} vanished after insert", id)))
    }

    /// Remove by id. Returns whether anything was removed.
    pub async fn remove(&self, id: &str) -> Result<bool, AppError> {
        let mut removed = false;
        self.state
            .update(|current| {
                let next: Vec<Bookmark> = current.iter().filter(|b| b.id != id).cloned().collect();
                removed = next.len() != current.len();
                next
            })
            .await?;
        Ok(removed)
    }

    pub async fn is_bookmarked(&self, id: &str) -> bool {
        self.state.get().await.iter().any(|b| b.id == id)
    }

    /// Serialize the collection as a dated JSON file.
    pub async fn export(&self) -> Result<BookmarkExport, AppError> {
        let bookmarks = self.state.get().await;
        let bytes = serde_json::to_vec_pretty(&bookmarks)?;

        Ok(BookmarkExport {
            filename: format!("codexmind-bookmarks-{}.json", Utc::now().format("%Y-%m-%d")),
            bytes,
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Bookmark>> {
        self.state.subscribe()
    }
}
