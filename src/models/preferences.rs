//! Persisted user preferences: theme and bookmarks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Light or dark color scheme.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn flipped(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

/// Site theme preference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Theme {
    pub mode: ThemeMode,
    pub primary: String,
    pub accent: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            mode: ThemeMode::Dark,
            primary: "navy".to_string(),
            accent: "cyan".to_string(),
        }
    }
}

/// What a bookmark points at.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookmarkKind {
    Article,
    Library,
}

impl BookmarkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookmarkKind::Article => "article",
            BookmarkKind::Library => "library",
        }
    }
}

/// A saved bookmark.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    /// `type:url`, stable for the same resource
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BookmarkKind,
    pub title: String,
    pub url: String,
    pub added_at: DateTime<Utc>,
}

impl Bookmark {
    /// Deterministic identity of a bookmarked resource.
    pub fn identity(kind: BookmarkKind, url: &str) -> String {
        format!("{}:{}", kind.as_str(), url)
    }
}

/// Request body for adding a bookmark.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBookmark {
    #[serde(rename = "type")]
    pub kind: BookmarkKind,
    pub title: String,
    pub url: String,
}
