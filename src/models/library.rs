//! Library resource model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Difficulty level of a resource.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }
}

/// Kind of downloadable resource.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Ebook,
    Cheatsheet,
    Snippet,
    Tutorial,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Ebook => "ebook",
            ResourceType::Cheatsheet => "cheatsheet",
            ResourceType::Snippet => "snippet",
            ResourceType::Tutorial => "tutorial",
        }
    }
}

/// A downloadable item in the resource library.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LibraryItem {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub language: String,
    pub level: Level,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    /// Size of the downloadable file in bytes
    pub file_size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    pub format: String,
    pub created_at: DateTime<Utc>,
    pub featured: bool,
}
