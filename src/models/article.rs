//! Article model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Social profile links of an author.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AuthorSocial {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

/// The person credited for an article.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social: Option<AuthorSocial>,
}

/// A published article.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    /// Markdown body
    pub content: String,
    pub author: Author,
    pub tags: Vec<String>,
    /// Slug of the category the article is filed under
    pub category: String,
    pub language: String,
    /// Estimated reading time in minutes
    pub reading_time: u32,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub featured: bool,
}
