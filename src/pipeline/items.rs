//! [`ContentItem`] views over the concrete content models.

use chrono::{DateTime, Utc};

use super::ContentItem;
use crate::models::{Article, LibraryItem, Level, ResourceType};

impl ContentItem for Article {
    fn id(&self) -> &str {
        &self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn excerpt(&self) -> &str {
        &self.excerpt
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }

    fn language(&self) -> &str {
        &self.language
    }

    fn featured(&self) -> bool {
        self.featured
    }

    fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }

    fn metric(&self) -> u64 {
        u64::from(self.reading_time)
    }
}

impl ContentItem for LibraryItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn excerpt(&self) -> &str {
        &self.description
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn language(&self) -> &str {
        &self.language
    }

    fn level(&self) -> Option<Level> {
        Some(self.level)
    }

    fn resource_type(&self) -> Option<ResourceType> {
        Some(self.resource_type)
    }

    fn featured(&self) -> bool {
        self.featured
    }

    fn published_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn metric(&self) -> u64 {
        self.file_size
    }
}
