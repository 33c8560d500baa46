//! Category listing.

use std::time::Duration;

use super::fixtures;
use crate::models::{Article, Category};

/// Article categories with counts derived from the article collection.
pub struct CategoriesRepository {
    articles: &'static [Article],
    latency: Duration,
}

impl CategoriesRepository {
    pub fn new(latency: Duration) -> Self {
        Self {
            articles: fixtures::articles(),
            latency,
        }
    }

    pub async fn list(&self) -> Vec<Category> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        fixtures::category_seeds()
            .iter()
            .map(|seed| {
                let count = self
                    .articles
                    .iter()
                    .filter(|article| article.category == seed.slug)
                    .count();
                seed.to_category(count)
            })
            .collect()
    }

    pub async fn get_by_slug(&self, slug: &str) -> Option<Category> {
        self.list()
            .await
            .into_iter()
            .find(|category| category.slug == slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_counts_follow_articles() {
        let repo = CategoriesRepository::new(Duration::ZERO);
        let categories = repo.list().await;

        let javascript = categories.iter().find(|c| c.slug == "javascript").unwrap();
        assert_eq!(javascript.article_count, 2);

        let total: usize = categories.iter().map(|c| c.article_count).sum();
        assert_eq!(total, fixtures::articles().len());
    }

    #[tokio::test]
    async fn test_unknown_category_is_none() {
        let repo = CategoriesRepository::new(Duration::ZERO);
        assert!(repo.get_by_slug("cobol").await.is_none());
        assert_eq!(repo.get_by_slug("css").await.unwrap().name, "CSS");
    }
}
