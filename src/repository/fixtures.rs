//! Built-in content catalog.
//!
//! Built once per process and shared by every repository instance.

use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;

use crate::models::{Article, Author, AuthorSocial, Category, LibraryItem, Level, ResourceType};
use crate::pipeline::slugify;

static ARTICLES: Lazy<Vec<Article>> = Lazy::new(build_articles);
static LIBRARY: Lazy<Vec<LibraryItem>> = Lazy::new(build_library);
static CATEGORIES: Lazy<Vec<CategorySeed>> = Lazy::new(build_categories);

/// All articles, newest first.
pub fn articles() -> &'static [Article] {
    &ARTICLES
}

/// All library resources.
pub fn library() -> &'static [LibraryItem] {
    &LIBRARY
}

/// Categories without counts; counts are derived from the articles.
pub(crate) fn category_seeds() -> &'static [CategorySeed] {
    &CATEGORIES
}

pub(crate) struct CategorySeed {
    pub id: &'static str,
    pub name: &'static str,
    pub slug: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

impl CategorySeed {
    pub fn to_category(&self, article_count: usize) -> Category {
        Category {
            id: self.id.to_string(),
            name: self.name.to_string(),
            slug: self.slug.to_string(),
            description: self.description.to_string(),
            icon: self.icon.to_string(),
            color: self.color.to_string(),
            article_count,
        }
    }
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

fn house_author() -> Author {
    Author {
        id: "1".to_string(),
        name: "P. Sonats".to_string(),
        avatar: Some("/avatars/psonats.jpg".to_string()),
        bio: Some("Full-stack developer and technical writer".to_string()),
        social: Some(AuthorSocial {
            twitter: Some("https://twitter.com/psonats".to_string()),
            github: Some("https://github.com/psonats".to_string()),
            linkedin: Some("https://linkedin.com/in/psonats".to_string()),
        }),
    }
}

struct ArticleSeed {
    title: &'static str,
    excerpt: &'static str,
    sections: &'static [&'static str],
    tags: &'static [&'static str],
    category: &'static str,
    reading_time: u32,
    published_at: DateTime<Utc>,
    featured: bool,
}

fn build_articles() -> Vec<Article> {
    let seeds = [
        ArticleSeed {
            title: "React Hooks: A Complete Guide",
            excerpt: "Everything about React Hooks, from useState to advanced custom hooks.",
            sections: &["useState", "useEffect", "Custom Hooks"],
            tags: &["React", "JavaScript", "Hooks"],
            category: "react",
            reading_time: 8,
            published_at: at(2024, 1, 15, 10, 0),
            featured: true,
        },
        ArticleSeed {
            title: "TypeScript for Beginners",
            excerpt: "A complete introduction to TypeScript for JavaScript developers.",
            sections: &["Setup", "Basic Types", "Interfaces"],
            tags: &["TypeScript", "JavaScript", "Tutorial"],
            category: "typescript",
            reading_time: 12,
            published_at: at(2024, 1, 10, 14, 30),
            featured: false,
        },
        ArticleSeed {
            title: "Node.js Best Practices",
            excerpt: "Practices for running Node.js services in production.",
            sections: &["Project Layout", "Error Handling", "Performance"],
            tags: &["Node.js", "Backend", "JavaScript"],
            category: "javascript",
            reading_time: 15,
            published_at: at(2024, 1, 5, 9, 15),
            featured: true,
        },
        ArticleSeed {
            title: "CSS Grid Layout Mastery",
            excerpt: "Build modern responsive layouts with CSS Grid.",
            sections: &["Grid Container", "Grid Items", "Responsive Grids"],
            tags: &["CSS", "Layout", "Grid"],
            category: "css",
            reading_time: 10,
            published_at: at(2024, 1, 1, 16, 45),
            featured: false,
        },
        ArticleSeed {
            title: "Python for Data Science",
            excerpt: "Getting started with Python for data analysis.",
            sections: &["NumPy", "Pandas", "Matplotlib"],
            tags: &["Python", "Data Science", "Analytics"],
            category: "python",
            reading_time: 18,
            published_at: at(2023, 12, 28, 11, 20),
            featured: true,
        },
        ArticleSeed {
            title: "Async JavaScript Without Tears",
            excerpt: "Promises, async/await and the event loop explained with examples.",
            sections: &["The Event Loop", "Promises", "async/await"],
            tags: &["JavaScript", "Async"],
            category: "javascript",
            reading_time: 9,
            published_at: at(2023, 12, 20, 8, 0),
            featured: false,
        },
    ];

    seeds
        .iter()
        .enumerate()
        .map(|(index, seed)| {
            let mut content = format!("# {}\n\n{}\n", seed.title, seed.excerpt);
            for section in seed.sections {
                content.push_str(&format!("\n## {}\n\n...\n", section));
            }

            Article {
                id: (index + 1).to_string(),
                title: seed.title.to_string(),
                slug: slugify(seed.title),
                excerpt: seed.excerpt.to_string(),
                content,
                author: house_author(),
                tags: tags(seed.tags),
                category: seed.category.to_string(),
                language: "en".to_string(),
                reading_time: seed.reading_time,
                published_at: seed.published_at,
                updated_at: seed.published_at,
                featured: seed.featured,
            }
        })
        .collect()
}

const MB: u64 = 1024 * 1024;

fn build_library() -> Vec<LibraryItem> {
    let seeds: [(&str, &str, ResourceType, Level, &[&str], u64, Option<u32>, DateTime<Utc>, bool); 6] = [
        (
            "React Cheat Sheet",
            "Quick reference for everyday React",
            ResourceType::Cheatsheet,
            Level::Intermediate,
            &["React", "JavaScript", "Reference"],
            5 * MB / 2,
            Some(4),
            at(2024, 1, 15, 10, 0),
            true,
        ),
        (
            "TypeScript Handbook",
            "The complete TypeScript manual",
            ResourceType::Ebook,
            Level::Beginner,
            &["TypeScript", "JavaScript", "Handbook"],
            52 * MB / 10,
            Some(180),
            at(2024, 1, 10, 14, 30),
            false,
        ),
        (
            "Node.js Snippets",
            "Copy-paste snippets for common Node.js tasks",
            ResourceType::Snippet,
            Level::Advanced,
            &["Node.js", "JavaScript", "Backend"],
            18 * MB / 10,
            None,
            at(2024, 1, 5, 9, 15),
            false,
        ),
        (
            "CSS Grid Guide",
            "Illustrated guide to CSS Grid",
            ResourceType::Ebook,
            Level::Intermediate,
            &["CSS", "Grid", "Layout"],
            31 * MB / 10,
            Some(64),
            at(2024, 1, 1, 16, 45),
            false,
        ),
        (
            "Python Data Science Toolkit",
            "Cheat sheets for NumPy, Pandas and Matplotlib",
            ResourceType::Cheatsheet,
            Level::Advanced,
            &["Python", "Data Science"],
            47 * MB / 10,
            Some(12),
            at(2023, 12, 28, 11, 20),
            true,
        ),
        (
            "Git From Zero",
            "Step-by-step tutorial on everyday Git",
            ResourceType::Tutorial,
            Level::Beginner,
            &["Git", "Tooling"],
            9 * MB / 10,
            Some(30),
            at(2023, 12, 15, 9, 0),
            false,
        ),
    ];

    seeds
        .into_iter()
        .enumerate()
        .map(
            |(index, (title, description, resource_type, level, item_tags, file_size, pages, created_at, featured))| {
                let slug = slugify(title);
                LibraryItem {
                    id: (index + 1).to_string(),
                    title: title.to_string(),
                    download_url: Some(format!("/downloads/{}.pdf", slug)),
                    preview_url: Some(format!("/preview/{}", slug)),
                    slug,
                    description: description.to_string(),
                    resource_type,
                    language: "en".to_string(),
                    level,
                    tags: tags(item_tags),
                    file_size,
                    pages,
                    format: "PDF".to_string(),
                    created_at,
                    featured,
                }
            },
        )
        .collect()
}

fn build_categories() -> Vec<CategorySeed> {
    vec![
        CategorySeed {
            id: "1",
            name: "JavaScript",
            slug: "javascript",
            description: "JavaScript, ES6+, Node.js and frameworks",
            icon: "🟨",
            color: "#f7df1e",
        },
        CategorySeed {
            id: "2",
            name: "CSS",
            slug: "css",
            description: "Modern CSS, Grid, Flexbox and advanced techniques",
            icon: "🎨",
            color: "#1572b6",
        },
        CategorySeed {
            id: "3",
            name: "Python",
            slug: "python",
            description: "Python for development and data science",
            icon: "🐍",
            color: "#3776ab",
        },
        CategorySeed {
            id: "4",
            name: "React",
            slug: "react",
            description: "React, Hooks, Context and the ecosystem",
            icon: "⚛️",
            color: "#61dafb",
        },
        CategorySeed {
            id: "5",
            name: "TypeScript",
            slug: "typescript",
            description: "Typed development with TypeScript",
            icon: "🔷",
            color: "#3178c6",
        },
    ]
}
