//! CodexMind content backend
//!
//! Search, filtering, sorting and pagination over the site's articles and
//! library resources, persisted user preferences (theme, bookmarks) and the
//! contact inbox, served over a JSON REST API with SQLite persistence.

pub mod api;
pub mod config;
pub mod context;
pub mod db;
pub mod debounce;
pub mod errors;
pub mod models;
pub mod pipeline;
pub mod repository;
pub mod session;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use context::{AppContext, BookmarkService, ThemeService};
use db::{ContactRepository, LocalStore};
use errors::AppError;
use repository::{ArticleRepository, CategoriesRepository, LibraryRepository, SearchRepository};
use session::SearchSession;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub articles: Arc<ArticleRepository>,
    pub library: Arc<LibraryRepository>,
    pub categories: Arc<CategoriesRepository>,
    pub search: Arc<SearchRepository>,
    pub contact: Arc<ContactRepository>,
    pub theme: Arc<ThemeService>,
    pub bookmarks: Arc<BookmarkService>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Pull every service out of `context`, failing on the first one missing.
    pub fn from_context(context: &AppContext) -> Result<Self, AppError> {
        Ok(Self {
            articles: context.require()?,
            library: context.require()?,
            categories: context.require()?,
            search: context.require()?,
            contact: context.require()?,
            theme: context.require()?,
            bookmarks: context.require()?,
            config: context.require()?,
        })
    }

    /// A search-as-you-type session over the shared search repository,
    /// debounced by the configured quiet period.
    pub fn search_session(&self, limit: usize) -> SearchSession {
        SearchSession::new(Arc::clone(&self.search), self.config.search_debounce, limit)
    }
}

/// Construct every service and register it in a fresh context.
///
/// Theme and bookmarks are hydrated from the local store here.
pub async fn build_context(pool: SqlitePool, config: &Config) -> AppContext {
    let store = LocalStore::new(pool.clone());
    let latency = config.simulated_latency;

    let theme = ThemeService::load(store.clone()).await;
    let bookmarks = BookmarkService::load(store).await;

    AppContext::new()
        .provide(Arc::new(ArticleRepository::articles(latency)))
        .provide(Arc::new(LibraryRepository::library(latency)))
        .provide(Arc::new(CategoriesRepository::new(latency)))
        .provide(Arc::new(SearchRepository::new(latency)))
        .provide(Arc::new(ContactRepository::new(pool)))
        .provide(Arc::new(theme))
        .provide(Arc::new(bookmarks))
        .provide(Arc::new(config.clone()))
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Articles
        .route("/articles", get(api::list_articles))
        .route("/articles/featured", get(api::featured_articles))
        .route("/articles/facets", get(api::article_facets))
        .route("/articles/{slug}", get(api::get_article))
        // Library
        .route("/library", get(api::list_library))
        .route("/library/featured", get(api::featured_library))
        .route("/library/facets", get(api::library_facets))
        .route("/library/{slug}", get(api::get_library_item))
        // Categories
        .route("/categories", get(api::list_categories))
        .route("/categories/{slug}", get(api::get_category))
        // Search
        .route("/search", get(api::global_search))
        .route("/search/suggestions", get(api::search_suggestions))
        .route("/search/trending", get(api::trending_searches))
        .route("/search/tags", get(api::popular_tags))
        .route("/search/related", get(api::related_searches))
        // Contact
        .route("/contact", post(api::submit_contact))
        // Preferences
        .route(
            "/preferences/theme",
            get(api::get_theme).put(api::put_theme),
        )
        .route("/preferences/theme/toggle", post(api::toggle_theme))
        // Bookmarks
        .route(
            "/bookmarks",
            get(api::list_bookmarks)
                .post(api::add_bookmark)
                .delete(api::delete_bookmark),
        )
        .route("/bookmarks/export", get(api::export_bookmarks));

    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
