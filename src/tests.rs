//! Integration tests for the CodexMind backend.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::config::Config;
use crate::context::AppContext;
use crate::db::init_database;
use crate::errors::AppError;
use crate::repository::ArticleRepository;
use crate::{build_context, create_router, AppState};

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    db_path: PathBuf,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.sqlite");
        let base_url = serve(&db_path).await;

        TestFixture {
            client: Client::new(),
            base_url,
            db_path,
            _temp_dir: temp_dir,
        }
    }

    /// Start a second server over the same database, as after a reload.
    async fn restart(&self) -> String {
        serve(&self.db_path).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json(&self, path: &str) -> (u16, Value) {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }
}

fn test_config(db_path: &Path) -> Config {
    Config {
        db_path: db_path.to_path_buf(),
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        log_level: "warn".to_string(),
        simulated_latency: Duration::ZERO,
        search_debounce: Duration::from_millis(300),
    }
}

/// Bind the full router to a random port and return its base URL.
async fn serve(db_path: &Path) -> String {
    let config = test_config(db_path);
    let pool = init_database(db_path).await.expect("Failed to init DB");
    let context = build_context(pool, &config).await;
    let state = AppState::from_context(&context).expect("Failed to build state");

    let app = create_router(state);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get addr");

    // Spawn server
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    format!("http://{}", addr)
}

fn slugs(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["slug"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_state_requires_every_provider() {
    let temp_dir = TempDir::new().unwrap();
    let pool = init_database(&temp_dir.path().join("test.sqlite"))
        .await
        .unwrap();

    let full = build_context(pool, &test_config(temp_dir.path())).await;
    assert!(AppState::from_context(&full).is_ok());

    match AppState::from_context(&AppContext::new()) {
        Err(AppError::MissingProvider(name)) => assert_eq!(name, "MockRepository<Article>"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("empty context must not build a state"),
    }

    let articles_only =
        AppContext::new().provide(Arc::new(ArticleRepository::articles(Duration::ZERO)));
    match AppState::from_context(&articles_only) {
        Err(AppError::MissingProvider(name)) => assert_eq!(name, "MockRepository<LibraryItem>"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("partial context must not build a state"),
    }
}

#[tokio::test]
async fn test_list_articles_defaults() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get_json("/api/articles").await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);

    // Newest first
    assert_eq!(
        slugs(&body),
        vec![
            "react-hooks-a-complete-guide",
            "typescript-for-beginners",
            "nodejs-best-practices",
            "css-grid-layout-mastery",
            "python-for-data-science",
            "async-javascript-without-tears",
        ]
    );

    let pagination = &body["pagination"];
    assert_eq!(pagination["page"], 1);
    assert_eq!(pagination["limit"], 10);
    assert_eq!(pagination["total"], 6);
    assert_eq!(pagination["totalPages"], 1);
    assert_eq!(pagination["hasNext"], false);
    assert_eq!(pagination["hasPrev"], false);
}

#[tokio::test]
async fn test_list_articles_filter_and_sort() {
    let fixture = TestFixture::new().await;

    let (_, body) = fixture
        .get_json("/api/articles?tags=JavaScript&sort=readingTime")
        .await;
    assert_eq!(body["pagination"]["total"], 4);
    let times: Vec<u64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["readingTime"].as_u64().unwrap())
        .collect();
    assert_eq!(times, vec![8, 9, 12, 15]);

    let (_, body) = fixture.get_json("/api/articles?q=%20PYTHON%20").await;
    assert_eq!(slugs(&body), vec!["python-for-data-science"]);

    let (_, body) = fixture
        .get_json("/api/articles?category=javascript&featured=true")
        .await;
    assert_eq!(slugs(&body), vec!["nodejs-best-practices"]);

    let (_, body) = fixture.get_json("/api/articles?sort=popular").await;
    assert_eq!(
        slugs(&body)[..3],
        [
            "react-hooks-a-complete-guide",
            "nodejs-best-practices",
            "python-for-data-science"
        ]
    );
}

#[tokio::test]
async fn test_list_articles_pagination_and_clamping() {
    let fixture = TestFixture::new().await;

    let (_, body) = fixture.get_json("/api/articles?limit=4&page=2").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["pagination"]["totalPages"], 2);
    assert_eq!(body["pagination"]["hasNext"], false);
    assert_eq!(body["pagination"]["hasPrev"], true);

    let (_, body) = fixture.get_json("/api/articles?limit=0&page=0").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["limit"], 1);
    assert_eq!(body["pagination"]["totalPages"], 6);

    let (_, body) = fixture.get_json("/api/articles?limit=500").await;
    assert_eq!(body["pagination"]["limit"], 100);

    // Past the end: empty page, real total
    let (status, body) = fixture.get_json("/api/articles?page=99").await;
    assert_eq!(status, 200);
    assert!(body["data"].as_array().unwrap().is_empty());
    assert_eq!(body["pagination"]["total"], 6);
    assert_eq!(body["pagination"]["hasPrev"], true);

    // No matches: one empty page
    let (_, body) = fixture.get_json("/api/articles?q=cobol").await;
    assert_eq!(body["pagination"]["total"], 0);
    assert_eq!(body["pagination"]["totalPages"], 1);
}

#[tokio::test]
async fn test_get_article_by_slug() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .get_json("/api/articles/css-grid-layout-mastery")
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["title"], "CSS Grid Layout Mastery");
    assert_eq!(body["data"]["category"], "css");

    let (status, body) = fixture.get_json("/api/articles/does-not-exist").await;
    assert_eq!(status, 404);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_featured_and_facets() {
    let fixture = TestFixture::new().await;

    let (_, body) = fixture.get_json("/api/articles/featured?limit=2").await;
    assert_eq!(
        slugs(&body),
        vec!["react-hooks-a-complete-guide", "nodejs-best-practices"]
    );

    let (_, body) = fixture.get_json("/api/articles/facets").await;
    assert_eq!(body["data"]["languages"], json!(["en"]));
    assert_eq!(
        body["data"]["categories"],
        json!(["css", "javascript", "python", "react", "typescript"])
    );
    assert!(body["data"].get("levels").is_none());
}

#[tokio::test]
async fn test_library_endpoints() {
    let fixture = TestFixture::new().await;

    let (_, body) = fixture.get_json("/api/library?level=advanced").await;
    assert_eq!(body["pagination"]["total"], 2);
    assert!(body["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|item| item["level"] == "advanced"));

    let (_, body) = fixture.get_json("/api/library?type=ebook").await;
    assert_eq!(
        slugs(&body),
        vec!["typescript-handbook", "css-grid-guide"]
    );

    let (status, body) = fixture.get_json("/api/library/git-from-zero").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["type"], "tutorial");

    let (status, _) = fixture.get_json("/api/library/nope").await;
    assert_eq!(status, 404);

    let (_, body) = fixture.get_json("/api/library/facets").await;
    assert_eq!(
        body["data"]["levels"],
        json!(["beginner", "intermediate", "advanced"])
    );
}

#[tokio::test]
async fn test_categories() {
    let fixture = TestFixture::new().await;

    let (_, body) = fixture.get_json("/api/categories").await;
    let categories = body["data"].as_array().unwrap();
    assert_eq!(categories.len(), 5);

    let (status, body) = fixture.get_json("/api/categories/javascript").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["articleCount"], 2);

    let (status, body) = fixture.get_json("/api/categories/rust").await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_search_endpoints() {
    let fixture = TestFixture::new().await;

    let (_, body) = fixture.get_json("/api/search?q=python").await;
    let results = body["data"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["type"], "article");
    assert_eq!(results[1]["type"], "library");

    let (_, body) = fixture.get_json("/api/search?q=&limit=3").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    let (_, body) = fixture.get_json("/api/search/suggestions?q=p").await;
    assert_eq!(body["data"], json!([]));

    let (_, body) = fixture.get_json("/api/search/suggestions?q=grid").await;
    let suggestions = body["data"].as_array().unwrap();
    assert!(suggestions.contains(&json!("CSS Grid Layout Mastery")));
    assert!(suggestions.contains(&json!("Grid")));

    let (_, body) = fixture.get_json("/api/search/trending?limit=2").await;
    assert_eq!(body["data"], json!(["React Hooks", "TypeScript"]));

    let (_, body) = fixture.get_json("/api/search/tags?limit=1").await;
    assert_eq!(body["data"], json!(["JavaScript"]));

    let (_, body) = fixture.get_json("/api/search/related?q=zzzz").await;
    assert_eq!(
        body["data"],
        json!(["JavaScript", "Web Development", "Programming", "Tutorial", "Guide"])
    );
}

#[tokio::test]
async fn test_contact_form() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/contact"))
        .json(&json!({
            "name": "Ada",
            "email": "ada@example.com",
            "message": "I would like to contribute an article."
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert!(body["data"]["id"].as_str().is_some());

    let resp = fixture
        .client
        .post(fixture.url("/api/contact"))
        .json(&json!({
            "name": "A",
            "email": "not-an-email",
            "message": "short"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "INVALID_FORM");
    let fields = &body["error"]["details"]["fields"];
    assert!(fields["name"].is_string());
    assert!(fields["email"].is_string());
    assert!(fields["message"].is_string());
}

#[tokio::test]
async fn test_theme_toggle_persists() {
    let fixture = TestFixture::new().await;

    let (_, body) = fixture.get_json("/api/preferences/theme").await;
    assert_eq!(
        body["data"],
        json!({"mode": "dark", "primary": "navy", "accent": "cyan"})
    );

    let resp = fixture
        .client
        .post(fixture.url("/api/preferences/theme/toggle"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["mode"], "light");
    assert_eq!(body["data"]["primary"], "navy");

    // A fresh server over the same store sees the toggled theme
    let restarted = fixture.restart().await;
    let body: Value = fixture
        .client
        .get(format!("{}/api/preferences/theme", restarted))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["mode"], "light");
}

#[tokio::test]
async fn test_put_theme() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .put(fixture.url("/api/preferences/theme"))
        .json(&json!({"mode": "light", "primary": "teal", "accent": "amber"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let (_, body) = fixture.get_json("/api/preferences/theme").await;
    assert_eq!(body["data"]["primary"], "teal");
    assert_eq!(body["data"]["accent"], "amber");
}

#[tokio::test]
async fn test_bookmarks_lifecycle() {
    let fixture = TestFixture::new().await;
    let bookmark = json!({
        "type": "article",
        "title": "React Hooks: A Complete Guide",
        "url": "/articles/react-hooks-a-complete-guide"
    });

    // Adding twice keeps one entry
    for _ in 0..2 {
        let resp = fixture
            .client
            .post(fixture.url("/api/bookmarks"))
            .json(&bookmark)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(
            body["data"]["id"],
            "article:/articles/react-hooks-a-complete-guide"
        );
    }

    let (_, body) = fixture.get_json("/api/bookmarks").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // Export
    let resp = fixture
        .client
        .get(fixture.url("/api/bookmarks/export"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let disposition = resp
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"codexmind-bookmarks-"));
    assert!(disposition.ends_with(".json\""));
    let exported: Value = resp.json().await.unwrap();
    assert_eq!(exported.as_array().unwrap().len(), 1);

    // Survives a restart
    let restarted = fixture.restart().await;
    let body: Value = fixture
        .client
        .get(format!("{}/api/bookmarks", restarted))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // Delete, then delete again
    let id = "article:/articles/react-hooks-a-complete-guide";
    let resp = fixture
        .client
        .delete(fixture.url("/api/bookmarks"))
        .query(&[("id", id)])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .client
        .delete(fixture.url("/api/bookmarks"))
        .query(&[("id", id)])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let (_, body) = fixture.get_json("/api/bookmarks").await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_bookmark_validation() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/bookmarks"))
        .json(&json!({"type": "library", "title": "Empty", "url": "  "}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_search_session_uses_shared_repository() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.sqlite");
    let pool = init_database(&db_path).await.unwrap();
    let context = build_context(pool, &test_config(&db_path)).await;
    let state = AppState::from_context(&context).unwrap();

    let mut session = state.search_session(10);
    let mut rx = session.subscribe();
    session.set_query("handbook");

    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            rx.changed().await.unwrap();
            if !rx.borrow().results.is_empty() {
                break;
            }
        }
    })
    .await
    .expect("search session never settled");

    assert_eq!(session.state().results[0].slug, "typescript-handbook");
}
