//! Startup lifecycle tests: retrying initialization and degraded serving.

mod common;

use common::{quick_init, TestApp};
use items_service::testkit::MemoryStore;
use std::sync::Arc;

#[tokio::test]
async fn fresh_store_is_seeded_and_served() {
    let app = TestApp::spawn_with_store(Arc::new(MemoryStore::new()), quick_init(5)).await;
    assert!(app.init_ready);
    assert_eq!(app.init_attempts, 1);

    let (status, body) = app.get_json("/api/data").await;
    assert!(status.is_success());
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 3);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|item| item["name"].as_str())
        .collect();
    assert_eq!(names, ["Item 1", "Item 2", "Item 3"]);

    let (status, body) = app.get_json("/api/count").await;
    assert!(status.is_success());
    assert_eq!(body, serde_json::json!({ "success": true, "count": 3 }));
}

#[tokio::test]
async fn store_coming_up_late_is_picked_up_by_retries() {
    let store = Arc::new(MemoryStore::new().unavailable_for(3));
    let app = TestApp::spawn_with_store(store.clone(), quick_init(5)).await;

    assert!(app.init_ready);
    assert_eq!(app.init_attempts, 4);
    assert_eq!(store.initialize_calls(), 4);

    let (_, body) = app.get_json("/api/count").await;
    assert_eq!(body["count"], 3);
}

#[tokio::test]
async fn server_starts_even_when_store_never_comes_up() {
    let store = Arc::new(MemoryStore::unreachable());
    let app = TestApp::spawn_with_store(store.clone(), quick_init(5)).await;

    assert!(!app.init_ready);
    assert_eq!(app.init_attempts, 5);
    assert_eq!(store.initialize_calls(), 5);

    // Static route still works
    let (status, _) = app.get_json("/").await;
    assert!(status.is_success());

    for path in ["/api/data", "/api/count"] {
        let (status, body) = app.get_json(path).await;
        assert_eq!(status.as_u16(), 500, "{path}");
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
    }

    let (status, body) = app.get_json("/health").await;
    assert_eq!(status.as_u16(), 500);
    assert_eq!(body["status"], "unhealthy");
}

#[tokio::test]
async fn concurrent_list_and_count_do_not_interfere() {
    let app = TestApp::spawn_with_store(Arc::new(MemoryStore::seeded()), quick_init(1)).await;

    let requests = (0..10).map(|i| {
        let path = if i % 2 == 0 { "/api/data" } else { "/api/count" };
        app.get_json(path)
    });
    let results = futures::future::join_all(requests).await;

    for (status, body) in results {
        assert!(status.is_success());
        assert_eq!(body["success"], true);
        assert_eq!(body["count"], 3);
    }
}
