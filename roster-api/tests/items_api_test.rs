/// Integration tests for the /items endpoints

mod common;

use axum::http::StatusCode;
use common::{BrokenStore, TestContext};
use roster_shared::store::memory::MemoryUserStore;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_create_two_items_then_list() {
    let ctx = TestContext::new().await.unwrap();

    let (status, one) = ctx.post("/items", json!({ "name": "one" })).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, two) = ctx.post("/items", json!({ "name": "two" })).await;
    assert_eq!(status, StatusCode::CREATED);

    // Creation responds with the id only
    assert!(one["id"].is_i64());
    assert_eq!(one.as_object().unwrap().len(), 1);
    assert!(two["id"].as_i64().unwrap() > one["id"].as_i64().unwrap());

    let (status, listed) = ctx.get("/items").await;
    assert_eq!(status, StatusCode::OK);

    let listed = listed.as_array().unwrap();
    assert!(listed.len() >= 2);
    assert!(listed.iter().any(|i| i["name"] == "one" && i["id"] == one["id"]));
    assert!(listed.iter().any(|i| i["name"] == "two" && i["id"] == two["id"]));
}

#[tokio::test]
async fn test_items_seeded_directly_are_listed() {
    let ctx = TestContext::new().await.unwrap();
    let pool = ctx.pool.clone().unwrap();

    sqlx::query("INSERT INTO items (name) VALUES ('one'), ('two')")
        .execute(&pool)
        .await
        .unwrap();

    let (status, listed) = ctx.get("/items").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        listed,
        json!([{ "id": 1, "name": "one" }, { "id": 2, "name": "two" }])
    );
}

#[tokio::test]
async fn test_item_name_is_stored_trimmed() {
    let ctx = TestContext::new().await.unwrap();

    let (status, created) = ctx.post("/items", json!({ "name": "  one  " })).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, listed) = ctx.get("/items").await;
    assert_eq!(listed, json!([{ "id": created["id"], "name": "one" }]));
}

#[tokio::test]
async fn test_missing_item_name_is_rejected() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.post("/items", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "name");

    let (status, body) = ctx.post("/items", json!({ "name": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (_, listed) = ctx.get("/items").await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_unreachable_items_store_is_503() {
    let ctx = TestContext::with_stores(
        Arc::new(MemoryUserStore::new()),
        Arc::new(BrokenStore::unavailable()),
    );

    let (status, body) = ctx.get("/items").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "service_unavailable");

    let (status, _) = ctx.post("/items", json!({ "name": "one" })).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
