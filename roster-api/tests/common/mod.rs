//! Common test utilities for integration tests
//!
//! This module provides shared infrastructure for integration tests:
//! - App construction over in-memory SQLite stores with migrations applied
//! - Store doubles that fail the way an unreachable database does, or
//!   answer slower than the request timeout
//! - A request helper returning status and parsed JSON body

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use roster_api::app::{build_router, AppState};
use roster_api::config::Config;
use roster_shared::db::{
    migrations::run_migrations,
    pool::{create_pool, DatabaseConfig},
};
use roster_shared::models::{
    item::{Item, NewItem},
    user::{NewUser, User},
};
use roster_shared::store::{
    sql::{SqlItemStore, SqlUserStore},
    ItemStore, StoreError, StoreResult, UserStore,
};
use serde_json::Value;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;
use tower::Service as _;

/// Test context containing the router and the stores behind it
pub struct TestContext {
    pub app: axum::Router,
    pub users: Arc<dyn UserStore>,
    pub items: Arc<dyn ItemStore>,
    pub pool: Option<SqlitePool>,
}

impl TestContext {
    /// Creates a context backed by a fresh, migrated in-memory SQLite database
    pub async fn new() -> anyhow::Result<Self> {
        let pool = create_pool(DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            ..Default::default()
        })
        .await?;
        run_migrations(&pool).await?;

        let mut ctx = Self::with_stores(
            Arc::new(SqlUserStore::new(pool.clone())),
            Arc::new(SqlItemStore::new(pool.clone())),
        );
        ctx.pool = Some(pool);
        Ok(ctx)
    }

    /// Creates a context over arbitrary stores with default configuration
    pub fn with_stores(users: Arc<dyn UserStore>, items: Arc<dyn ItemStore>) -> Self {
        Self::with_config(users, items, test_config(&[]))
    }

    pub fn with_config(
        users: Arc<dyn UserStore>,
        items: Arc<dyn ItemStore>,
        config: Config,
    ) -> Self {
        let state = AppState::new(users.clone(), items.clone(), config);
        Self {
            app: build_router(state),
            users,
            items,
            pool: None,
        }
    }

    /// Sends a request and returns the status and JSON body (`Value::Null` when empty)
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.send_request(builder.body(body).unwrap()).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                panic!("non-JSON body ({}): {}", status, String::from_utf8_lossy(&bytes))
            })
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }
}

/// Configuration built from explicit pairs only, ignoring the process environment
pub fn test_config(pairs: &[(&str, &str)]) -> Config {
    let pairs: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
    .unwrap()
}

/// Unique email so tests never collide
pub fn unique_email() -> String {
    format!("test-{}@example.com", uuid::Uuid::new_v4())
}

/// Store double whose every call fails with the configured error
pub struct BrokenStore {
    kind: BrokenKind,
}

#[derive(Clone, Copy)]
pub enum BrokenKind {
    Unavailable,
    Query,
    Conflict,
}

impl BrokenStore {
    pub fn unavailable() -> Self {
        Self { kind: BrokenKind::Unavailable }
    }

    pub fn failing_queries() -> Self {
        Self { kind: BrokenKind::Query }
    }

    pub fn conflicting() -> Self {
        Self { kind: BrokenKind::Conflict }
    }

    fn error(&self) -> StoreError {
        match self.kind {
            BrokenKind::Unavailable => {
                StoreError::Unavailable("server selection timeout: 127.0.0.1:27017".to_string())
            }
            BrokenKind::Query => StoreError::Query("no such table: users".to_string()),
            BrokenKind::Conflict => StoreError::Conflict("E11000 duplicate key".to_string()),
        }
    }
}

#[async_trait]
impl UserStore for BrokenStore {
    fn backend(&self) -> &'static str {
        "broken"
    }

    async fn list(&self, _limit: u32) -> StoreResult<Vec<User>> {
        Err(self.error())
    }

    async fn insert(&self, _user: NewUser) -> StoreResult<User> {
        Err(self.error())
    }

    async fn find_by_email(&self, _email: &str) -> StoreResult<Option<User>> {
        Err(self.error())
    }

    async fn delete_by_email(&self, _email: &str) -> StoreResult<u64> {
        Err(self.error())
    }

    async fn ping(&self) -> StoreResult<()> {
        Err(self.error())
    }
}

#[async_trait]
impl ItemStore for BrokenStore {
    fn backend(&self) -> &'static str {
        "broken"
    }

    async fn list(&self, _limit: u32) -> StoreResult<Vec<Item>> {
        Err(self.error())
    }

    async fn insert(&self, _item: NewItem) -> StoreResult<Item> {
        Err(self.error())
    }

    async fn ping(&self) -> StoreResult<()> {
        Err(self.error())
    }
}

/// Store double that answers correctly but only after a delay
pub struct SlowStore {
    delay: Duration,
}

impl SlowStore {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl UserStore for SlowStore {
    fn backend(&self) -> &'static str {
        "slow"
    }

    async fn list(&self, _limit: u32) -> StoreResult<Vec<User>> {
        tokio::time::sleep(self.delay).await;
        Ok(Vec::new())
    }

    async fn insert(&self, user: NewUser) -> StoreResult<User> {
        tokio::time::sleep(self.delay).await;
        Ok(user.into_user("slow".to_string()))
    }

    async fn find_by_email(&self, _email: &str) -> StoreResult<Option<User>> {
        tokio::time::sleep(self.delay).await;
        Ok(None)
    }

    async fn delete_by_email(&self, _email: &str) -> StoreResult<u64> {
        tokio::time::sleep(self.delay).await;
        Ok(0)
    }

    async fn ping(&self) -> StoreResult<()> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}
