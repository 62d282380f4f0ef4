/// SQL-backed stores
///
/// Both stores share one `SqlitePool` and rely on the schema created by
/// [`crate::db::migrations::run_migrations`]. Identifiers come from column
/// defaults and are read back with `RETURNING`.
///
/// Inserts use `fetch_all` so the statement is stepped to completion, and
/// its autocommit is visible to other connections, before the row is
/// returned.

use super::{ItemStore, StoreError, StoreResult, UserStore};
use crate::db::pool;
use crate::models::{
    item::{Item, NewItem},
    user::{NewUser, User},
};
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

/// `users` table adapter
#[derive(Debug, Clone)]
pub struct SqlUserStore {
    pool: SqlitePool,
}

impl SqlUserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for SqlUserStore {
    fn backend(&self) -> &'static str {
        "sql"
    }

    async fn list(&self, limit: u32) -> StoreResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, email FROM users ORDER BY rowid LIMIT ?",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn insert(&self, user: NewUser) -> StoreResult<User> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email)
            VALUES (?, ?)
            RETURNING id, name, email
            "#,
        )
        .bind(user.name)
        .bind(user.email)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| StoreError::Query("INSERT INTO users returned no row".to_string()))?;

        debug!(user_id = %created.id, "Inserted user into SQL store");
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email FROM users WHERE email = ? ORDER BY rowid LIMIT 1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn delete_by_email(&self, email: &str) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM users WHERE email = ?")
            .bind(email)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> StoreResult<()> {
        pool::health_check(&self.pool).await?;
        Ok(())
    }
}

/// `items` table adapter
#[derive(Debug, Clone)]
pub struct SqlItemStore {
    pool: SqlitePool,
}

impl SqlItemStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemStore for SqlItemStore {
    fn backend(&self) -> &'static str {
        "sql"
    }

    async fn list(&self, limit: u32) -> StoreResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>("SELECT id, name FROM items ORDER BY id LIMIT ?")
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    async fn insert(&self, item: NewItem) -> StoreResult<Item> {
        let created = sqlx::query_as::<_, Item>(
            "INSERT INTO items (name) VALUES (?) RETURNING id, name",
        )
        .bind(item.name)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| StoreError::Query("INSERT INTO items returned no row".to_string()))?;

        debug!(item_id = created.id, "Inserted item into SQL store");
        Ok(created)
    }

    async fn ping(&self) -> StoreResult<()> {
        pool::health_check(&self.pool).await?;
        Ok(())
    }
}
