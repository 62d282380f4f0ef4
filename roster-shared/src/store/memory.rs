/// Process-local stores
///
/// Selected with `USERS_BACKEND=memory` / `ITEMS_BACKEND=memory` for local
/// runs without a database, and used by tests. Data is lost on restart.

use super::{ItemStore, StoreResult, UserStore};
use crate::models::{
    item::{Item, NewItem},
    user::{NewUser, User},
};
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn list(&self, limit: u32) -> StoreResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.iter().take(limit as usize).cloned().collect())
    }

    async fn insert(&self, user: NewUser) -> StoreResult<User> {
        let user = user.into_user(Uuid::new_v4().to_string());
        self.users.write().await.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn delete_by_email(&self, email: &str) -> StoreResult<u64> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.email != email);
        Ok((before - users.len()) as u64)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[derive(Debug, Default)]
struct ItemTable {
    rows: Vec<Item>,
    last_id: i64,
}

/// Items with sequential ids starting at 1, like an autoincrement column
#[derive(Debug, Default)]
pub struct MemoryItemStore {
    table: RwLock<ItemTable>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn list(&self, limit: u32) -> StoreResult<Vec<Item>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().take(limit as usize).cloned().collect())
    }

    async fn insert(&self, item: NewItem) -> StoreResult<Item> {
        let mut table = self.table.write().await;
        table.last_id += 1;

        let item = Item {
            id: table.last_id,
            name: item.name,
        };
        table.rows.push(item.clone());
        Ok(item)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_user_ids_are_unique() {
        let store = MemoryUserStore::new();

        let a = store.insert(NewUser::new("A", "a@example.com")).await.unwrap();
        let b = store.insert(NewUser::new("B", "b@example.com")).await.unwrap();

        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
        assert_eq!(store.list(10).await.unwrap(), vec![a, b]);
    }

    #[tokio::test]
    async fn test_user_delete_by_email_counts_removed() {
        let store = MemoryUserStore::new();
        store.insert(NewUser::new("A", "x@example.com")).await.unwrap();
        store.insert(NewUser::new("B", "x@example.com")).await.unwrap();
        store.insert(NewUser::new("C", "y@example.com")).await.unwrap();

        assert_eq!(store.delete_by_email("x@example.com").await.unwrap(), 2);
        assert_eq!(store.delete_by_email("x@example.com").await.unwrap(), 0);
        assert_eq!(store.list(10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_item_ids_are_sequential() {
        let store = MemoryItemStore::new();

        let one = store.insert(NewItem::new("one")).await.unwrap();
        let two = store.insert(NewItem::new("two")).await.unwrap();

        assert_eq!((one.id, two.id), (1, 2));
        assert_eq!(store.list(1).await.unwrap(), vec![one]);
    }
}
