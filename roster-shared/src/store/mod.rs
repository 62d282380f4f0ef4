/// Store adapters
///
/// A store adapter is the only code that talks to an external database. Each
/// adapter wraps one collection or table, owns connection acquisition and
/// query shaping, and reports failures as [`StoreError`]. Business
/// validation happens before a store is called, never inside one.
///
/// # Adapters
///
/// | trait       | adapters                                              |
/// |-------------|-------------------------------------------------------|
/// | `UserStore` | `MongoUserStore`, `SqlUserStore`, `MemoryUserStore`   |
/// | `ItemStore` | `SqlItemStore`, `MemoryItemStore`                     |
///
/// # Example
///
/// ```no_run
/// use roster_shared::models::user::NewUser;
/// use roster_shared::store::{memory::MemoryUserStore, UserStore};
///
/// # async fn example() -> Result<(), roster_shared::store::StoreError> {
/// let store = MemoryUserStore::new();
/// let user = store.insert(NewUser::new("Ada", "ada@example.com")).await?;
/// assert_eq!(store.list(100).await?, vec![user]);
/// # Ok(())
/// # }
/// ```

pub mod memory;
pub mod mongo;
pub mod sql;

use crate::models::{
    item::{Item, NewItem},
    user::{NewUser, User},
};
use async_trait::async_trait;

/// Store error taxonomy
///
/// The variants separate failures a client can act on (`Conflict`) from
/// dependency failures (`Unavailable`, `Query`). Messages carry driver
/// detail for logs and are not meant for API responses.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached (connection, pool or server selection failure)
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected a write because of a duplicate key
    #[error("duplicate record: {0}")]
    Conflict(String),

    /// The store was reachable but the operation failed
    #[error("store query failed: {0}")]
    Query(String),
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => StoreError::Unavailable(err.to_string()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::Conflict(db_err.message().to_string())
            }
            _ => StoreError::Query(err.to_string()),
        }
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::{ErrorKind, WriteFailure};

        match err.kind.as_ref() {
            ErrorKind::ServerSelection { .. }
            | ErrorKind::ConnectionPoolCleared { .. }
            | ErrorKind::Io(_) => StoreError::Unavailable(err.to_string()),
            ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == 11000 => {
                StoreError::Conflict(write_error.message.clone())
            }
            _ => StoreError::Query(err.to_string()),
        }
    }
}

/// Access to the `users` collection or table
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Short backend name used in logs and readiness reports
    fn backend(&self) -> &'static str;

    /// Returns up to `limit` users in insertion order
    async fn list(&self, limit: u32) -> StoreResult<Vec<User>>;

    /// Inserts a user and returns it with its store-assigned id
    async fn insert(&self, user: NewUser) -> StoreResult<User>;

    /// Returns the first user with the given email, if any
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Deletes every user with the given email and returns how many were removed
    async fn delete_by_email(&self, email: &str) -> StoreResult<u64>;

    /// Verifies the backing store answers
    async fn ping(&self) -> StoreResult<()>;
}

/// Access to the `items` table
#[async_trait]
pub trait ItemStore: Send + Sync {
    fn backend(&self) -> &'static str;

    /// Returns up to `limit` items in insertion order
    async fn list(&self, limit: u32) -> StoreResult<Vec<Item>>;

    /// Inserts an item and returns it with its store-assigned id
    async fn insert(&self, item: NewItem) -> StoreResult<Item>;

    async fn ping(&self) -> StoreResult<()>;
}
