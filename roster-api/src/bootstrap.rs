/// Process start-up helpers shared by the server and seed binaries
///
/// Store construction is the only place that turns configuration into live
/// connections. Every failure here is fatal for the process: it is logged
/// with context and returned so `main` exits non-zero.

use crate::config::{Config, LogFormat, StoreBackend};
use anyhow::Context;
use roster_shared::db::{migrations, mongo, pool};
use roster_shared::store::{
    memory::{MemoryItemStore, MemoryUserStore},
    mongo::MongoUserStore,
    sql::{SqlItemStore, SqlUserStore},
    ItemStore, UserStore,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "roster_api=debug,roster_shared=debug,tower_http=debug";

/// Initializes the global tracing subscriber
pub fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .init(),
    }
}

/// Connected stores plus the SQL pool backing them, if any
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub items: Arc<dyn ItemStore>,
    pub pool: Option<SqlitePool>,
}

impl Stores {
    /// Releases pooled connections
    pub async fn close(self) {
        if let Some(pool) = self.pool {
            pool::close_pool(pool).await;
        }
    }
}

/// Connects every store the configuration selects
///
/// The SQL pool is opened and migrated once and shared by both SQL stores.
/// MongoDB is only contacted when users are document-backed.
///
/// # Errors
///
/// Returns an error if any selected store cannot be reached or migrated.
pub async fn connect_stores(config: &Config) -> anyhow::Result<Stores> {
    let pool = if config.needs_sql() {
        let pool = pool::create_pool(config.database.clone())
            .await
            .with_context(|| format!("failed to open SQL database at {}", config.database.url))?;
        migrations::run_migrations(&pool)
            .await
            .context("failed to run SQL migrations")?;
        Some(pool)
    } else {
        None
    };

    let users: Arc<dyn UserStore> = match config.stores.users {
        StoreBackend::Mongo => {
            let database = mongo::connect_mongo(&config.mongo)
                .await
                .context("failed to connect to MongoDB (check MONGO_URI)")?;
            Arc::new(MongoUserStore::new(database))
        }
        StoreBackend::Sql => Arc::new(SqlUserStore::new(require_pool(&pool)?)),
        StoreBackend::Memory => Arc::new(MemoryUserStore::new()),
    };

    let items: Arc<dyn ItemStore> = match config.stores.items {
        StoreBackend::Sql => Arc::new(SqlItemStore::new(require_pool(&pool)?)),
        StoreBackend::Memory => Arc::new(MemoryItemStore::new()),
        StoreBackend::Mongo => anyhow::bail!("items cannot be stored in MongoDB"),
    };

    tracing::info!(
        users_backend = users.backend(),
        items_backend = items.backend(),
        "Stores connected"
    );

    Ok(Stores { users, items, pool })
}

fn require_pool(pool: &Option<SqlitePool>) -> anyhow::Result<SqlitePool> {
    pool.clone()
        .context("SQL backend selected but no SQL pool was opened")
}
