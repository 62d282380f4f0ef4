/// Connection plumbing for the external stores
///
/// # Modules
///
/// - `pool`: SQLite connection pool management with health checks
/// - `migrations`: Schema migration runner for the `users` and `items` tables
/// - `mongo`: MongoDB client construction for the document-backed users store
///
/// # Example
///
/// ```no_run
/// use roster_shared::db::pool::{create_pool, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         url: "sqlite://dev.sqlite3".to_string(),
///         ..Default::default()
///     };
///
///     let pool = create_pool(config).await?;
///     Ok(())
/// }
/// ```

pub mod migrations;
pub mod mongo;
pub mod pool;
