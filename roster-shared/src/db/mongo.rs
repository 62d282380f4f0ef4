/// MongoDB client construction
///
/// Builds the driver client for the document-backed users store. The driver
/// connects lazily, so [`connect_mongo`] pings the server before returning
/// and start-up fails fast when the server is unreachable.
///
/// # Example
///
/// ```no_run
/// use roster_shared::db::mongo::{connect_mongo, MongoConfig};
///
/// # async fn example() -> Result<(), mongodb::error::Error> {
/// let database = connect_mongo(&MongoConfig {
///     uri: "mongodb://localhost:27017/demo".to_string(),
///     ..Default::default()
/// })
/// .await?;
/// println!("Connected to {}", database.name());
/// # Ok(())
/// # }
/// ```

use mongodb::{bson::doc, options::ClientOptions, Client, Database};
use std::time::Duration;
use tracing::{debug, info};

/// Database used when neither the config nor the URI names one
pub const DEFAULT_DATABASE: &str = "demo";

/// MongoDB connection configuration
#[derive(Debug, Clone)]
pub struct MongoConfig {
    /// Connection string, e.g. `mongodb://localhost:27017/demo`
    pub uri: String,

    /// Explicit database name; overrides the one in the URI
    pub database: Option<String>,

    /// How long to wait for a suitable server before failing an operation (seconds)
    pub server_selection_timeout_seconds: u64,

    /// Application name reported to the server
    pub app_name: String,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017/demo".to_string(),
            database: None,
            server_selection_timeout_seconds: 5,
            app_name: "roster".to_string(),
        }
    }
}

/// Parses the connection string and applies the configured timeouts
pub async fn client_options(config: &MongoConfig) -> Result<ClientOptions, mongodb::error::Error> {
    let mut options = ClientOptions::parse(config.uri.as_str()).await?;

    let timeout = Duration::from_secs(config.server_selection_timeout_seconds);
    options.server_selection_timeout = Some(timeout);
    options.connect_timeout = Some(timeout);
    options.app_name = Some(config.app_name.clone());

    Ok(options)
}

/// Resolves the database name: explicit config, then the URI path, then [`DEFAULT_DATABASE`]
pub fn database_name(config: &MongoConfig, options: &ClientOptions) -> String {
    config
        .database
        .clone()
        .or_else(|| options.default_database.clone())
        .unwrap_or_else(|| DEFAULT_DATABASE.to_string())
}

/// Connects to MongoDB and verifies the server answers a ping
///
/// # Errors
///
/// Returns an error if the URI is malformed or no server can be selected
/// within the configured timeout.
pub async fn connect_mongo(config: &MongoConfig) -> Result<Database, mongodb::error::Error> {
    let options = client_options(config).await?;
    let name = database_name(config, &options);

    info!(
        database = %name,
        server_selection_timeout_seconds = config.server_selection_timeout_seconds,
        "Connecting to MongoDB"
    );

    let client = Client::with_options(options)?;
    let database = client.database(&name);

    ping(&database).await?;

    info!(database = %name, "Connected to MongoDB");
    Ok(database)
}

/// Round-trips a `ping` command to the server
pub async fn ping(database: &Database) -> Result<(), mongodb::error::Error> {
    debug!("Pinging MongoDB");
    database.run_command(doc! { "ping": 1 }).await?;
    Ok(())
}
