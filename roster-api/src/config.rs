/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct. Behaviour is a function of this struct
/// alone: nothing downstream reads the environment.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `PORT`: Port to bind to (default: 3000)
/// - `CORS_ORIGINS`: Comma-separated allowed origins, `*` for any (default: *)
/// - `REQUEST_TIMEOUT_SECONDS`: Per-request deadline (default: 10)
/// - `LIST_LIMIT`: Maximum records returned by list endpoints, 1-1000 (default: 100)
/// - `USERS_BACKEND`: `mongo`, `sql` or `memory` (default: mongo)
/// - `ITEMS_BACKEND`: `sql` or `memory` (default: sql)
/// - `MONGO_URI`: MongoDB connection string (default: mongodb://localhost:27017/demo)
/// - `MONGO_DATABASE`: Overrides the database named in `MONGO_URI`
/// - `MONGO_SERVER_SELECTION_TIMEOUT_SECONDS`: (default: 5)
/// - `DATABASE_URL`: SQLite connection string (default: sqlite://dev.sqlite3)
/// - `DATABASE_MAX_CONNECTIONS`: (default: 10)
/// - `LOG_FORMAT`: `pretty` or `json` (default: pretty)
///
/// # Example
///
/// ```no_run
/// use roster_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use anyhow::Context;
use roster_shared::db::{mongo::MongoConfig, pool::DatabaseConfig};
use std::{env, fmt, str::FromStr};

/// Upper bound accepted for `LIST_LIMIT`
pub const MAX_LIST_LIMIT: u32 = 1000;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Backend selection for each resource
    pub stores: StoresConfig,

    /// MongoDB configuration (used when users are document-backed)
    pub mongo: MongoConfig,

    /// SQL pool configuration (used by SQL-backed stores)
    pub database: DatabaseConfig,

    /// Log output format
    pub log_format: LogFormat,
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,

    /// Allowed CORS origins; `*` enables permissive CORS
    pub cors_origins: Vec<String>,

    /// Deadline for a whole request, store calls included
    pub request_timeout_seconds: u64,

    /// Maximum number of records a list endpoint returns
    pub list_limit: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoresConfig {
    pub users: StoreBackend,
    pub items: StoreBackend,
}

/// Where a resource is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo,
    Sql,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "sql" | "sqlite" => Ok(StoreBackend::Sql),
            "memory" => Ok(StoreBackend::Memory),
            other => anyhow::bail!("unknown store backend '{}' (expected mongo, sql or memory)", other),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Mongo => write!(f, "mongo"),
            StoreBackend::Sql => write!(f, "sql"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => anyhow::bail!("unknown log format '{}' (expected pretty or json)", other),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// A `.env` file in the working directory is loaded first when present.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending variable if a value cannot be
    /// parsed or is out of range.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = parse_var(&lookup, "PORT", 3000u16)?;
        let request_timeout_seconds = parse_var(&lookup, "REQUEST_TIMEOUT_SECONDS", 10u64)?;
        if request_timeout_seconds == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECONDS must be greater than zero");
        }

        let list_limit = parse_var(&lookup, "LIST_LIMIT", 100u32)?;
        if !(1..=MAX_LIST_LIMIT).contains(&list_limit) {
            anyhow::bail!("LIST_LIMIT must be between 1 and {}", MAX_LIST_LIMIT);
        }

        let cors_origins = get("CORS_ORIGINS", "*")
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let stores = StoresConfig {
            users: parse_var(&lookup, "USERS_BACKEND", StoreBackend::Mongo)?,
            items: parse_var(&lookup, "ITEMS_BACKEND", StoreBackend::Sql)?,
        };
        if stores.items == StoreBackend::Mongo {
            anyhow::bail!("ITEMS_BACKEND does not support mongo (expected sql or memory)");
        }

        let mongo = MongoConfig {
            uri: get("MONGO_URI", "mongodb://localhost:27017/demo"),
            database: lookup("MONGO_DATABASE").filter(|name| !name.trim().is_empty()),
            server_selection_timeout_seconds: parse_var(
                &lookup,
                "MONGO_SERVER_SELECTION_TIMEOUT_SECONDS",
                5u64,
            )?,
            ..Default::default()
        };

        let database = DatabaseConfig {
            url: get("DATABASE_URL", "sqlite://dev.sqlite3"),
            max_connections: parse_var(&lookup, "DATABASE_MAX_CONNECTIONS", 10u32)?,
            ..Default::default()
        };

        Ok(Self {
            api: ApiConfig {
                host: get("API_HOST", "0.0.0.0"),
                port,
                cors_origins,
                request_timeout_seconds,
                list_limit,
            },
            stores,
            mongo,
            database,
            log_format: parse_var(&lookup, "LOG_FORMAT", LogFormat::Pretty)?,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Whether any resource is SQL-backed and needs the pool
    pub fn needs_sql(&self) -> bool {
        self.stores.users == StoreBackend::Sql || self.stores.items == StoreBackend::Sql
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("invalid value for {}: '{}'", key, raw)),
        None => Ok(default),
    }
}
