//! # Roster Shared Library
//!
//! Types, persistence plumbing and store adapters used by the Roster API
//! server and its seed tool.
//!
//! ## Module Organization
//!
//! - `models`: User and Item records plus their creation inputs
//! - `store`: `UserStore` / `ItemStore` traits and their MongoDB, SQL and
//!   in-memory adapters
//! - `db`: SQLite connection pool, migrations and the MongoDB client
//! - `seed`: default admin user provisioning

pub mod db;
pub mod models;
pub mod seed;
pub mod store;

/// Current version of the Roster shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
