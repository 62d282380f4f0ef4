//! # Roster Seed
//!
//! Ensures the default `Admin <admin@example.com>` user exists in the
//! configured users store. Safe to run repeatedly.
//!
//! ```bash
//! USERS_BACKEND=mongo MONGO_URI=mongodb://localhost:27017/demo cargo run -p roster-api --bin roster-seed
//! ```

use anyhow::Context;
use roster_api::{bootstrap, config::Config};
use roster_shared::seed::{ensure_default_admin, SeedOutcome};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;
    bootstrap::init_tracing(config.log_format);

    let stores = bootstrap::connect_stores(&config).await.map_err(|e| {
        tracing::error!("Seed failed: {:#}", e);
        e
    })?;

    let result = ensure_default_admin(stores.users.as_ref()).await;
    stores.close().await;

    match result.context("failed to seed admin user")? {
        SeedOutcome::Created(user) => tracing::info!(user_id = %user.id, "Default admin user created"),
        SeedOutcome::AlreadyPresent(user) => tracing::info!(user_id = %user.id, "Admin user already exists"),
    }

    Ok(())
}
