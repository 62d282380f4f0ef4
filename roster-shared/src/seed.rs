/// Default admin provisioning
///
/// Makes sure a well-known admin user exists. Running it repeatedly is safe:
/// an existing user with the admin email is left untouched.
///
/// # Example
///
/// ```no_run
/// use roster_shared::seed::{ensure_default_admin, SeedOutcome};
/// use roster_shared::store::memory::MemoryUserStore;
///
/// # async fn example() -> Result<(), roster_shared::store::StoreError> {
/// let store = MemoryUserStore::new();
/// match ensure_default_admin(&store).await? {
///     SeedOutcome::Created(user) => println!("created {}", user.id),
///     SeedOutcome::AlreadyPresent(user) => println!("kept {}", user.id),
/// }
/// # Ok(())
/// # }
/// ```

use crate::models::user::{NewUser, User};
use crate::store::{StoreResult, UserStore};
use tracing::info;

pub const ADMIN_NAME: &str = "Admin";
pub const ADMIN_EMAIL: &str = "admin@example.com";

/// What [`ensure_default_admin`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    Created(User),
    AlreadyPresent(User),
}

impl SeedOutcome {
    pub fn user(&self) -> &User {
        match self {
            SeedOutcome::Created(user) | SeedOutcome::AlreadyPresent(user) => user,
        }
    }
}

/// Creates `Admin <admin@example.com>` unless a user with that email exists
pub async fn ensure_default_admin(store: &dyn UserStore) -> StoreResult<SeedOutcome> {
    if let Some(existing) = store.find_by_email(ADMIN_EMAIL).await? {
        info!(user_id = %existing.id, backend = store.backend(), "Admin user already exists");
        return Ok(SeedOutcome::AlreadyPresent(existing));
    }

    let created = store.insert(NewUser::new(ADMIN_NAME, ADMIN_EMAIL)).await?;
    info!(user_id = %created.id, backend = store.backend(), "Default admin user created");

    Ok(SeedOutcome::Created(created))
}
