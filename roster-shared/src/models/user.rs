/// User model
///
/// A user is a `name` / `email` pair with an identifier assigned by the store
/// on insert. Email addresses are unique by convention only; no store
/// enforces it.
///
/// # Schema (SQL backend)
///
/// ```sql
/// CREATE TABLE users (
///     id TEXT PRIMARY KEY NOT NULL DEFAULT (lower(hex(randomblob(16)))),
///     name TEXT NOT NULL,
///     email TEXT NOT NULL
/// );
/// ```
///
/// The MongoDB backend stores the same fields in the `users` collection and
/// exposes the hex form of `_id` as `id`.

use serde::{Deserialize, Serialize};

/// A stored user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Store-assigned identifier, opaque to clients
    pub id: String,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,
}

/// Input for creating a new user
///
/// Callers validate the fields before handing this to a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Attaches a store-assigned id
    pub fn into_user(self, id: impl Into<String>) -> User {
        User {
            id: id.into(),
            name: self.name,
            email: self.email,
        }
    }
}
