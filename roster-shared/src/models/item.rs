/// Item model
///
/// Items are the relational twin of users: a `name` with an integer id
/// assigned by the `items` table.
///
/// ```sql
/// CREATE TABLE items (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     name TEXT NOT NULL
/// );
/// ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
}

impl NewItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
