/// Records exposed by the API
///
/// # Models
///
/// - `user`: people registered through `POST /users`
/// - `item`: named items registered through `POST /items`
///
/// Models are plain data. Reads and writes go through the store traits in
/// [`crate::store`], which assign identifiers on insert.

pub mod item;
pub mod user;
