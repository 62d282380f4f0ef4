/// User endpoints
///
/// # Endpoints
///
/// - `GET /users` - List users (bounded by `LIST_LIMIT`)
/// - `POST /users` - Create a user
///
/// Both fields are checked before the store is called; a store failure is
/// reported as 502/503 with the structured error body, never as an empty
/// list.

use crate::{
    app::AppState,
    error::ApiResult,
    extract::{not_blank, trimmed, ValidatedJson},
};
use axum::{extract::State, http::StatusCode, Json};
use roster_shared::models::user::{NewUser, User};
use serde::Deserialize;
use validator::Validate;

/// Create user request
///
/// Missing fields deserialize to empty strings so they are reported by
/// validation alongside any other field errors.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        custom(function = "not_blank", message = "name is required"),
        length(max = 100, message = "name must be at most 100 characters")
    )]
    pub name: String,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        custom(function = "not_blank", message = "email is required"),
        email(message = "email must be a valid email address")
    )]
    pub email: String,
}

/// List users
///
/// # Endpoint
///
/// ```text
/// GET /users
/// ```
///
/// # Response
///
/// ```json
/// [
///   { "id": "6650c0...", "name": "Test", "email": "test@example.com" }
/// ]
/// ```
///
/// # Errors
///
/// - `502 Bad Gateway`: Store rejected the query
/// - `503 Service Unavailable`: Store unreachable
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = state.users.list(state.list_limit()).await?;

    tracing::debug!(count = users.len(), backend = state.users.backend(), "Listed users");
    Ok(Json(users))
}

/// Create a user
///
/// # Endpoint
///
/// ```text
/// POST /users
/// Content-Type: application/json
///
/// { "name": "Test", "email": "test@example.com" }
/// ```
///
/// # Response (201)
///
/// ```json
/// { "id": "6650c0...", "name": "Test", "email": "test@example.com" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Malformed body or missing/invalid `name` / `email`
/// - `409 Conflict`: Store reported a duplicate key
/// - `502 Bad Gateway`: Store rejected the insert
/// - `503 Service Unavailable`: Store unreachable
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = state
        .users
        .insert(NewUser::new(req.name, req.email))
        .await?;

    tracing::info!(user_id = %user.id, backend = state.users.backend(), "User created");
    Ok((StatusCode::CREATED, Json(user)))
}
