/// Item endpoints
///
/// - `GET /items` - List items (bounded by `LIST_LIMIT`)
/// - `POST /items` - Create an item, responds with its id only

use crate::{
    app::AppState,
    error::ApiResult,
    extract::{not_blank, trimmed, ValidatedJson},
};
use axum::{extract::State, http::StatusCode, Json};
use roster_shared::models::item::{Item, NewItem};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Create item request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateItemRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        custom(function = "not_blank", message = "name is required"),
        length(max = 100, message = "name must be at most 100 characters")
    )]
    pub name: String,
}

/// Create item response
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateItemResponse {
    pub id: i64,
}

/// List items
///
/// ```text
/// GET /items  ->  200 [{ "id": 1, "name": "one" }, ...]
/// ```
pub async fn list_items(State(state): State<AppState>) -> ApiResult<Json<Vec<Item>>> {
    let items = state.items.list(state.list_limit()).await?;

    tracing::debug!(count = items.len(), backend = state.items.backend(), "Listed items");
    Ok(Json(items))
}

/// Create an item
///
/// ```text
/// POST /items {"name":"one"}  ->  201 { "id": 1 }
/// ```
pub async fn create_item(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateItemRequest>,
) -> ApiResult<(StatusCode, Json<CreateItemResponse>)> {
    let item = state.items.insert(NewItem::new(req.name)).await?;

    tracing::info!(item_id = item.id, backend = state.items.backend(), "Item created");
    Ok((StatusCode::CREATED, Json(CreateItemResponse { id: item.id })))
}
