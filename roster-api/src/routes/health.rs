/// Health check endpoints
///
/// # Endpoints
///
/// ```text
/// GET /health         -> 200 {"status":"ok"}
/// GET /health/ready   -> 200 | 503 {"status":"ready","users":"connected","items":"connected"}
/// ```
///
/// `/health` is pure liveness: it touches no store and cannot fail.
/// `/health/ready` pings both stores and reports each one.

use crate::app::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

/// Liveness response
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
}

/// Readiness response
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// "ready" when every store answers, "degraded" otherwise
    pub status: String,

    /// Users store status ("connected" / "disconnected")
    pub users: String,

    /// Items store status ("connected" / "disconnected")
    pub items: String,
}

/// Liveness handler
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Readiness handler
///
/// Returns 503 when any store fails its ping so load balancers stop routing
/// traffic here.
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let (users, items) = tokio::join!(state.users.ping(), state.items.ping());

    if let Err(err) = &users {
        tracing::warn!(backend = state.users.backend(), error = %err, "Users store ping failed");
    }
    if let Err(err) = &items {
        tracing::warn!(backend = state.items.backend(), error = %err, "Items store ping failed");
    }

    let ready = users.is_ok() && items.is_ok();
    let describe = |ok: bool| if ok { "connected" } else { "disconnected" }.to_string();

    let body = ReadinessResponse {
        status: if ready { "ready" } else { "degraded" }.to_string(),
        users: describe(users.is_ok()),
        items: describe(items.is_ok()),
    };

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(body))
}
