/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
/// Stores are injected through [`AppState`]; the router never opens
/// connections itself.
///
/// # Example
///
/// ```no_run
/// use roster_api::{app::{build_router, AppState}, config::Config};
/// use roster_shared::store::memory::{MemoryItemStore, MemoryUserStore};
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(
///     Arc::new(MemoryUserStore::new()),
///     Arc::new(MemoryItemStore::new()),
///     config,
/// );
/// let app = build_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, routes};
use axum::{
    error_handling::HandleErrorLayer,
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use roster_shared::store::{ItemStore, UserStore};
use std::{sync::Arc, time::Duration};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Users store adapter
    pub users: Arc<dyn UserStore>,

    /// Items store adapter
    pub items: Arc<dyn ItemStore>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(users: Arc<dyn UserStore>, items: Arc<dyn ItemStore>, config: Config) -> Self {
        Self {
            users,
            items,
            config: Arc::new(config),
        }
    }

    /// Maximum records a list endpoint returns
    pub fn list_limit(&self) -> u32 {
        self.config.api.list_limit
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Routes
///
/// ```text
/// /
/// ├── GET  /health          # Liveness, always {"status":"ok"}
/// ├── GET  /health/ready    # Readiness, pings both stores
/// ├── GET  /users           # List users
/// ├── POST /users           # Create user
/// ├── GET  /items           # List items
/// └── POST /items           # Create item
/// ```
///
/// # Middleware Stack
///
/// Applied outermost first:
/// 1. CORS (tower-http CorsLayer)
/// 2. Request id assignment and propagation (`x-request-id`)
/// 3. Logging (tower-http TraceLayer)
/// 4. Request timeout (`tower::timeout`, rendered as a 408 `ApiError`)
///
/// Unknown routes answer 404 and unsupported methods 405, both with the
/// JSON error body.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.api.cors_origins);
    let timeout = Duration::from_secs(state.config.api.request_timeout_seconds);

    Router::new()
        .route(
            "/health",
            get(routes::health::health_check).fallback(routes::method_not_allowed),
        )
        .route(
            "/health/ready",
            get(routes::health::readiness_check).fallback(routes::method_not_allowed),
        )
        .route(
            "/users",
            get(routes::users::list_users)
                .post(routes::users::create_user)
                .fallback(routes::method_not_allowed),
        )
        .route(
            "/items",
            get(routes::items::list_items)
                .post(routes::items::create_item)
                .fallback(routes::method_not_allowed),
        )
        .fallback(routes::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(routes::handle_middleware_error))
                .timeout(timeout),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Permissive CORS when `*` is configured, otherwise an explicit allow-list
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}
