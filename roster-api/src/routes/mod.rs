/// API route handlers
///
/// - `health`: liveness and readiness checks
/// - `users`: list and create users
/// - `items`: list and create items
///
/// The fallbacks below keep router-level failures on the same JSON error
/// body as handler errors.

pub mod health;
pub mod items;
pub mod users;

use crate::error::ApiError;
use axum::{
    http::{Method, Uri},
    BoxError,
};

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}

/// Fallback for known routes hit with an unsupported method
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed(format!("{} is not supported on {}", method, uri.path()))
}

/// Converts errors raised by the middleware stack into API errors
pub async fn handle_middleware_error(err: BoxError) -> ApiError {
    if err.is::<tower::timeout::error::Elapsed>() {
        return ApiError::RequestTimeout("The request took too long to complete".to_string());
    }

    ApiError::InternalError(format!("Unhandled middleware error: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_elapsed_maps_to_request_timeout() {
        let err: BoxError = Box::new(tower::timeout::error::Elapsed::new());
        let api_error = handle_middleware_error(err).await;

        assert_eq!(api_error.status_code(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(api_error.error_code(), "request_timeout");
    }

    #[tokio::test]
    async fn test_other_middleware_errors_are_internal() {
        let err: BoxError = "layer exploded".into();
        let api_error = handle_middleware_error(err).await;

        assert_eq!(api_error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_method_not_allowed_names_method() {
        let api_error = method_not_allowed(Method::DELETE, Uri::from_static("/users")).await;

        assert_eq!(api_error.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(api_error.to_string().contains("DELETE"));
    }
}
