use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use factory_contract::{AgentStore, AgentStoreError, ValidationError};
use std::sync::Arc;
use tracing::warn;

/// Shared handler state. The store is injected rather than held as a
/// module-level singleton so tests can substitute an in-memory fake.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AgentStore>,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("user id required")]
    Unauthorized,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("agent not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, msg) = match &self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::InvalidInput(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };
        let body = Json(serde_json::json!({ "error": msg }));
        (code, body).into_response()
    }
}

impl From<AgentStoreError> for ApiError {
    fn from(e: AgentStoreError) -> Self {
        match e {
            AgentStoreError::NotFound(id) => ApiError::NotFound(id),
            other => {
                warn!(error = %other, "store operation failed");
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::InvalidInput(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_maps_to_status_codes() {
        assert_eq!(
            ApiError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::InvalidInput("x".to_string())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("x".to_string()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal("x".to_string()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_not_found_becomes_api_not_found() {
        let err: ApiError = AgentStoreError::NotFound("ag-1".to_string()).into();
        assert!(matches!(err, ApiError::NotFound(id) if id == "ag-1"));

        let err: ApiError = AgentStoreError::AlreadyExists.into();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
