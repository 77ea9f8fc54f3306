use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Gone(String),
    Upstream(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Gone(msg) => (StatusCode::GONE, msg),
            ApiError::Upstream(msg) => {
                tracing::error!("upstream failure: {msg}");
                (StatusCode::BAD_GATEWAY, "model provider error".to_string())
            }
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<murmur_store::error::StoreError> for ApiError {
    fn from(e: murmur_store::error::StoreError) -> Self {
        match e {
            murmur_store::error::StoreError::Deprecated(msg) => ApiError::Gone(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<murmur_model::error::ModelError> for ApiError {
    fn from(e: murmur_model::error::ModelError) -> Self {
        ApiError::Upstream(e.to_string())
    }
}

impl From<murmur_auth::error::AuthError> for ApiError {
    fn from(e: murmur_auth::error::AuthError) -> Self {
        ApiError::Unauthorized(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}
