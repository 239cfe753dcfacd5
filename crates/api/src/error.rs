use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use visitor_locator_core::{geolocation::LookupError, store::StoreError};

/// API error type. Every variant renders as `{"error": "<message>"}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("client IP could not be determined")]
    NoClientIp,

    #[error("geolocation lookup failed for {0}")]
    UpstreamLookupFailed(String),

    #[error("geolocation error: {0}")]
    Lookup(LookupError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::Status { ip, .. } => ApiError::UpstreamLookupFailed(ip),
            other => ApiError::Lookup(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NoClientIp => (
                StatusCode::BAD_REQUEST,
                "Could not determine IP address.".to_string(),
            ),
            ApiError::UpstreamLookupFailed(ip) => (
                StatusCode::BAD_GATEWAY,
                format!("Failed to fetch details for IP: {ip}"),
            ),
            ApiError::Lookup(_) | ApiError::Store(_) | ApiError::Internal(_) => {
                tracing::error!("An error occurred: {self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred.".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Convenience type alias for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;
