//! Mapping from service errors to HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::error::Error;

/// Error returned by API handlers
#[derive(Debug)]
pub enum ApiError {
    /// The submitted alert failed validation
    InvalidAlert,
    /// The client exceeded its submission window
    TooManyRequests,
    /// The alert could not be persisted
    StorageFailure,
    /// Anything else
    Internal(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation(_) => Self::InvalidAlert,
            Error::RateLimit => Self::TooManyRequests,
            Error::Storage(_) | Error::Io(_) => Self::StorageFailure,
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::InvalidAlert => (StatusCode::BAD_REQUEST, "Invalid alert format or severity"),
            Self::TooManyRequests => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many requests. Please slow down.",
            ),
            Self::StorageFailure => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to save alert"),
            Self::Internal(err) => {
                tracing::error!("Internal server error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred",
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
