//! Application error taxonomy shared by the core and the HTTP layer.
//!
//! Core components return [`AppError`] and never log; the HTTP layer decides how
//! each kind is rendered and recorded.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// JSON body returned by the shorten endpoint on failure.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed input URL. Not retryable.
    #[error("{message}")]
    InvalidUrl { message: String, details: Value },

    /// Argument outside a function's domain (e.g. a non-base-62 code). Not retryable.
    #[error("{message}")]
    InvalidArgument { message: String, details: Value },

    /// Unknown short code. Not retryable.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Transient persistence failure: connection loss, timeout, exhausted
    /// transaction retries. Retryable by the client.
    #[error("{message}")]
    StoreUnavailable { message: String, details: Value },
}

impl AppError {
    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            message: message.into(),
            details,
        }
    }
    pub fn invalid_argument(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidArgument {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn store_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            details,
        }
    }

    /// Stable machine-readable identifier of the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidUrl { .. } => "invalid_url",
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::NotFound { .. } => "not_found",
            Self::StoreUnavailable { .. } => "store_unavailable",
        }
    }

    pub fn details(&self) -> &Value {
        match self {
            Self::InvalidUrl { details, .. }
            | Self::InvalidArgument { details, .. }
            | Self::NotFound { details, .. }
            | Self::StoreUnavailable { details, .. } => details,
        }
    }

    /// Whether a client may reasonably retry the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreUnavailable { .. })
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidUrl { .. } | Self::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::StoreUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut => {
                AppError::store_unavailable("Timed out acquiring a database connection", json!({}))
            }
            other => AppError::store_unavailable(
                "Database error",
                json!({ "reason": other.to_string() }),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::invalid_url("bad", json!({})).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("missing", json!({})).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::store_unavailable("down", json!({})).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_only_store_errors_are_retryable() {
        assert!(AppError::store_unavailable("down", json!({})).is_retryable());
        assert!(!AppError::invalid_url("bad", json!({})).is_retryable());
        assert!(!AppError::not_found("missing", json!({})).is_retryable());
    }

    #[test]
    fn test_display_uses_message() {
        let err = AppError::not_found("Shortened URL not found", json!({ "code": "abc" }));
        assert_eq!(err.to_string(), "Shortened URL not found");
        assert_eq!(err.code(), "not_found");
        assert_eq!(err.details()["code"], "abc");
    }

    #[test]
    fn test_pool_timeout_maps_to_store_unavailable() {
        let err = AppError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, AppError::StoreUnavailable { .. }));
    }
}
