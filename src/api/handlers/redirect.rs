//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

use crate::error::AppError;
use crate::state::AppState;

/// Body of the 404 response for unknown codes.
pub const NOT_FOUND_MESSAGE: &str = "Shortened URL not found";

/// Redirects a short code to its URL.
///
/// # Endpoint
///
/// `GET /redirect/{code}`
///
/// # Responses
///
/// - **301 Moved Permanently** with `Location` set to the canonical URL
/// - **404 Not Found**, plain text, if the code is unknown
/// - **500 Internal Server Error**, plain text, on any other failure
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Response {
    match state.resolver.resolve(&code).await {
        Ok(url) => (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, url)]).into_response(),
        Err(AppError::NotFound { .. }) => {
            debug!(code = %code, "Unknown short code");
            (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE).into_response()
        }
        Err(e) => {
            error!(code = %code, kind = e.code(), error = %e, details = %e.details(), "Failed to resolve short code");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
