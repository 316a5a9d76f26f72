//! API route configuration.

use crate::api::handlers::{health_handler, index_handler, redirect_handler, shorten_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// All public routes.
///
/// # Endpoints
///
/// - `GET /`                 - Shortening page
/// - `GET /shorten`          - Shortening page
/// - `GET /shorten/{*url}`   - Shorten the URL in the path remainder
/// - `GET /redirect/{code}`  - 301 redirect to the stored URL
/// - `GET /health`           - Store and counter checks
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/shorten", get(index_handler))
        .route("/shorten/", get(index_handler))
        .route("/shorten/{*url}", get(shorten_handler))
        .route("/redirect/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
}
