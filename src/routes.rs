//! Top-level router configuration.
//!
//! # Route Structure
//!
//! See [`crate::api::routes::public_routes`].
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//!
//! Paths are not normalized: `/shorten/{*url}` carries a URL whose slashes are
//! significant.

use crate::api;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    api::routes::public_routes()
        .with_state(state)
        .layer(tracing::layer())
}
