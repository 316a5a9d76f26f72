//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "store": { "status": "ok", "message": "Connected, 3 mappings" },
///     "counter": { "status": "ok", "message": "Current value: 23514" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store_check = check_store(&state).await;
    let counter_check = check_counter(&state).await;

    let all_healthy = store_check.is_ok() && counter_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            store: store_check,
            counter: counter_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks store connectivity by counting mappings.
async fn check_store(state: &AppState) -> CheckStatus {
    match state.mappings.count().await {
        Ok(count) => CheckStatus::ok(format!("Connected, {count} mappings")),
        Err(e) => CheckStatus::error(format!("Store error: {e}")),
    }
}

/// Reports the counter; a missing counter is fine before the first allocation.
async fn check_counter(state: &AppState) -> CheckStatus {
    match state.counter.current().await {
        Ok(Some(value)) => CheckStatus::ok(format!("Current value: {value}")),
        Ok(None) => CheckStatus::ok("Not initialized"),
        Err(e) => CheckStatus::error(format!("Counter error: {e}")),
    }
}
