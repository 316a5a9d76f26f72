//! Handlers for the shortening page and endpoint.

use axum::{
    Json,
    extract::{OriginalUri, RawQuery, State},
    http::HeaderMap,
    response::Html,
};
use tracing::{error, warn};

use crate::api::dto::shorten::ShortenResponse;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::public_host::resolve_public_host;

const INDEX_PAGE: &str = include_str!("../../../static/index.html");
const SHORTEN_PREFIX: &str = "/shorten/";

/// Serves the static shortening page.
///
/// # Endpoints
///
/// `GET /`, `GET /shorten`, `GET /shorten/`
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

/// Shortens the URL carried in the request path.
///
/// # Endpoint
///
/// `GET /shorten/{*url}`
///
/// Everything after `/shorten/` is the URL, taken from the raw request path so
/// percent-escapes such as `%2F` survive. A query string on the request is
/// re-attached to it, so `/shorten/foo.com/search?q=rust` shortens
/// `foo.com/search?q=rust`.
///
/// # Response
///
/// ```json
/// { "shortenedUrl": "sho.rt/redirect/67f" }
/// ```
///
/// # Errors
///
/// - 400 `{"error": ...}` for an invalid URL or a missing `Host` header
/// - 500 `{"error": ...}` on store failures
pub async fn shorten_handler(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Result<Json<ShortenResponse>, AppError> {
    let url = uri.path().strip_prefix(SHORTEN_PREFIX).unwrap_or_default();
    let raw_url = match query.as_deref() {
        Some(query) if !query.is_empty() => format!("{url}?{query}"),
        _ => url.to_string(),
    };

    let result = shorten(&state, &raw_url, &headers).await;

    if let Err(e) = &result {
        if e.is_retryable() {
            error!(url = %raw_url, kind = e.code(), error = %e, details = %e.details(), "Failed to shorten URL");
        } else {
            warn!(url = %raw_url, kind = e.code(), error = %e, "Rejected shorten request");
        }
    }

    result.map(Json)
}

async fn shorten(
    state: &AppState,
    raw_url: &str,
    headers: &HeaderMap,
) -> Result<ShortenResponse, AppError> {
    let host = resolve_public_host(state.public_host.as_deref(), headers)?;
    let code = state.registry.shorten_or_get(raw_url).await?;

    Ok(ShortenResponse {
        shortened_url: state.registry.short_url(&host, &code),
    })
}
