//! Short code resolution for redirects.

use std::sync::Arc;

use crate::domain::repositories::UrlMappingRepository;
use crate::error::AppError;
use crate::utils::url_normalizer::normalize_url;
use serde_json::json;

/// Resolves short codes to the URL a client should be redirected to.
pub struct RedirectService<M: UrlMappingRepository + ?Sized> {
    mapping_repository: Arc<M>,
}

impl<M: UrlMappingRepository + ?Sized> RedirectService<M> {
    /// Creates a new redirect service.
    pub fn new(mapping_repository: Arc<M>) -> Self {
        Self { mapping_repository }
    }

    /// Looks up `code` and returns its URL in canonical form.
    ///
    /// The stored URL is normalized again before it is returned, so mappings
    /// written before a rule change are served in the current form.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping exists for `code`.
    /// Returns [`AppError::InvalidUrl`] if the stored URL no longer normalizes.
    /// Returns [`AppError::StoreUnavailable`] on store failures.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let mapping = self
            .mapping_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Shortened URL not found", json!({ "code": code })))?;

        normalize_url(&mapping.url)
    }
}
