//! Lookup-or-create registry for shortened URLs.

use std::sync::Arc;

use crate::application::services::CounterService;
use crate::domain::entities::NewUrlMapping;
use crate::domain::repositories::{CounterRepository, UrlMappingRepository};
use crate::error::AppError;
use crate::utils::base62;
use crate::utils::url_normalizer::normalize_url;
use serde_json::json;

/// Upper bound on counter values consumed by a single shortening request.
///
/// More than one is only needed when an allocated code is already taken, e.g.
/// by the bootstrap sentinel.
const MAX_ALLOCATION_ATTEMPTS: usize = 10;

/// Service mapping URLs to short codes.
///
/// Shortening is idempotent: every URL that normalizes to the same canonical
/// form receives the same code.
pub struct RegistryService<M, C>
where
    M: UrlMappingRepository + ?Sized,
    C: CounterRepository + ?Sized,
{
    mapping_repository: Arc<M>,
    counter: Arc<CounterService<C>>,
    sentinel: NewUrlMapping,
}

impl<M, C> RegistryService<M, C>
where
    M: UrlMappingRepository + ?Sized,
    C: CounterRepository + ?Sized,
{
    /// Creates a new registry.
    ///
    /// `sentinel` is the mapping written when the store is bootstrapped; its URL
    /// is expected to be already normalized.
    pub fn new(
        mapping_repository: Arc<M>,
        counter: Arc<CounterService<C>>,
        sentinel: NewUrlMapping,
    ) -> Self {
        Self {
            mapping_repository,
            counter,
            sentinel,
        }
    }

    /// Seeds an empty store with the sentinel mapping and the counter.
    ///
    /// Idempotent and safe to race: both writes are conditional creates.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store failures.
    pub async fn ensure_initialized(&self) -> Result<(), AppError> {
        if self.mapping_repository.is_empty().await? {
            self.mapping_repository
                .create_if_absent(self.sentinel.clone())
                .await?;
            self.counter.ensure_initialized().await?;
        }
        Ok(())
    }

    /// Returns the short code for `raw_url`, allocating one if needed.
    ///
    /// # Flow
    ///
    /// 1. Normalize the URL
    /// 2. Bootstrap the store if it is empty
    /// 3. Return the existing code for the normalized URL, if any
    /// 4. Otherwise allocate a counter value, encode it, and write the mapping
    ///
    /// If the write is rejected, the URL is looked up again: a concurrent request
    /// may have shortened it first, in which case its code wins. Otherwise the
    /// code was taken and another value is allocated.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`] if the URL cannot be normalized; the
    /// store is not touched in that case.
    ///
    /// Returns [`AppError::StoreUnavailable`] on store failures, or if no free
    /// code was found within the attempt budget.
    pub async fn shorten_or_get(&self, raw_url: &str) -> Result<String, AppError> {
        let url = normalize_url(raw_url)?;

        self.ensure_initialized().await?;

        if let Some(existing) = self.mapping_repository.find_by_url(&url).await? {
            return Ok(existing.code);
        }

        for _ in 0..MAX_ALLOCATION_ATTEMPTS {
            let id = self.counter.next().await?;
            let code = base62::encode(id);

            let created = self
                .mapping_repository
                .create_if_absent(NewUrlMapping::new(code.clone(), url.clone()))
                .await?;
            if created {
                return Ok(code);
            }

            if let Some(existing) = self.mapping_repository.find_by_url(&url).await? {
                return Ok(existing.code);
            }
        }

        Err(AppError::store_unavailable(
            "Failed to allocate a unique short code",
            json!({ "attempts": MAX_ALLOCATION_ATTEMPTS }),
        ))
    }

    /// Builds the shortened link returned to clients.
    ///
    /// The link carries no scheme: `<host>/redirect/<code>`.
    pub fn short_url(&self, host: &str, code: &str) -> String {
        format!("{}/redirect/{}", host.trim_end_matches('/'), code)
    }
}
