//! Repository trait for short code mappings.

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::error::AppError;
use async_trait::async_trait;

/// Store access for [`UrlMapping`] records.
///
/// Mappings are write-once, so the trait offers no update or delete.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlMappingRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryStore`] - in-process store
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_pg.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlMappingRepository: Send + Sync {
    /// Finds a mapping by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store failures or timeouts.
    async fn find_by_code(&self, code: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Finds the mapping whose URL equals `url` exactly.
    ///
    /// Used to return the existing code when a URL is shortened again.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store failures or timeouts.
    async fn find_by_url(&self, url: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Writes a mapping unless its code or its URL is already present.
    ///
    /// Returns `Ok(true)` if the mapping was written, `Ok(false)` if either
    /// key was taken. Existing mappings are never modified.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store failures or timeouts.
    async fn create_if_absent(&self, mapping: NewUrlMapping) -> Result<bool, AppError>;

    /// Returns true if no mapping has ever been written.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store failures or timeouts.
    async fn is_empty(&self) -> Result<bool, AppError>;

    /// Counts stored mappings.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store failures or timeouts.
    async fn count(&self) -> Result<u64, AppError>;
}
