//! Repository trait for the global counter.

use crate::domain::entities::CounterRecord;
use crate::error::AppError;
use async_trait::async_trait;

/// Store access for the singleton [`CounterRecord`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCounterRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryStore`] - in-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CounterRepository: Send + Sync {
    /// Reads the counter outside any transaction.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store failures or timeouts.
    async fn get(&self) -> Result<Option<CounterRecord>, AppError>;

    /// Creates the counter with `seed` unless it already exists.
    ///
    /// Returns `Ok(true)` if this call created it, `Ok(false)` if it was
    /// already present. An existing counter is never overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store failures or timeouts.
    async fn create_if_absent(&self, seed: u64) -> Result<bool, AppError>;

    /// Atomically increments the counter and returns the new value.
    ///
    /// Runs a read-modify-write in an isolated transaction. Conflicts with
    /// concurrent writers are retried inside the store layer; callers only see
    /// the final outcome.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] if the counter does not exist,
    /// retries are exhausted, or the store fails or times out.
    async fn increment(&self) -> Result<u64, AppError>;
}
