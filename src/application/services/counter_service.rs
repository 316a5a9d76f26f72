//! Global counter service.

use std::sync::Arc;

use crate::domain::repositories::CounterRepository;
use crate::error::AppError;

/// Default starting value of the counter.
///
/// The first allocated code is the encoding of `DEFAULT_COUNTER_SEED + 1`.
pub const DEFAULT_COUNTER_SEED: u64 = 23_512;

/// Hands out strictly increasing, globally unique integers.
///
/// The value lives only in the store; every call goes through the repository's
/// transactional increment, so any number of service instances can share one
/// counter.
pub struct CounterService<C: CounterRepository + ?Sized> {
    repository: Arc<C>,
    seed: u64,
}

impl<C: CounterRepository + ?Sized> CounterService<C> {
    /// Creates a new counter service.
    pub fn new(repository: Arc<C>, seed: u64) -> Self {
        Self { repository, seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Makes sure the counter document exists, seeding it if absent.
    ///
    /// Idempotent. The read-then-create is not atomic, but the create is
    /// conditional, so racing callers never overwrite an advanced counter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store failures.
    pub async fn ensure_initialized(&self) -> Result<(), AppError> {
        if self.repository.get().await?.is_none() {
            self.repository.create_if_absent(self.seed).await?;
        }
        Ok(())
    }

    /// Allocates the next value.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] if the store fails or the
    /// increment transaction cannot be committed within the retry budget.
    pub async fn next(&self) -> Result<u64, AppError> {
        self.ensure_initialized().await?;
        self.repository.increment().await
    }

    /// Returns the last allocated value without allocating, if the counter exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store failures.
    pub async fn current(&self) -> Result<Option<u64>, AppError> {
        Ok(self.repository.get().await?.map(|record| record.count))
    }
}
