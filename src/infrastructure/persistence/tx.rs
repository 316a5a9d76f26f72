//! Timeouts and optimistic-concurrency retries shared by the store backends.

use std::future::Future;
use std::time::Duration;

use serde_json::json;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::debug;

use crate::error::AppError;

/// Outcome of a single transaction attempt.
#[derive(Debug, thiserror::Error)]
pub enum TxError {
    /// A concurrent writer committed first; the attempt may be retried.
    #[error("transaction conflict")]
    Conflict,

    /// The attempt exceeded the operation timeout.
    #[error("store operation timed out")]
    Timeout,

    /// Any other failure; not retried.
    #[error(transparent)]
    Store(#[from] AppError),
}

impl TxError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict)
    }
}

impl From<TxError> for AppError {
    fn from(e: TxError) -> Self {
        match e {
            TxError::Conflict => {
                AppError::store_unavailable("Transaction retries exhausted", json!({}))
            }
            TxError::Timeout => AppError::store_unavailable("Store operation timed out", json!({})),
            TxError::Store(inner) => inner,
        }
    }
}

impl From<sqlx::Error> for TxError {
    fn from(e: sqlx::Error) -> Self {
        // 40001 serialization_failure, 40P01 deadlock_detected
        let is_conflict = e
            .as_database_error()
            .and_then(|db| db.code())
            .is_some_and(|code| code == "40001" || code == "40P01");

        if is_conflict {
            TxError::Conflict
        } else {
            TxError::Store(e.into())
        }
    }
}

/// Timeout and retry budget applied to every store call.
#[derive(Debug, Clone)]
pub struct TxPolicy {
    /// Deadline for a single store operation or transaction attempt.
    pub op_timeout: Duration,
    /// Retries after the first attempt of a conflicting transaction.
    pub max_retries: usize,
    /// Base delay of the exponential backoff between retries.
    pub retry_base_delay: Duration,
    /// Upper bound on a single backoff delay.
    pub retry_max_delay: Duration,
}

impl Default for TxPolicy {
    fn default() -> Self {
        Self {
            op_timeout: Duration::from_secs(5),
            max_retries: 8,
            retry_base_delay: Duration::from_millis(10),
            retry_max_delay: Duration::from_millis(500),
        }
    }
}

impl TxPolicy {
    /// Jittered exponential backoff: `base * 2^n`, capped, `max_retries` long.
    fn backoff(&self) -> impl Iterator<Item = Duration> + use<> {
        let factor = self.retry_base_delay.as_millis().max(1) as u64;
        ExponentialBackoff::from_millis(2)
            .factor(factor)
            .max_delay(self.retry_max_delay)
            .map(jitter)
            .take(self.max_retries)
    }
}

/// Runs `attempt` until it commits, retrying on [`TxError::Conflict`].
///
/// Each attempt is bounded by [`TxPolicy::op_timeout`]. Timeouts and other
/// failures are not retried.
///
/// # Errors
///
/// Returns [`AppError::StoreUnavailable`] when retries are exhausted or an
/// attempt times out, or the attempt's own error otherwise.
pub async fn run_transaction<T, F, Fut>(policy: &TxPolicy, mut attempt: F) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, TxError>>,
{
    let op_timeout = policy.op_timeout;

    let action = || {
        let fut = attempt();
        async move {
            tokio::time::timeout(op_timeout, fut)
                .await
                .unwrap_or(Err(TxError::Timeout))
        }
    };

    let should_retry = |e: &TxError| {
        let retry = e.is_conflict();
        if retry {
            debug!("Transaction conflict, retrying");
        }
        retry
    };

    RetryIf::spawn(policy.backoff(), action, should_retry)
        .await
        .map_err(AppError::from)
}

/// Bounds a single non-transactional store call by the policy timeout.
///
/// # Errors
///
/// Returns [`AppError::StoreUnavailable`] on timeout, or the call's own error.
pub async fn with_timeout<T, E, F>(policy: &TxPolicy, fut: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, E>>,
    E: Into<AppError>,
{
    match tokio::time::timeout(policy.op_timeout, fut).await {
        Ok(result) => result.map_err(Into::into),
        Err(_) => Err(TxError::Timeout.into()),
    }
}
