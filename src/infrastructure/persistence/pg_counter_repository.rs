//! PostgreSQL implementation of the counter repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use super::tx::{TxError, TxPolicy, run_transaction, with_timeout};
use crate::domain::entities::{CounterRecord, GLOBAL_COUNTER_KEY};
use crate::domain::repositories::CounterRepository;
use crate::error::AppError;

/// PostgreSQL repository for the global counter.
///
/// Increments run in `SERIALIZABLE` transactions; serialization failures are
/// retried according to the [`TxPolicy`].
pub struct PgCounterRepository {
    pool: Arc<PgPool>,
    policy: TxPolicy,
}

impl PgCounterRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>, policy: TxPolicy) -> Self {
        Self { pool, policy }
    }

    /// One read-modify-write attempt.
    async fn try_increment(&self) -> Result<u64, TxError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await?;

        let current: Option<i64> = sqlx::query_scalar("SELECT count FROM counter WHERE id = $1")
            .bind(GLOBAL_COUNTER_KEY)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(current) = current else {
            return Err(AppError::store_unavailable(
                "Counter record missing",
                json!({ "id": GLOBAL_COUNTER_KEY }),
            )
            .into());
        };

        let next = current.checked_add(1).ok_or_else(|| {
            AppError::store_unavailable("Counter overflow", json!({ "count": current }))
        })?;

        sqlx::query("UPDATE counter SET count = $2 WHERE id = $1")
            .bind(GLOBAL_COUNTER_KEY)
            .bind(next)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(to_count(next)?)
    }
}

#[async_trait]
impl CounterRepository for PgCounterRepository {
    async fn get(&self) -> Result<Option<CounterRecord>, AppError> {
        let row: Option<i64> = with_timeout(
            &self.policy,
            sqlx::query_scalar("SELECT count FROM counter WHERE id = $1")
                .bind(GLOBAL_COUNTER_KEY)
                .fetch_optional(self.pool.as_ref()),
        )
        .await?;

        row.map(|count| to_count(count).map(CounterRecord::new))
            .transpose()
    }

    async fn create_if_absent(&self, seed: u64) -> Result<bool, AppError> {
        let seed = i64::try_from(seed).map_err(|_| {
            AppError::invalid_argument("Counter seed out of range", json!({ "seed": seed }))
        })?;

        let result = with_timeout(
            &self.policy,
            sqlx::query(
                r#"
                INSERT INTO counter (id, count)
                VALUES ($1, $2)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(GLOBAL_COUNTER_KEY)
            .bind(seed)
            .execute(self.pool.as_ref()),
        )
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn increment(&self) -> Result<u64, AppError> {
        run_transaction(&self.policy, || self.try_increment()).await
    }
}

fn to_count(value: i64) -> Result<u64, AppError> {
    u64::try_from(value)
        .map_err(|_| AppError::store_unavailable("Corrupt counter value", json!({ "count": value })))
}
