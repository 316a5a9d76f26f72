//! PostgreSQL implementation of the mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use super::tx::{TxPolicy, with_timeout};
use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::UrlMappingRepository;
use crate::error::AppError;

type MappingRow = (String, String, DateTime<Utc>);

/// PostgreSQL repository for short code mappings.
///
/// The table is keyed by code; a unique index on `md5(url)` backs the reverse
/// lookup and keeps one mapping per canonical URL.
pub struct PgUrlMappingRepository {
    pool: Arc<PgPool>,
    policy: TxPolicy,
}

impl PgUrlMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>, policy: TxPolicy) -> Self {
        Self { pool, policy }
    }
}

fn into_mapping((code, url, created_at): MappingRow) -> UrlMapping {
    UrlMapping::new(code, url, created_at)
}

#[async_trait]
impl UrlMappingRepository for PgUrlMappingRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<UrlMapping>, AppError> {
        let row = with_timeout(
            &self.policy,
            sqlx::query_as::<_, MappingRow>(
                r#"
                SELECT id, url, created_at
                FROM "shortened-urls"
                WHERE id = $1
                "#,
            )
            .bind(code)
            .fetch_optional(self.pool.as_ref()),
        )
        .await?;

        Ok(row.map(into_mapping))
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<UrlMapping>, AppError> {
        let row = with_timeout(
            &self.policy,
            sqlx::query_as::<_, MappingRow>(
                r#"
                SELECT id, url, created_at
                FROM "shortened-urls"
                WHERE md5(url) = md5($1) AND url = $1
                LIMIT 1
                "#,
            )
            .bind(url)
            .fetch_optional(self.pool.as_ref()),
        )
        .await?;

        Ok(row.map(into_mapping))
    }

    async fn create_if_absent(&self, mapping: NewUrlMapping) -> Result<bool, AppError> {
        let result = with_timeout(
            &self.policy,
            sqlx::query(
                r#"
                INSERT INTO "shortened-urls" (id, url)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(&mapping.code)
            .bind(&mapping.url)
            .execute(self.pool.as_ref()),
        )
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn is_empty(&self) -> Result<bool, AppError> {
        let exists: bool = with_timeout(
            &self.policy,
            sqlx::query_scalar(r#"SELECT EXISTS (SELECT 1 FROM "shortened-urls")"#)
                .fetch_one(self.pool.as_ref()),
        )
        .await?;

        Ok(!exists)
    }

    async fn count(&self) -> Result<u64, AppError> {
        let count: i64 = with_timeout(
            &self.policy,
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM "shortened-urls""#)
                .fetch_one(self.pool.as_ref()),
        )
        .await?;

        Ok(count.max(0) as u64)
    }
}
