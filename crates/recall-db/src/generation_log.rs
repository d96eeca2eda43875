//! Generation usage-log repository implementation.
//!
//! The log is append-only; this core never updates or deletes entries. Its
//! only consumer is the daily quota computation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};
use tracing::debug;
use uuid::Uuid;

use recall_core::{new_v7, Error, GenerationLogRepository, Result};

/// PostgreSQL implementation of GenerationLogRepository.
pub struct PgGenerationLogRepository {
    pool: Pool<Postgres>,
}

impl PgGenerationLogRepository {
    /// Create a new PgGenerationLogRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GenerationLogRepository for PgGenerationLogRepository {
    async fn insert(&self, user_id: &str, cards_count: i64) -> Result<Uuid> {
        let id = new_v7();
        sqlx::query(
            "INSERT INTO generation_log (id, user_id, generated_at, cards_count) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(id)
        .bind(user_id)
        .bind(Utc::now())
        .bind(cards_count)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(id)
    }

    async fn sum_cards_between(
        &self,
        user_id: &str,
        from_inclusive: DateTime<Utc>,
        to_exclusive: DateTime<Utc>,
    ) -> Result<i64> {
        let sum: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(cards_count), 0)::BIGINT FROM generation_log \
             WHERE user_id = $1 AND generated_at >= $2 AND generated_at < $3",
        )
        .bind(user_id)
        .bind(from_inclusive)
        .bind(to_exclusive)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            component = "generation_log",
            op = "sum_cards_between",
            user_id = %user_id,
            card_count = sum,
            "Summed generation log window"
        );

        Ok(sum)
    }
}
