//! Flashcard repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};
use tracing::info;
use uuid::Uuid;

use recall_core::{
    defaults, new_v7, CandidateFlashcard, CardSource, CardStatus, Error, Flashcard,
    FlashcardRepository, Result,
};

/// PostgreSQL implementation of FlashcardRepository.
pub struct PgFlashcardRepository {
    pool: Pool<Postgres>,
}

impl PgFlashcardRepository {
    /// Create a new PgFlashcardRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FlashcardRepository for PgFlashcardRepository {
    async fn insert_drafts(
        &self,
        deck_id: Uuid,
        candidates: &[CandidateFlashcard],
    ) -> Result<Vec<Flashcard>> {
        if candidates.is_empty() {
            // An empty candidate set is a pipeline error, not a no-op save.
            return Err(Error::EmptyGeneration);
        }

        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        let now = Utc::now();
        let mut drafts = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let card = Flashcard {
                id: new_v7(),
                deck_id,
                front: candidate.front.clone(),
                back: candidate.back.clone(),
                status: CardStatus::Draft,
                source: CardSource::Ai,
                ease_factor: defaults::DEFAULT_EASE_FACTOR,
                interval_days: defaults::INITIAL_INTERVAL_DAYS,
                created_at_utc: now,
            };

            sqlx::query(
                "INSERT INTO flashcard \
                 (id, deck_id, front, back, status, source, ease_factor, interval_days, created_at_utc) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
            )
            .bind(card.id)
            .bind(card.deck_id)
            .bind(&card.front)
            .bind(&card.back)
            .bind(card.status.as_str())
            .bind(card.source.as_str())
            .bind(card.ease_factor)
            .bind(card.interval_days)
            .bind(card.created_at_utc)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;

            drafts.push(card);
        }

        // Any failure above dropped the transaction, rolling back every row.
        tx.commit().await.map_err(Error::Database)?;

        info!(
            subsystem = "db",
            component = "flashcards",
            op = "insert_drafts",
            deck_id = %deck_id,
            card_count = drafts.len(),
            "Inserted draft flashcards"
        );

        Ok(drafts)
    }
}
