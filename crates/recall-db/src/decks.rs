//! Deck repository implementation.
//!
//! The generation pipeline only reads decks, and only to verify ownership.

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};
use tracing::debug;
use uuid::Uuid;

use recall_core::{Deck, DeckRepository, Error, Result};

/// PostgreSQL implementation of DeckRepository.
pub struct PgDeckRepository {
    pool: Pool<Postgres>,
}

impl PgDeckRepository {
    /// Create a new PgDeckRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeckRepository for PgDeckRepository {
    async fn find_owned(&self, deck_id: Uuid, owner_user_id: &str) -> Result<Option<Deck>> {
        // Filtering by both id and owner in one query means a missing row
        // says nothing about whether the deck exists at all.
        let row = sqlx::query(
            "SELECT id, owner_user_id FROM deck WHERE id = $1 AND owner_user_id = $2",
        )
        .bind(deck_id)
        .bind(owner_user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            component = "decks",
            op = "find_owned",
            deck_id = %deck_id,
            found = row.is_some(),
            "Deck ownership lookup"
        );

        Ok(row.map(|r| Deck {
            id: r.get("id"),
            owner_user_id: r.get("owner_user_id"),
        }))
    }
}
