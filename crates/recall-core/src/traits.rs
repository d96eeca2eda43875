//! Core traits for recall abstractions.
//!
//! These traits define the seams between the orchestrator and its
//! collaborators (storage, LLM gateway), enabling pluggable backends and
//! deterministic tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{CandidateFlashcard, Deck, Flashcard};

// =============================================================================
// STORAGE TRAITS
// =============================================================================

/// Read-only view of decks, scoped to ownership checks.
#[async_trait]
pub trait DeckRepository: Send + Sync {
    /// Fetch a deck only if it exists AND belongs to the given user.
    ///
    /// Returns `None` for both "no such deck" and "not the owner"; the
    /// caller must not distinguish the two.
    async fn find_owned(&self, deck_id: Uuid, owner_user_id: &str) -> Result<Option<Deck>>;
}

/// Write access for persisting generated drafts.
#[async_trait]
pub trait FlashcardRepository: Send + Sync {
    /// Insert one draft per candidate in a single transaction.
    ///
    /// All-or-nothing: on any failure no rows are persisted and the error
    /// propagates. Every inserted row carries the fixed draft defaults
    /// (`status=draft`, `source=ai`, FSRS ease factor, zero interval).
    async fn insert_drafts(
        &self,
        deck_id: Uuid,
        candidates: &[CandidateFlashcard],
    ) -> Result<Vec<Flashcard>>;
}

/// Append-only usage log backing the daily quota.
#[async_trait]
pub trait GenerationLogRepository: Send + Sync {
    /// Record one generation run. Returns the new entry's id.
    async fn insert(&self, user_id: &str, cards_count: i64) -> Result<Uuid>;

    /// Sum of `cards_count` for a user within `[from, to)`.
    async fn sum_cards_between(
        &self,
        user_id: &str,
        from_inclusive: DateTime<Utc>,
        to_exclusive: DateTime<Utc>,
    ) -> Result<i64>;
}

// =============================================================================
// GENERATION TRAIT
// =============================================================================

/// The seam between the orchestrator and the LLM gateway client.
///
/// Implementations own prompt construction, sanitization, retries, and
/// defensive parsing; callers see only validated candidates or a typed
/// error. No partial results accompany an error.
#[async_trait]
pub trait CardGenerator: Send + Sync {
    /// Turn source text into at most `max_cards` validated candidates.
    async fn generate(&self, text: &str, max_cards: u32) -> Result<Vec<CandidateFlashcard>>;
}
