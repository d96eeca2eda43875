//! Core data models for recall.
//!
//! These types are shared across all recall crates and represent the
//! domain entities of the flashcard-generation pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::defaults;
use crate::error::{Error, Result};

// =============================================================================
// DECK
// =============================================================================

/// A flashcard deck. The generation pipeline reads only the two fields it
/// needs for the ownership check; deck CRUD lives elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    pub id: Uuid,
    pub owner_user_id: String,
}

// =============================================================================
// CARD STATUS / SOURCE
// =============================================================================

/// Lifecycle status of a flashcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    /// Awaiting human accept/edit/reject; not yet studyable.
    Draft,
    /// Accepted and in the study rotation.
    Active,
    /// Temporarily out of the study rotation.
    Suspended,
}

impl CardStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardStatus::Draft => "draft",
            CardStatus::Active => "active",
            CardStatus::Suspended => "suspended",
        }
    }
}

impl std::str::FromStr for CardStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "draft" => Ok(CardStatus::Draft),
            "active" => Ok(CardStatus::Active),
            "suspended" => Ok(CardStatus::Suspended),
            other => Err(Error::Internal(format!("unknown card status: {}", other))),
        }
    }
}

/// Provenance of a flashcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardSource {
    /// Produced by the generation pipeline.
    Ai,
    /// Authored by hand.
    Manual,
}

impl CardSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardSource::Ai => "ai",
            CardSource::Manual => "manual",
        }
    }
}

impl std::str::FromStr for CardSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ai" => Ok(CardSource::Ai),
            "manual" => Ok(CardSource::Manual),
            other => Err(Error::Internal(format!("unknown card source: {}", other))),
        }
    }
}

// =============================================================================
// CANDIDATES & FLASHCARDS
// =============================================================================

/// An unpersisted front/back pair produced by the generation client,
/// prior to acceptance/persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFlashcard {
    pub front: String,
    pub back: String,
}

impl CandidateFlashcard {
    /// Whether both sides are non-empty after trimming and within their
    /// length bounds. Violations are grounds for discarding the candidate,
    /// never for truncating it.
    pub fn is_valid(&self) -> bool {
        let front = self.front.trim();
        let back = self.back.trim();
        !front.is_empty()
            && !back.is_empty()
            && front.chars().count() <= defaults::FRONT_MAX_CHARS
            && back.chars().count() <= defaults::BACK_MAX_CHARS
    }

    /// Trimmed copy of this candidate.
    pub fn trimmed(&self) -> Self {
        Self {
            front: self.front.trim().to_string(),
            back: self.back.trim().to_string(),
        }
    }
}

/// A persisted flashcard.
///
/// The generation pipeline only ever creates these as drafts
/// (`status=draft`, `source=ai`) with the FSRS defaults; accept/edit/reject
/// transitions belong to collaborators outside this workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: Uuid,
    pub deck_id: Uuid,
    pub front: String,
    pub back: String,
    pub status: CardStatus,
    pub source: CardSource,
    pub ease_factor: f64,
    pub interval_days: i32,
    pub created_at_utc: DateTime<Utc>,
}

// =============================================================================
// GENERATION INPUT / RESULT
// =============================================================================

/// Shared input validation for generation: text length and card ceiling.
///
/// Length bounds apply to the trimmed text, counted in characters.
pub fn validate_generation_input(source_text: &str, max_cards: u32) -> Result<()> {
    let len = source_text.trim().chars().count();
    if len < defaults::SOURCE_TEXT_MIN_CHARS {
        return Err(Error::Validation(format!(
            "Source text must be at least {} characters ({} given)",
            defaults::SOURCE_TEXT_MIN_CHARS,
            len
        )));
    }
    if len > defaults::SOURCE_TEXT_MAX_CHARS {
        return Err(Error::Validation(format!(
            "Source text must be at most {} characters ({} given)",
            defaults::SOURCE_TEXT_MAX_CHARS,
            len
        )));
    }
    if !(defaults::MAX_CARDS_MIN..=defaults::MAX_CARDS_MAX).contains(&max_cards) {
        return Err(Error::Validation(format!(
            "Card count must be between {} and {} ({} given)",
            defaults::MAX_CARDS_MIN,
            defaults::MAX_CARDS_MAX,
            max_cards
        )));
    }
    Ok(())
}

/// Outcome of a successful `generate_and_save` run.
///
/// `log_id` is `None` when the drafts were saved but the usage-log insert
/// failed; quota accounting may undercount that one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub log_id: Option<Uuid>,
    pub deck_id: Uuid,
    pub drafts: Vec<Flashcard>,
    pub cards_generated: usize,
}
