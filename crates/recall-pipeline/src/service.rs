//! Generation orchestration.
//!
//! Sequences quota enforcement, deck authorization, gateway generation, and
//! persistence into one fail-fast pipeline. Each step runs only if every
//! prior step succeeded; in particular the gateway is never called once the
//! quota or ownership check has failed, because the external call is the
//! expensive part of the pipeline.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Duration, NaiveTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use recall_core::{
    defaults, CandidateFlashcard, CardGenerator, Clock, DeckRepository, Error, Flashcard,
    FlashcardRepository, GenerationLogRepository, GenerationResult, Result, SystemClock,
};

/// Orchestrates one generation run end to end.
///
/// Stateless aside from the injected collaborators, so a single instance is
/// safe to share across concurrent requests. The daily-quota check is a
/// snapshot read, not an isolated counter: two concurrent requests from the
/// same user near the limit can overshoot it by at most one request's worth
/// of cards, which is accepted.
pub struct GenerationService {
    decks: Arc<dyn DeckRepository>,
    flashcards: Arc<dyn FlashcardRepository>,
    generation_log: Arc<dyn GenerationLogRepository>,
    generator: Arc<dyn CardGenerator>,
    clock: Arc<dyn Clock>,
    daily_limit: i64,
}

impl GenerationService {
    /// Create a service with the system clock and the default daily limit.
    pub fn new(
        decks: Arc<dyn DeckRepository>,
        flashcards: Arc<dyn FlashcardRepository>,
        generation_log: Arc<dyn GenerationLogRepository>,
        generator: Arc<dyn CardGenerator>,
    ) -> Self {
        Self {
            decks,
            flashcards,
            generation_log,
            generator,
            clock: Arc::new(SystemClock),
            daily_limit: defaults::DAILY_CARD_LIMIT,
        }
    }

    /// Replace the time source (tests pin this to exercise day boundaries).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Override the daily card limit.
    pub fn with_daily_limit(mut self, limit: i64) -> Self {
        self.daily_limit = limit;
        self
    }

    /// Enforce the rolling daily quota for `user_id`.
    ///
    /// The window is the current UTC calendar day `[today 00:00, tomorrow
    /// 00:00)`. A storage failure here propagates rather than being treated
    /// as "under quota": the check fails closed.
    pub async fn check_daily_limit(&self, user_id: &str) -> Result<()> {
        let now = self.clock.now();
        let today_start = utc_day_start(now);
        let reset_at = today_start + Duration::days(1);

        let used_today = self
            .generation_log
            .sum_cards_between(user_id, today_start, reset_at)
            .await?;

        debug!(
            subsystem = "pipeline",
            component = "generation_service",
            op = "check_daily_limit",
            user_id = %user_id,
            card_count = used_today,
            limit = self.daily_limit,
            "Daily quota snapshot"
        );

        if used_today >= self.daily_limit {
            return Err(Error::QuotaExceeded {
                limit: self.daily_limit,
                used_today,
                reset_at,
            });
        }
        Ok(())
    }

    /// Verify that `deck_id` exists and belongs to `user_id`.
    ///
    /// A nonexistent deck and someone else's deck yield the identical
    /// error, so deck existence is never revealed to a non-owner.
    pub async fn verify_ownership(&self, user_id: &str, deck_id: Uuid) -> Result<()> {
        match self.decks.find_owned(deck_id, user_id).await? {
            Some(_) => Ok(()),
            None => Err(Error::DeckNotFound(deck_id)),
        }
    }

    /// Persist accepted candidates as drafts, then append the usage-log
    /// entry.
    ///
    /// The draft insert is all-or-nothing. The log insert is deliberately
    /// non-fatal: once the drafts exist, losing one quota-accounting entry
    /// is preferred over rolling back user-visible work, so its failure is
    /// swallowed and reported as a `None` log id.
    pub async fn save_drafts(
        &self,
        user_id: &str,
        deck_id: Uuid,
        candidates: &[CandidateFlashcard],
    ) -> Result<(Vec<Flashcard>, Option<Uuid>)> {
        let drafts = self.flashcards.insert_drafts(deck_id, candidates).await?;

        let log_id = match self
            .generation_log
            .insert(user_id, drafts.len() as i64)
            .await
        {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(
                    subsystem = "pipeline",
                    component = "generation_service",
                    op = "save_drafts",
                    user_id = %user_id,
                    deck_id = %deck_id,
                    error = %e,
                    "Generation log insert failed; drafts kept, quota may undercount"
                );
                None
            }
        };

        Ok((drafts, log_id))
    }

    /// Run the full pipeline: quota → ownership → generate → persist.
    ///
    /// The first failing step's error propagates unchanged and no later
    /// step executes.
    pub async fn generate_and_save(
        &self,
        user_id: &str,
        deck_id: Uuid,
        source_text: &str,
        max_cards: u32,
    ) -> Result<GenerationResult> {
        let started = Instant::now();

        self.check_daily_limit(user_id).await?;
        self.verify_ownership(user_id, deck_id).await?;

        let candidates = self.generator.generate(source_text, max_cards).await?;
        // The client already rejects an empty batch; this re-check keeps
        // the guarantee structural rather than an implementation detail of
        // one generator.
        if candidates.is_empty() {
            return Err(Error::EmptyGeneration);
        }

        let (drafts, log_id) = self.save_drafts(user_id, deck_id, &candidates).await?;

        info!(
            subsystem = "pipeline",
            component = "generation_service",
            op = "generate_and_save",
            user_id = %user_id,
            deck_id = %deck_id,
            card_count = drafts.len(),
            log_id = ?log_id,
            duration_ms = started.elapsed().as_millis() as u64,
            "Generation run complete"
        );

        Ok(GenerationResult {
            log_id,
            deck_id,
            cards_generated: drafts.len(),
            drafts,
        })
    }
}

/// Start of the UTC calendar day containing `instant`.
pub fn utc_day_start(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.date_naive().and_time(NaiveTime::MIN).and_utc()
}
