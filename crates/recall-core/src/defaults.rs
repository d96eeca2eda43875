//! Centralized default constants for the recall system.
//!
//! **This module is the single source of truth** for shared default values.
//! All crates reference these constants instead of defining their own magic
//! numbers.

// =============================================================================
// INPUT BOUNDS
// =============================================================================

/// Minimum source-text length (characters, after trimming).
pub const SOURCE_TEXT_MIN_CHARS: usize = 1000;

/// Maximum source-text length (characters, after trimming).
pub const SOURCE_TEXT_MAX_CHARS: usize = 10_000;

/// Minimum requested cards per generation run.
pub const MAX_CARDS_MIN: u32 = 1;

/// Maximum requested cards per generation run.
pub const MAX_CARDS_MAX: u32 = 50;

// =============================================================================
// CARD BOUNDS
// =============================================================================

/// Maximum characters on a card front.
pub const FRONT_MAX_CHARS: usize = 200;

/// Maximum characters on a card back.
pub const BACK_MAX_CHARS: usize = 500;

// =============================================================================
// SCHEDULING DEFAULTS
// =============================================================================

/// FSRS default ease factor assigned to every new draft.
pub const DEFAULT_EASE_FACTOR: f64 = 2.50;

/// Initial review interval in days for a new draft.
pub const INITIAL_INTERVAL_DAYS: i32 = 0;

// =============================================================================
// QUOTA
// =============================================================================

/// Maximum AI-generated cards per user per UTC calendar day.
pub const DAILY_CARD_LIMIT: i64 = 50;

// =============================================================================
// GATEWAY
// =============================================================================

/// Default generation model slug.
pub const GATEWAY_MODEL: &str = "google/gemini-2.0-flash-001";

/// Default gateway base URL (OpenRouter-compatible).
pub const GATEWAY_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Per-attempt HTTP timeout in seconds.
pub const GATEWAY_TIMEOUT_SECS: u64 = 30;

/// Total attempts per generation call (1 initial + 2 retries).
pub const GATEWAY_MAX_ATTEMPTS: u32 = 3;

/// Base backoff delay in seconds; doubles per retry (2s, 4s).
pub const RETRY_BASE_DELAY_SECS: u64 = 2;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default completion token budget.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Characters of raw model output retained in parse errors.
pub const PARSE_ERROR_SNIPPET_LEN: usize = 400;
