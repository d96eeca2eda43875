//! Structured logging schema and field name constants for recall.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized names across every
//! subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events, operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-item iteration, high-volume data |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "db", "inference", "pipeline"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "openrouter", "pool", "generation_service"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "generate", "check_daily_limit", "save_drafts"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Opaque authenticated user identifier.
pub const USER_ID: &str = "user_id";

/// Deck UUID being operated on.
pub const DECK_ID: &str = "deck_id";

/// Generation-log entry UUID.
pub const LOG_ID: &str = "log_id";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of flashcards in a batch (requested, generated, or saved).
pub const CARD_COUNT: &str = "card_count";

/// Retry attempt number (1-based).
pub const ATTEMPT: &str = "attempt";

/// Upstream HTTP status code.
pub const STATUS_CODE: &str = "status_code";

/// Character length of a prompt sent to the gateway.
pub const PROMPT_LEN: &str = "prompt_len";

/// Character length of a model response.
pub const RESPONSE_LEN: &str = "response_len";
