//! Error types for the recall generation pipeline.

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Result type alias using recall's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for recall operations.
///
/// Callers branch on the variant (or on [`Error::code`]), never on message
/// text. Variants that wrap upstream detail (`Gateway`, `Parse`) retain it
/// for logging only; [`Error::user_message`] is the string that may be
/// forwarded to end users.
#[derive(Error, Debug)]
pub enum Error {
    /// Caller-supplied input out of bounds (text length, card count).
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Construction-time misconfiguration (API key, temperature, token budget).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Daily generation limit reached for this user.
    #[error("Daily generation limit of {limit} cards reached ({used_today} used); resets at {reset_at}")]
    QuotaExceeded {
        limit: i64,
        used_today: i64,
        reset_at: DateTime<Utc>,
    },

    /// Deck absent or owned by someone else; the two are indistinguishable
    /// so deck existence is never revealed to a non-owner.
    #[error("Deck not found: {0}")]
    DeckNotFound(Uuid),

    /// Upstream gateway HTTP failure (non-retryable 4xx, or 5xx after
    /// exhausting retries). Body is retained for diagnostics only.
    #[error("Gateway error: HTTP {status}")]
    Gateway { status: u16, body: String },

    /// Gateway responded 2xx but the content was unusable. The raw content
    /// is truncated for diagnostics and never shown to users.
    #[error("Unusable gateway response: {raw}")]
    Parse { raw: String },

    /// The model produced zero usable flashcards.
    #[error("Generation produced no flashcards")]
    EmptyGeneration,

    /// Database operation failed (wraps sqlx::Error).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// HTTP/network request failed before an HTTP status was available.
    #[error("Request error: {0}")]
    Request(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Stable machine-readable code for protocol-level rendering.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Validation(_) => "invalid_input",
            Error::Config(_) => "config_error",
            Error::QuotaExceeded { .. } => "quota_exceeded",
            Error::DeckNotFound(_) => "deck_not_found",
            Error::Gateway { .. } => "ai_service_unavailable",
            Error::Parse { .. } | Error::EmptyGeneration => "generation_failed",
            Error::Database(_) => "storage_error",
            Error::Serialization(_) => "serialization_error",
            Error::Request(_) => "request_error",
            Error::Internal(_) => "internal_error",
        }
    }

    /// Short human-readable message safe to forward to end users.
    ///
    /// Upstream bodies, raw model output, and database detail are withheld.
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(msg) => msg.clone(),
            Error::Config(_) => "Service misconfigured".to_string(),
            Error::QuotaExceeded {
                limit, reset_at, ..
            } => format!(
                "Daily limit of {} AI-generated cards reached; try again after {}",
                limit, reset_at
            ),
            Error::DeckNotFound(_) => "Deck not found".to_string(),
            Error::Gateway { .. } => "AI service unavailable".to_string(),
            Error::Parse { .. } | Error::EmptyGeneration => "Generation failed".to_string(),
            Error::Database(_) | Error::Internal(_) | Error::Serialization(_) => {
                "Internal error".to_string()
            }
            Error::Request(_) => "AI service unavailable".to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_error_display_validation() {
        let err = Error::Validation("text too short".to_string());
        assert_eq!(err.to_string(), "Invalid input: text too short");
    }

    #[test]
    fn test_error_display_deck_not_found() {
        let id = Uuid::nil();
        let err = Error::DeckNotFound(id);
        assert_eq!(err.to_string(), format!("Deck not found: {}", id));
    }

    #[test]
    fn test_error_display_quota_exceeded() {
        let reset_at = Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap();
        let err = Error::QuotaExceeded {
            limit: 50,
            used_today: 50,
            reset_at,
        };
        let msg = err.to_string();
        assert!(msg.contains("50"));
        assert!(msg.contains("2026-03-02"));
    }

    #[test]
    fn test_error_display_gateway_hides_body() {
        let err = Error::Gateway {
            status: 502,
            body: "secret upstream detail".to_string(),
        };
        assert_eq!(err.to_string(), "Gateway error: HTTP 502");
    }

    #[test]
    fn test_code_stability() {
        let reset_at = Utc::now();
        assert_eq!(Error::Validation("x".into()).code(), "invalid_input");
        assert_eq!(
            Error::QuotaExceeded {
                limit: 50,
                used_today: 75,
                reset_at
            }
            .code(),
            "quota_exceeded"
        );
        assert_eq!(Error::DeckNotFound(Uuid::nil()).code(), "deck_not_found");
        assert_eq!(
            Error::Gateway {
                status: 503,
                body: String::new()
            }
            .code(),
            "ai_service_unavailable"
        );
        assert_eq!(
            Error::Parse { raw: String::new() }.code(),
            "generation_failed"
        );
        assert_eq!(Error::EmptyGeneration.code(), "generation_failed");
        assert_eq!(
            Error::Database(sqlx::Error::PoolClosed).code(),
            "storage_error"
        );
    }

    #[test]
    fn test_user_message_withholds_internals() {
        let err = Error::Gateway {
            status: 500,
            body: "stack trace leaked!".to_string(),
        };
        assert!(!err.user_message().contains("stack trace"));

        let err = Error::Parse {
            raw: "raw model output".to_string(),
        };
        assert!(!err.user_message().contains("raw model output"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_from_sqlx_error() {
        let err: Error = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, Error::Database(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
