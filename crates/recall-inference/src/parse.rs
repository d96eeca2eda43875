//! Defensive parsing of model output into validated candidates.
//!
//! The gateway is asked for schema-constrained JSON, but the schema is
//! advisory when a model or gateway ignores `response_format`. Parsing
//! therefore tries a strict deserialize first and falls back to extracting
//! a JSON object from surrounding prose or markdown fences.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

use recall_core::{defaults, CandidateFlashcard, Error, Result};

/// Strict shape of the expected model output.
#[derive(Debug, Deserialize)]
struct FlashcardsPayload {
    flashcards: Vec<RawCandidate>,
}

/// One element as the model wrote it, before validation.
#[derive(Debug, Deserialize)]
struct RawCandidate {
    #[serde(default)]
    front: String,
    #[serde(default)]
    back: String,
}

/// Best-effort scan for a JSON object containing the `flashcards` key:
/// greedy from the first `{` to the last `}` in the content.
static OBJECT_SCAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)\{.*"flashcards".*\}"#).expect("valid object-scan regex"));

/// Parse raw completion content into validated candidates.
///
/// Entries violating the front/back bounds are dropped silently; an empty
/// surviving set is an error. The result never exceeds `max_cards`.
pub fn parse_flashcards(content: &str, max_cards: u32) -> Result<Vec<CandidateFlashcard>> {
    let payload = match serde_json::from_str::<FlashcardsPayload>(content) {
        Ok(payload) => payload,
        Err(strict_err) => {
            debug!(
                subsystem = "inference",
                component = "parse",
                error = %strict_err,
                "Strict parse failed; attempting object extraction"
            );
            let extracted = OBJECT_SCAN
                .find(content)
                .ok_or_else(|| Error::Parse {
                    raw: truncate_raw(content),
                })?
                .as_str();
            serde_json::from_str::<FlashcardsPayload>(extracted).map_err(|_| Error::Parse {
                raw: truncate_raw(content),
            })?
        }
    };

    let total = payload.flashcards.len();
    let valid: Vec<CandidateFlashcard> = payload
        .flashcards
        .into_iter()
        .map(|raw| {
            CandidateFlashcard {
                front: raw.front,
                back: raw.back,
            }
            .trimmed()
        })
        .filter(CandidateFlashcard::is_valid)
        .collect();

    // Count filter drops before the cap so capping is not misreported as
    // malformed output.
    if valid.len() < total {
        warn!(
            subsystem = "inference",
            component = "parse",
            kept = valid.len(),
            dropped = total - valid.len(),
            "Dropped malformed or out-of-bounds flashcards from response"
        );
    }

    if valid.is_empty() {
        return Err(Error::Parse {
            raw: "no valid flashcards in response".to_string(),
        });
    }

    let mut candidates = valid;
    candidates.truncate(max_cards as usize);
    Ok(candidates)
}

/// Truncate raw model output for inclusion in a parse error.
pub fn truncate_raw(content: &str) -> String {
    content
        .chars()
        .take(defaults::PARSE_ERROR_SNIPPET_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload_json(cards: &[(&str, &str)]) -> String {
        let cards: Vec<serde_json::Value> = cards
            .iter()
            .map(|(front, back)| serde_json::json!({"front": front, "back": back}))
            .collect();
        serde_json::json!({ "flashcards": cards }).to_string()
    }

    #[test]
    fn test_strict_parse() {
        let content = payload_json(&[("What is DNA?", "Deoxyribonucleic acid.")]);
        let cards = parse_flashcards(&content, 10).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].front, "What is DNA?");
    }

    #[test]
    fn test_fallback_extracts_from_fenced_markdown() {
        let content = format!(
            "Here are your flashcards:\n```json\n{}\n```\nEnjoy!",
            payload_json(&[("Q", "A")])
        );
        let cards = parse_flashcards(&content, 10).unwrap();
        assert_eq!(cards.len(), 1);
    }

    #[test]
    fn test_drops_invalid_entries_keeps_valid() {
        let content = payload_json(&[("Valid question?", "Valid answer."), ("Empty back", "  ")]);
        let cards = parse_flashcards(&content, 10).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].front, "Valid question?");
    }

    #[test]
    fn test_drops_overlong_entries_without_truncating() {
        let long_back = "a".repeat(501);
        let content = payload_json(&[("Q", long_back.as_str()), ("Keep", "short")]);
        let cards = parse_flashcards(&content, 10).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].front, "Keep");
    }

    #[test]
    fn test_all_invalid_is_parse_error() {
        let content = payload_json(&[("", ""), ("  ", "  ")]);
        let err = parse_flashcards(&content, 10).unwrap_err();
        assert_eq!(err.code(), "generation_failed");
    }

    #[test]
    fn test_missing_front_field_tolerated_then_dropped() {
        let content = r#"{"flashcards":[{"back":"orphan answer"},{"front":"Q","back":"A"}]}"#;
        let cards = parse_flashcards(content, 10).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].front, "Q");
    }

    #[test]
    fn test_garbage_is_parse_error_with_truncated_raw() {
        let garbage = "x".repeat(1000);
        let err = parse_flashcards(&garbage, 10).unwrap_err();
        match err {
            Error::Parse { raw } => assert_eq!(raw.chars().count(), 400),
            other => panic!("expected Parse, got {:?}", other),
        }
    }

    #[test]
    fn test_result_capped_at_max_cards() {
        let cards: Vec<(String, String)> = (0..8)
            .map(|i| (format!("Q{}", i), format!("A{}", i)))
            .collect();
        let refs: Vec<(&str, &str)> = cards
            .iter()
            .map(|(front, back)| (front.as_str(), back.as_str()))
            .collect();
        let parsed = parse_flashcards(&payload_json(&refs), 3).unwrap();
        assert_eq!(parsed.len(), 3);
    }

    #[test]
    fn test_cap_applies_after_invalid_entries_are_dropped() {
        // One invalid entry among five; the cap of 2 must act on the four
        // valid survivors, not slice off valid cards before filtering.
        let content = payload_json(&[
            ("", "invalid: empty front"),
            ("Q1", "A1"),
            ("Q2", "A2"),
            ("Q3", "A3"),
            ("Q4", "A4"),
        ]);
        let cards = parse_flashcards(&content, 2).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].front, "Q1");
        assert_eq!(cards[1].front, "Q2");
    }

    #[test]
    fn test_trims_whitespace_on_kept_cards() {
        let content = payload_json(&[("  Question?  ", "  Answer.  ")]);
        let cards = parse_flashcards(&content, 10).unwrap();
        assert_eq!(cards[0].front, "Question?");
        assert_eq!(cards[0].back, "Answer.");
    }
}
