//! Prompt construction and response schema for flashcard generation.

use recall_core::defaults;
use serde_json::{json, Value as JsonValue};

/// System instruction defining the model's role and quality bar.
pub const SYSTEM_PROMPT: &str = "\
You are an expert flashcard author. You turn study material into \
high-quality question/answer flashcards.

Quality bar:
- The front is a single clear question.
- The back is a complete, accurate answer to that question.
- Each card covers exactly one concept.
- Cards stand alone; never reference \"the text\" or other cards.

Output rules:
- Respond with JSON only: an object with one \"flashcards\" array.
- Each element has exactly two string fields, \"front\" and \"back\".
- No markdown, no commentary, no text outside the JSON object.";

/// Build the user instruction embedding the sanitized source text and the
/// numeric card ceiling.
pub fn build_user_prompt(sanitized_text: &str, max_cards: u32) -> String {
    format!(
        "Create at most {} flashcards from the study material below. \
         Prefer fewer, better cards over padding to the limit.\n\n\
         Study material:\n{}",
        max_cards, sanitized_text
    )
}

/// JSON schema for the expected `{flashcards: [{front, back}]}` response.
///
/// Sent as a `response_format` constraint; gateways that ignore it make the
/// schema advisory, which the parser compensates for.
pub fn response_schema(max_cards: u32) -> JsonValue {
    json!({
        "type": "object",
        "properties": {
            "flashcards": {
                "type": "array",
                "minItems": 1,
                "maxItems": max_cards,
                "items": {
                    "type": "object",
                    "properties": {
                        "front": {
                            "type": "string",
                            "minLength": 1,
                            "maxLength": defaults::FRONT_MAX_CHARS
                        },
                        "back": {
                            "type": "string",
                            "minLength": 1,
                            "maxLength": defaults::BACK_MAX_CHARS
                        }
                    },
                    "required": ["front", "back"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["flashcards"],
        "additionalProperties": false
    })
}
