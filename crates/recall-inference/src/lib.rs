//! # recall-inference
//!
//! Resilient LLM gateway client for flashcard generation: prompt
//! construction, input sanitization, schema-constrained request building,
//! retry with exponential backoff, and defensive response parsing. The
//! orchestrator consumes this crate only through the
//! [`recall_core::CardGenerator`] trait.

pub mod backend;
pub mod config;
pub mod mock;
pub mod parse;
pub mod prompt;
pub mod sanitize;
pub mod types;

pub use backend::OpenRouterBackend;
pub use config::OpenRouterConfig;
pub use mock::MockCardGenerator;
pub use sanitize::sanitize_source_text;
