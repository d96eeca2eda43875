//! # recall-db
//!
//! PostgreSQL implementations of the recall storage traits, plus connection
//! pool management. Schema DDL lives in `migrations/`.

pub mod decks;
pub mod flashcards;
pub mod generation_log;
pub mod pool;

pub use decks::PgDeckRepository;
pub use flashcards::PgFlashcardRepository;
pub use generation_log::PgGenerationLogRepository;
pub use pool::{create_pool, create_pool_with_config, PoolConfig};
