//! # recall-pipeline
//!
//! The generation orchestrator: sequences quota enforcement, deck
//! authorization, gateway generation, and persistence into one fail-fast
//! pipeline, and defines the caller-facing result shape.

pub mod service;

pub use service::GenerationService;
