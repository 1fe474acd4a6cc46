//! Sift — résumé intelligence engine.
//!
//! Ingests unstructured résumé text and produces a structured candidate
//! profile plus scored evaluations against job requirements. The extraction
//! heuristics, reconciliation, validation, scoring, and matching are all
//! deterministic and oracle-free; the AI oracle is an optional injected
//! capability that augments them when available.

pub mod config;
pub mod errors;
pub mod extract;
pub mod models;
pub mod oracle;
pub mod pipeline;
pub mod reconcile;
pub mod scoring;
pub mod validate;

pub use config::Config;
pub use errors::EngineError;
pub use pipeline::{ExtractionOutcome, Pipeline};
