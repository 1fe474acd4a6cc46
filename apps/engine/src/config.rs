use anyhow::{bail, Result};

use crate::oracle::DEFAULT_MODELS;
use crate::reconcile::Strictness;

/// Application configuration loaded from environment variables.
///
/// The API key is optional: without one the pipeline runs heuristic-only,
/// which is a supported mode rather than an error.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    /// Ordered model ids the oracle probes with sequential fallback.
    pub oracle_models: Vec<String>,
    /// Reconciliation strictness. The two historical parser variants
    /// disagreed on whether oracle email/phone values need format
    /// validation before overriding heuristics; lenient is the default.
    pub merge_strictness: Strictness,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let anthropic_api_key = std::env::var("ANTHROPIC_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let oracle_models = match std::env::var("ORACLE_MODELS") {
            Ok(raw) => {
                let models: Vec<String> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .map(str::to_string)
                    .collect();
                if models.is_empty() {
                    bail!("ORACLE_MODELS is set but contains no model ids");
                }
                models
            }
            Err(_) => DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
        };

        let merge_strictness = match std::env::var("MERGE_STRICTNESS").as_deref() {
            Ok("strict") => Strictness::Strict,
            Ok("lenient") | Err(_) => Strictness::Lenient,
            Ok(other) => bail!("MERGE_STRICTNESS must be 'lenient' or 'strict', got '{other}'"),
        };

        Ok(Config {
            anthropic_api_key,
            oracle_models,
            merge_strictness,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
