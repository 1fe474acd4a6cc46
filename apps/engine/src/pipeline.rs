//! Pipeline facade — the surface calling collaborators (HTTP layer, UI)
//! consume: `extract`, `score`, `match_job`.
//!
//! The oracle is an injected capability, never ambient state: tests and
//! heuristic-only deployments construct the pipeline without one. Every
//! oracle failure is recovered locally by falling back to the deterministic
//! engines, recorded in `ExtractionMetadata::method` — callers never see an
//! oracle error.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::EngineError;
use crate::extract;
use crate::models::analysis::{AnalysisResult, MatchResult};
use crate::models::metadata::{ExtractionMetadata, ExtractionMethod};
use crate::models::profile::ExtractedProfile;
use crate::oracle::Oracle;
use crate::reconcile::{self, Strictness};
use crate::scoring;
use crate::validate;

/// Minimum input size, counted after whitespace normalization. Anything
/// shorter cannot produce meaningful output from any extractor.
const MIN_INPUT_CHARS: usize = 20;

/// A profile together with its derived quality metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionOutcome {
    pub profile: ExtractedProfile,
    pub metadata: ExtractionMetadata,
}

pub struct Pipeline {
    oracle: Option<Arc<dyn Oracle>>,
    strictness: Strictness,
}

impl Pipeline {
    pub fn new(oracle: Option<Arc<dyn Oracle>>, strictness: Strictness) -> Self {
        Self { oracle, strictness }
    }

    /// A pipeline with no oracle: extraction, scoring, and matching all run
    /// on the deterministic engines.
    pub fn heuristic_only() -> Self {
        Self::new(None, Strictness::default())
    }

    /// Extracts a structured profile from résumé text, augmenting the
    /// heuristic result with oracle output when an oracle is configured and
    /// answers.
    pub async fn extract(&self, raw_text: &str) -> Result<ExtractionOutcome, EngineError> {
        check_input(raw_text)?;
        let heuristic = extract::extract_profile(raw_text);

        if let Some(oracle) = &self.oracle {
            match oracle.extract_structured(raw_text).await {
                Ok(ai_json) => {
                    let profile = reconcile::merge(heuristic, &ai_json, self.strictness);
                    let metadata = validate::validate(&profile, ExtractionMethod::AiAugmented);
                    return Ok(ExtractionOutcome { profile, metadata });
                }
                Err(err) => {
                    warn!("oracle extraction failed, falling back to heuristics: {err}");
                }
            }
        }

        let metadata = validate::validate(&heuristic, ExtractionMethod::HeuristicOnly);
        Ok(ExtractionOutcome {
            profile: heuristic,
            metadata,
        })
    }

    /// Synchronous heuristic-only extraction, for callers fanning documents
    /// out across worker threads.
    pub fn extract_heuristic(&self, raw_text: &str) -> Result<ExtractionOutcome, EngineError> {
        check_input(raw_text)?;
        let profile = extract::extract_profile(raw_text);
        let metadata = validate::validate(&profile, ExtractionMethod::HeuristicOnly);
        Ok(ExtractionOutcome { profile, metadata })
    }

    /// Evaluates profile quality: oracle when available, deterministic
    /// scoring engine otherwise.
    pub async fn score(&self, profile: &ExtractedProfile) -> AnalysisResult {
        if let Some(oracle) = &self.oracle {
            match oracle.evaluate(profile).await {
                Ok(result) => return result,
                Err(err) => warn!("oracle evaluation failed, scoring locally: {err}"),
            }
        }
        scoring::score_profile(profile)
    }

    /// Matches a profile against a job description: oracle when available,
    /// deterministic keyword matcher otherwise.
    pub async fn match_job(&self, profile: &ExtractedProfile, job_description: &str) -> MatchResult {
        if let Some(oracle) = &self.oracle {
            match oracle.match_job(profile, job_description).await {
                Ok(result) => return result,
                Err(err) => warn!("oracle matching failed, matching locally: {err}"),
            }
        }
        scoring::match_job(profile, job_description)
    }
}

fn check_input(raw_text: &str) -> Result<(), EngineError> {
    let normalized = raw_text.split_whitespace().collect::<Vec<_>>().join(" ");
    let length = normalized.chars().count();
    if length < MIN_INPUT_CHARS {
        info!("rejecting input: {length} chars after normalization");
        return Err(EngineError::EmptyInput {
            length,
            minimum: MIN_INPUT_CHARS,
        });
    }
    Ok(())
}
