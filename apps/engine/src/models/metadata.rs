use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the profile was produced. AI-augmented means oracle output was merged
/// over the heuristic base; heuristic-only means the oracle was absent or
/// failed and the pipeline degraded locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionMethod {
    #[serde(rename = "AI-Augmented")]
    AiAugmented,
    #[serde(rename = "Heuristic-Only")]
    HeuristicOnly,
}

/// Derived quality report for an `ExtractedProfile`. Recomputed whenever the
/// profile changes; only `timestamp` varies between runs on identical input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    pub method: ExtractionMethod,
    pub timestamp: DateTime<Utc>,
    pub sections_identified: BTreeSet<String>,
    /// Fraction of {name, email, phone, experience, education, skills}
    /// that extracted non-empty. Always within [0, 1].
    pub completeness_score: f64,
    /// Soft findings: extraction succeeded but the content looks
    /// synthetic/templated (placeholder names, sample emails).
    pub validation_issues: Vec<String>,
    /// Hard misses: a whole section came back empty.
    pub extraction_errors: Vec<String>,
}
