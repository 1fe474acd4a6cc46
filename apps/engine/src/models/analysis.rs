use serde::{Deserialize, Serialize};

/// The four capped components of an analysis. ATS and keyword cap at 30,
/// content and relevance at 20; the overall score is exactly their sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubScores {
    pub ats: u32,
    pub keyword: u32,
    pub content: u32,
    pub relevance: u32,
}

impl SubScores {
    pub fn total(&self) -> u32 {
        self.ats + self.keyword + self.content + self.relevance
    }
}

/// Quality evaluation of a profile, 0–100. Produced once per profile and
/// context; re-analysis yields a new value rather than mutating this one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    pub overall_score: u32,
    pub scores: SubScores,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub improvements: Vec<String>,
    pub industry_specific: Vec<String>,
    pub keyword_matches: Vec<String>,
    pub personalization: Vec<String>,
}

/// Overlap between a profile's skills and a job description.
/// One per (profile, job description) pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchResult {
    pub match_percentage: u32,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub total_job_keywords: usize,
    pub recommendations: Vec<String>,
}
