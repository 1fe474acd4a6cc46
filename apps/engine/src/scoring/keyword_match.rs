//! Deterministic job-description matching — the local fallback for the AI
//! match oracle.
//!
//! Job keywords come from a fixed vocabulary scanned into the description
//! by case-insensitive substring presence. Résumé coverage is bidirectional
//! substring containment: "React" covers "react", and "rest" covers
//! "REST API".

use crate::models::analysis::MatchResult;
use crate::models::profile::ExtractedProfile;

/// Vocabulary of screenable terms, lowercase.
const JOB_VOCABULARY: &[&str] = &[
    "python",
    "java",
    "javascript",
    "typescript",
    "react",
    "angular",
    "vue",
    "node.js",
    "sql",
    "nosql",
    "postgresql",
    "mongodb",
    "redis",
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "terraform",
    "ci/cd",
    "git",
    "linux",
    "rest",
    "graphql",
    "microservices",
    "machine learning",
    "data analysis",
    "agile",
    "scrum",
    "kanban",
    "jira",
    "testing",
    "tdd",
    "devops",
    "security",
    "networking",
    "html",
    "css",
    "c++",
    "c#",
    "rust",
    "golang",
    "kafka",
    "spark",
    "hadoop",
    "communication",
    "leadership",
    "teamwork",
    "problem solving",
    "project management",
];

const MAX_MISSING: usize = 10;
const MIN_RECOMMENDATIONS: usize = 3;

/// Computes keyword overlap between a profile and a job description.
pub fn match_job(profile: &ExtractedProfile, job_description: &str) -> MatchResult {
    let jd_lower = job_description.to_lowercase();

    let job_keywords: Vec<&str> = JOB_VOCABULARY
        .iter()
        .copied()
        .filter(|term| jd_lower.contains(term))
        .collect();

    let resume_keywords: Vec<String> = profile
        .skills
        .technical
        .iter()
        .chain(profile.skills.soft.iter())
        .map(|s| s.to_lowercase())
        .collect();

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    for keyword in &job_keywords {
        let covered = resume_keywords
            .iter()
            .any(|r| r.contains(keyword) || keyword.contains(r.as_str()));
        if covered {
            matched.push((*keyword).to_string());
        } else {
            missing.push((*keyword).to_string());
        }
    }

    let total = matched.len() + missing.len();
    let match_percentage = if total == 0 {
        0
    } else {
        ((matched.len() as f64 / total as f64) * 100.0).round() as u32
    };

    missing.truncate(MAX_MISSING);
    let recommendations = build_recommendations(match_percentage, &matched, &missing);

    MatchResult {
        match_percentage,
        matched,
        missing,
        total_job_keywords: job_keywords.len(),
        recommendations,
    }
}

/// Always yields at least three recommendations, padding with generic
/// guidance when the keyword lists alone produce fewer.
fn build_recommendations(percentage: u32, matched: &[String], missing: &[String]) -> Vec<String> {
    let mut out = Vec::new();

    if !missing.is_empty() {
        let top: Vec<&str> = missing.iter().take(3).map(String::as_str).collect();
        out.push(format!(
            "Add the missing keywords the posting screens for: {}",
            top.join(", ")
        ));
    }
    if !matched.is_empty() {
        let top: Vec<&str> = matched.iter().take(3).map(String::as_str).collect();
        out.push(format!(
            "Keep your covered strengths visible near the top: {}",
            top.join(", ")
        ));
    }
    if percentage < 50 && !missing.is_empty() {
        out.push(
            "Coverage is below half the posting's keywords — consider whether the role fits or the résumé needs tailoring"
                .to_string(),
        );
    }

    let generic = [
        "Mirror the job description's exact phrasing for the skills you do have",
        "Quantify accomplishments with numbers to back up keyword claims",
        "Keep the skills section current — remove stale technologies",
    ];
    let mut filler = generic.iter();
    while out.len() < MIN_RECOMMENDATIONS {
        match filler.next() {
            Some(text) => out.push((*text).to_string()),
            None => break,
        }
    }
    out
}
