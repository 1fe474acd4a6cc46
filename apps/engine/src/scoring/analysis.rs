//! Deterministic résumé quality scoring.
//!
//! Four independently capped sub-scores (ATS/formatting 30, keyword density
//! 30, content quality 20, role relevance 20) sum to the 0–100 overall
//! score. Tier thresholds and weights follow the long-standing evaluator
//! behavior so heuristic-only runs stay comparable with AI-backed ones.

use crate::models::analysis::{AnalysisResult, SubScores};
use crate::models::profile::ExtractedProfile;
use crate::validate;

const ATS_MAX: f64 = 30.0;
const KEYWORD_MAX: f64 = 30.0;
const CONTENT_MAX: f64 = 20.0;
const RELEVANCE_MAX: f64 = 20.0;

/// Scores a profile without any AI involvement.
pub fn score_profile(profile: &ExtractedProfile) -> AnalysisResult {
    let scores = SubScores {
        ats: ats_score(profile),
        keyword: keyword_score(profile),
        content: content_score(profile),
        relevance: relevance_score(profile),
    };

    AnalysisResult {
        overall_score: scores.total(),
        scores,
        strengths: strengths(profile),
        weaknesses: weaknesses(profile),
        improvements: improvements(profile),
        industry_specific: industry_specific(profile),
        keyword_matches: profile.skills.technical.iter().take(10).cloned().collect(),
        personalization: personalization(profile),
    }
}

/// ATS/formatting: contact block present, enough recognizable sections,
/// plus the completeness fraction scaled to 10.
fn ats_score(profile: &ExtractedProfile) -> u32 {
    let mut score = 0.0;
    if profile.name.is_some() && profile.email.is_some() {
        score += 10.0;
    }
    let sections = validate::sections_identified(profile).len();
    if sections >= 4 {
        score += 10.0;
    } else if sections >= 2 {
        score += 5.0;
    }
    score += (validate::completeness_score(profile) * 10.0).round();
    cap(score, ATS_MAX)
}

/// Keyword density: technical skill tiers, a soft-skill bonus capped at 5,
/// and experience presence/depth bonuses.
fn keyword_score(profile: &ExtractedProfile) -> u32 {
    let technical = profile.skills.technical.len();
    let mut score = match technical {
        n if n >= 15 => 15.0,
        n if n >= 10 => 12.0,
        n if n >= 5 => 8.0,
        n => n as f64 * 1.5,
    };
    score += profile.skills.soft.len().min(5) as f64;
    if !profile.experience.is_empty() {
        score += 5.0;
        if profile
            .experience
            .iter()
            .any(|e| !e.responsibilities.is_empty())
        {
            score += 5.0;
        }
    }
    cap(score, KEYWORD_MAX)
}

/// Content quality: experience volume, skill breadth, and supporting
/// sections (projects, certifications, a real summary).
fn content_score(profile: &ExtractedProfile) -> u32 {
    let experience = profile.experience.len();
    let mut score = if experience >= 3 {
        8.0
    } else {
        experience as f64 * 2.5
    };
    score += match profile.skills.technical.len() {
        n if n >= 10 => 7.0,
        n if n >= 5 => 4.0,
        n if n > 0 => 2.0,
        _ => 0.0,
    };
    if !profile.projects.is_empty() {
        score += 2.0;
    }
    if !profile.certifications.is_empty() {
        score += 2.0;
    }
    if profile.summary.as_deref().is_some_and(|s| s.len() > 50) {
        score += 1.0;
    }
    cap(score, CONTENT_MAX)
}

/// Role relevance: education presence, experience depth, credentials.
fn relevance_score(profile: &ExtractedProfile) -> u32 {
    let mut score = 0.0;
    if !profile.education.is_empty() {
        score += 5.0;
    }
    let experience = profile.experience.len();
    score += if experience >= 3 {
        10.0
    } else {
        experience as f64 * 3.0
    };
    if !profile.certifications.is_empty() {
        score += 3.0;
    }
    if !profile.projects.is_empty() {
        score += 2.0;
    }
    cap(score, RELEVANCE_MAX)
}

fn cap(score: f64, max: f64) -> u32 {
    score.round().min(max) as u32
}

fn strengths(profile: &ExtractedProfile) -> Vec<String> {
    let mut out = Vec::new();
    let technical = profile.skills.technical.len();
    if technical >= 10 {
        out.push(format!("Broad technical coverage: {technical} skills listed"));
    } else if technical >= 5 {
        out.push(format!("Solid technical skill set ({technical} skills)"));
    }
    if profile.experience.len() >= 3 {
        out.push(format!(
            "Substantial work history with {} positions",
            profile.experience.len()
        ));
    }
    if profile
        .experience
        .iter()
        .any(|e| e.responsibilities.len() >= 3)
    {
        out.push("Detailed responsibility descriptions under experience".to_string());
    }
    if !profile.certifications.is_empty() {
        out.push("Certifications add verifiable credentials".to_string());
    }
    if out.is_empty() {
        out.push("Résumé structure was recognized and parsed".to_string());
    }
    out
}

fn weaknesses(profile: &ExtractedProfile) -> Vec<String> {
    let mut out = Vec::new();
    if profile.summary.is_none() {
        out.push("No professional summary section".to_string());
    }
    if profile.skills.soft.is_empty() {
        out.push("No soft skills are listed".to_string());
    }
    if profile.experience.iter().all(|e| e.responsibilities.is_empty()) {
        out.push("Experience entries lack responsibility bullet points".to_string());
    }
    if profile.certifications.is_empty() && profile.projects.is_empty() {
        out.push("No certifications or projects to support the skill claims".to_string());
    }
    out
}

fn improvements(profile: &ExtractedProfile) -> Vec<String> {
    let mut out = Vec::new();
    if profile.summary.is_none() {
        out.push("Add a 2-3 sentence summary targeting the role".to_string());
    }
    if profile.skills.technical.len() < 10 {
        out.push("List more of the concrete technologies you have used".to_string());
    }
    if profile.experience.iter().any(|e| e.responsibilities.is_empty()) {
        out.push("Add measurable accomplishments under each position".to_string());
    }
    if profile.phone.is_none() || profile.email.is_none() {
        out.push("Make sure phone and email appear near the top".to_string());
    }
    if out.is_empty() {
        out.push("Tailor keyword choices to each job description".to_string());
    }
    out
}

fn industry_specific(profile: &ExtractedProfile) -> Vec<String> {
    let mut out = Vec::new();
    if profile
        .skills
        .technical
        .iter()
        .any(|s| matches!(s.as_str(), "AWS" | "Azure" | "GCP" | "Docker" | "Kubernetes"))
    {
        out.push("Cloud tooling is in demand — surface it in the summary".to_string());
    }
    if profile.projects.is_empty() {
        out.push("Technical roles expect a projects section with outcomes".to_string());
    }
    out
}

fn personalization(profile: &ExtractedProfile) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(name) = &profile.name {
        out.push(format!(
            "{name}, lead with your strongest recent accomplishment"
        ));
    }
    out.push("Mirror the job posting's own wording for key skills".to_string());
    out
}
