//! Profile validation: placeholder detection, completeness scoring, and
//! section inventory, assembled into an `ExtractionMetadata` block.
//!
//! Two severities are kept apart: `validation_issues` are soft findings
//! (extraction produced something, but it looks synthetic or templated),
//! `extraction_errors` are hard misses (a whole section came back empty).

use std::collections::BTreeSet;

use chrono::Utc;

use crate::models::metadata::{ExtractionMetadata, ExtractionMethod};
use crate::models::profile::ExtractedProfile;

/// Template values that betray a form résumé rather than a real one.
const SAMPLE_NAMES: &[&str] = &["your name", "full name", "sample name", "john smith"];

const SAMPLE_EMAIL_MARKERS: &[&str] = &["example.com", "email.com", "your"];

const COMPANY_SUFFIXES: &[&str] = &["inc", "llc", "corp", "ltd", "gmbh", "pvt"];

const PLACEHOLDER_WORDS: &[&str] = &["company", "position", "role", "placeholder"];

const EDUCATION_PLACEHOLDER_WORDS: &[&str] = &["institution", "school", "degree", "placeholder"];

/// The six fields the completeness score counts.
const COMPLETENESS_FIELDS: f64 = 6.0;

/// Builds the derived metadata block for a profile.
pub fn validate(profile: &ExtractedProfile, method: ExtractionMethod) -> ExtractionMetadata {
    ExtractionMetadata {
        method,
        timestamp: Utc::now(),
        sections_identified: sections_identified(profile),
        completeness_score: completeness_score(profile),
        validation_issues: validation_issues(profile),
        extraction_errors: extraction_errors(profile),
    }
}

pub fn validation_issues(profile: &ExtractedProfile) -> Vec<String> {
    let mut issues = Vec::new();

    if let Some(name) = &profile.name {
        let lower = name.to_lowercase();
        if lower.contains("name")
            || lower.contains("placeholder")
            || SAMPLE_NAMES.contains(&lower.as_str())
        {
            issues.push(format!("Name looks like a placeholder: '{name}'"));
        }
    }

    if let Some(email) = &profile.email {
        let lower = email.to_lowercase();
        if !email.contains('@') {
            issues.push(format!("Email is missing '@': '{email}'"));
        } else if lower.contains("placeholder")
            || SAMPLE_EMAIL_MARKERS.iter().any(|m| lower.contains(m))
        {
            issues.push(format!("Email looks like a sample value: '{email}'"));
        }
    }

    if let Some(phone) = &profile.phone {
        let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
        if digits < 7 {
            issues.push(format!("Phone has too few digits: '{phone}'"));
        } else if phone.to_lowercase().contains("placeholder") {
            issues.push(format!("Phone looks like a placeholder: '{phone}'"));
        }
    }

    if let Some(address) = &profile.address {
        if has_company_suffix(address) {
            issues.push(format!("Address looks like a company name: '{address}'"));
        }
    }

    for (i, entry) in profile.experience.iter().enumerate() {
        if field_is_placeholder(entry.company.as_deref(), PLACEHOLDER_WORDS) {
            issues.push(format!("Experience entry {} has no real company", i + 1));
        }
        if field_is_placeholder(entry.position.as_deref(), PLACEHOLDER_WORDS) {
            issues.push(format!("Experience entry {} has no real position", i + 1));
        }
    }

    for (i, entry) in profile.education.iter().enumerate() {
        if field_is_placeholder(entry.institution.as_deref(), EDUCATION_PLACEHOLDER_WORDS) {
            issues.push(format!("Education entry {} has no real institution", i + 1));
        }
        if field_is_placeholder(entry.degree.as_deref(), EDUCATION_PLACEHOLDER_WORDS) {
            issues.push(format!("Education entry {} has no real degree", i + 1));
        }
    }

    issues
}

pub fn extraction_errors(profile: &ExtractedProfile) -> Vec<String> {
    let mut errors = Vec::new();
    if profile.experience.is_empty() {
        errors.push("No work experience entries extracted".to_string());
    }
    if profile.skills.technical.is_empty() {
        errors.push("No technical skills extracted".to_string());
    }
    if profile.education.is_empty() {
        errors.push("No education entries extracted".to_string());
    }
    errors
}

/// Fraction of {name, email, phone, experience, education, skills} that
/// extracted as usable. Always within [0, 1], and adding a previously
/// missing field never lowers it.
pub fn completeness_score(profile: &ExtractedProfile) -> f64 {
    let mut filled = 0u32;
    if name_usable(profile) {
        filled += 1;
    }
    if email_usable(profile) {
        filled += 1;
    }
    if phone_usable(profile) {
        filled += 1;
    }
    if !profile.experience.is_empty() {
        filled += 1;
    }
    if !profile.education.is_empty() {
        filled += 1;
    }
    if profile.skills.total() > 0 {
        filled += 1;
    }
    f64::from(filled) / COMPLETENESS_FIELDS
}

pub fn sections_identified(profile: &ExtractedProfile) -> BTreeSet<String> {
    let mut sections = BTreeSet::new();
    if profile.summary.is_some() {
        sections.insert("summary".to_string());
    }
    if !profile.experience.is_empty() {
        sections.insert("experience".to_string());
    }
    if !profile.education.is_empty() {
        sections.insert("education".to_string());
    }
    if !profile.skills.technical.is_empty() {
        sections.insert("technical_skills".to_string());
    }
    if !profile.skills.soft.is_empty() {
        sections.insert("soft_skills".to_string());
    }
    if !profile.projects.is_empty() {
        sections.insert("projects".to_string());
    }
    if !profile.certifications.is_empty() {
        sections.insert("certifications".to_string());
    }
    if !profile.languages.is_empty() {
        sections.insert("languages".to_string());
    }
    if !profile.interests.is_empty() {
        sections.insert("interests".to_string());
    }
    sections
}

fn name_usable(profile: &ExtractedProfile) -> bool {
    profile.name.as_deref().is_some_and(|n| {
        let lower = n.to_lowercase();
        !n.trim().is_empty()
            && !lower.contains("placeholder")
            && !SAMPLE_NAMES.contains(&lower.as_str())
    })
}

fn email_usable(profile: &ExtractedProfile) -> bool {
    profile
        .email
        .as_deref()
        .is_some_and(|e| e.contains('@') && !e.trim().is_empty())
}

fn phone_usable(profile: &ExtractedProfile) -> bool {
    profile
        .phone
        .as_deref()
        .is_some_and(|p| p.chars().filter(|c| c.is_ascii_digit()).count() >= 7)
}

fn field_is_placeholder(value: Option<&str>, words: &[&str]) -> bool {
    match value {
        None => true,
        Some(v) => {
            let lower = v.to_lowercase();
            v.trim().is_empty() || words.iter().any(|w| lower.contains(w))
        }
    }
}

fn has_company_suffix(text: &str) -> bool {
    text.split_whitespace().any(|word| {
        let cleaned: String = word
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        COMPANY_SUFFIXES.contains(&cleaned.as_str())
    })
}
