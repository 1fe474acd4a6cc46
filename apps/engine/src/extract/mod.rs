//! Field extractors — pure functions from résumé text to typed values.
//!
//! Every extractor is stateless and side-effect free: safe to run in any
//! order or in parallel across documents. A miss is a `None`/empty value,
//! never an error.

pub mod contact;
pub mod education;
pub mod experience;
pub mod extras;
pub mod location;
pub mod name;
pub mod sections;
pub mod skills;

use crate::models::profile::ExtractedProfile;

/// Words that mark a line (or a delimited part of one) as a job title
/// rather than a company name. Shared by the name and experience extractors
/// for company-vs-position disambiguation.
pub const JOB_TITLE_KEYWORDS: &[&str] = &[
    "developer",
    "engineer",
    "manager",
    "analyst",
    "consultant",
    "designer",
    "architect",
    "administrator",
    "specialist",
    "scientist",
    "researcher",
    "intern",
    "lead",
    "director",
    "officer",
    "coordinator",
    "technician",
    "programmer",
];

/// True when any job-title keyword occurs in the text (case-insensitive).
pub fn mentions_job_title(text: &str) -> bool {
    let lower = text.to_lowercase();
    JOB_TITLE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Runs the full heuristic extractor family over the document text.
pub fn extract_profile(text: &str) -> ExtractedProfile {
    ExtractedProfile {
        name: name::extract_name(text),
        email: contact::extract_email(text),
        phone: contact::extract_phone(text),
        address: location::extract_location(text),
        summary: extras::extract_summary(text),
        experience: experience::extract_experience(text),
        education: education::extract_education(text),
        skills: skills::extract_skills(text),
        projects: extras::extract_projects(text),
        certifications: extras::extract_certifications(text),
        languages: extras::extract_languages(text),
        interests: extras::extract_interests(text),
    }
}
