//! The structured candidate record produced by the extraction pipeline.
//!
//! Invariant: list fields default to empty (never null), missing scalars are
//! `None`. Placeholder text like "Not Specified" is a presentation concern —
//! the `*_display` helpers supply it for formatters, the data stays `None`.

use serde::{Deserialize, Serialize};

/// Display placeholder for scalar fields no extractor could fill.
pub const NOT_SPECIFIED: &str = "Not Specified";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub summary: Option<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Skills,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
    pub languages: Vec<LanguageSkill>,
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub company: Option<String>,
    pub position: Option<String>,
    pub duration: Option<String>,
    pub responsibilities: Vec<String>,
}

impl ExperienceEntry {
    pub fn company_display(&self) -> &str {
        self.company.as_deref().unwrap_or(NOT_SPECIFIED)
    }

    pub fn position_display(&self) -> &str {
        self.position.as_deref().unwrap_or(NOT_SPECIFIED)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub dates: Option<String>,
    pub gpa: Option<String>,
}

impl EducationEntry {
    pub fn institution_display(&self) -> &str {
        self.institution.as_deref().unwrap_or(NOT_SPECIFIED)
    }

    pub fn degree_display(&self) -> &str {
        self.degree.as_deref().unwrap_or(NOT_SPECIFIED)
    }

    /// An entry is worth keeping once either headline field is known.
    pub fn has_content(&self) -> bool {
        self.institution.is_some() || self.degree.is_some()
    }
}

/// Deduplicated, insertion-ordered skill sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub technical: Vec<String>,
    pub soft: Vec<String>,
}

impl Skills {
    pub fn total(&self) -> usize {
        self.technical.len() + self.soft.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub name: String,
    pub description: Option<String>,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certification {
    pub name: String,
    pub issuer: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageSkill {
    pub language: String,
    pub proficiency: Option<String>,
}
