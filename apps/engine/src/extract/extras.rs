//! Section-scoped extractors for the smaller profile fields: summary,
//! projects, certifications, languages, and interests. Each returns an
//! empty value when its section is absent — never an error.

use std::sync::LazyLock;

use regex::Regex;

use crate::extract::sections::{self, SectionKind};
use crate::models::profile::{Certification, LanguageSkill, Project};

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("valid year regex"));

/// Trailing parenthesized list: "Chat server (Rust, Tokio, Redis)"
static PAREN_LIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]+,[^)]+)\)\s*$").expect("valid paren list regex"));

static TECH_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:technologies|tech(?:\s*stack)?|built with)\s*[:\-]\s*(.+)$")
        .expect("valid tech label regex")
});

/// Extracts the professional summary as a single trimmed paragraph.
pub fn extract_summary(text: &str) -> Option<String> {
    let body = sections::section_body(text, SectionKind::Summary)?;
    let joined = body
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

/// Extracts projects. A colon-delimited line opens a project
/// (name:description); bare lines continue the open project's description.
pub fn extract_projects(text: &str) -> Vec<Project> {
    let body = match sections::section_body(text, SectionKind::Projects) {
        Some(body) => body,
        None => return Vec::new(),
    };

    let mut projects: Vec<Project> = Vec::new();
    for line in body.lines() {
        let line = strip_bullet(line);
        if line.is_empty() {
            continue;
        }
        if let Some(caps) = TECH_LABEL_RE.captures(line) {
            if let Some(open) = projects.last_mut() {
                open.technologies = split_list(&caps[1]);
            }
            continue;
        }
        match line.split_once(':') {
            Some((name, description)) => {
                let name = name.trim();
                if name.is_empty() {
                    continue;
                }
                let mut project = Project {
                    name: name.to_string(),
                    description: non_empty(description.trim()),
                    technologies: Vec::new(),
                };
                absorb_paren_technologies(&mut project);
                projects.push(project);
            }
            None => match projects.last_mut() {
                Some(open) => {
                    let appended = match &open.description {
                        Some(d) => format!("{d} {line}"),
                        None => line.to_string(),
                    };
                    open.description = Some(appended);
                }
                None => {
                    let mut project = Project {
                        name: line.to_string(),
                        description: None,
                        technologies: Vec::new(),
                    };
                    absorb_paren_technologies(&mut project);
                    projects.push(project);
                }
            },
        }
    }
    projects
}

fn absorb_paren_technologies(project: &mut Project) {
    let source = project.name.clone();
    if let Some(caps) = PAREN_LIST_RE.captures(&source) {
        project.technologies = split_list(&caps[1]);
        project.name = PAREN_LIST_RE.replace(&source, "").trim().to_string();
    }
}

/// Extracts certifications as name/issuer/date triples from delimited lines
/// ("AWS Solutions Architect - Amazon - 2021").
pub fn extract_certifications(text: &str) -> Vec<Certification> {
    let body = match sections::section_body(text, SectionKind::Certifications) {
        Some(body) => body,
        None => return Vec::new(),
    };

    let mut certifications = Vec::new();
    for line in body.lines() {
        let line = strip_bullet(line);
        if line.is_empty() {
            continue;
        }
        let date = YEAR_RE.find(line).map(|m| m.as_str().to_string());
        let mut parts = line
            .split(['|', ','])
            .flat_map(|p| p.split(" - "))
            .map(str::trim)
            .filter(|p| !p.is_empty() && !YEAR_RE.is_match(p));
        let name = match parts.next() {
            Some(name) => name.to_string(),
            None => continue,
        };
        let issuer = parts.next().map(str::to_string);
        certifications.push(Certification { name, issuer, date });
    }
    certifications
}

/// Extracts language/proficiency pairs ("English: Fluent", "Spanish (Native)").
pub fn extract_languages(text: &str) -> Vec<LanguageSkill> {
    let body = match sections::section_body(text, SectionKind::Languages) {
        Some(body) => body,
        None => return Vec::new(),
    };

    let mut languages = Vec::new();
    for line in body.lines() {
        let line = strip_bullet(line);
        if line.is_empty() {
            continue;
        }
        for token in line.split([',', ';']) {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let (language, proficiency) = split_language(token);
            if !language.is_empty() {
                languages.push(LanguageSkill {
                    language,
                    proficiency,
                });
            }
        }
    }
    languages
}

fn split_language(token: &str) -> (String, Option<String>) {
    if let Some((lang, prof)) = token.split_once([':', '-', '–']) {
        return (lang.trim().to_string(), non_empty(prof.trim()));
    }
    if let Some(open) = token.find('(') {
        let lang = token[..open].trim().to_string();
        let prof = token[open + 1..].trim_end_matches(')').trim();
        return (lang, non_empty(prof));
    }
    (token.trim().to_string(), None)
}

/// Extracts interests as a flat list of short tokens.
pub fn extract_interests(text: &str) -> Vec<String> {
    let body = match sections::section_body(text, SectionKind::Interests) {
        Some(body) => body,
        None => return Vec::new(),
    };

    body.lines()
        .map(strip_bullet)
        .filter(|l| !l.is_empty())
        .flat_map(|line| line.split([',', ';', '•']))
        .map(str::trim)
        .filter(|t| !t.is_empty() && t.len() <= 60)
        .map(str::to_string)
        .collect()
}

fn strip_bullet(line: &str) -> &str {
    line.trim().trim_start_matches(['-', '•', '*', '·']).trim()
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split([',', ';', '/'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_joined_paragraph() {
        let text = "SUMMARY\nSeasoned backend engineer.\nShips reliable systems.\nSKILLS\nRust\n";
        assert_eq!(
            extract_summary(text).as_deref(),
            Some("Seasoned backend engineer. Ships reliable systems.")
        );
    }

    #[test]
    fn test_summary_absent_is_none() {
        assert_eq!(extract_summary("no summary section"), None);
    }

    #[test]
    fn test_projects_colon_delimited() {
        let text = "PROJECTS\nChat Server: Real-time messaging backend\nTechnologies: Rust, Tokio\n";
        let projects = extract_projects(text);
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "Chat Server");
        assert_eq!(
            projects[0].description.as_deref(),
            Some("Real-time messaging backend")
        );
        assert_eq!(projects[0].technologies, vec!["Rust", "Tokio"]);
    }

    #[test]
    fn test_project_paren_technologies() {
        let text = "PROJECTS\n- Expense Tracker (React, Firebase)\n";
        let projects = extract_projects(text);
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "Expense Tracker");
        assert_eq!(projects[0].technologies, vec!["React", "Firebase"]);
    }

    #[test]
    fn test_project_continuation_line_extends_description() {
        let text = "PROJECTS\nSearch Engine: Crawls docs\nRanks results by relevance\n";
        let projects = extract_projects(text);
        assert_eq!(projects.len(), 1);
        assert_eq!(
            projects[0].description.as_deref(),
            Some("Crawls docs Ranks results by relevance")
        );
    }

    #[test]
    fn test_certification_triple() {
        let text = "CERTIFICATIONS\nAWS Solutions Architect - Amazon - 2021\n";
        let certs = extract_certifications(text);
        assert_eq!(certs.len(), 1);
        assert_eq!(certs[0].name, "AWS Solutions Architect");
        assert_eq!(certs[0].issuer.as_deref(), Some("Amazon"));
        assert_eq!(certs[0].date.as_deref(), Some("2021"));
    }

    #[test]
    fn test_certification_name_only() {
        let text = "CERTIFICATIONS\n- Certified Kubernetes Administrator\n";
        let certs = extract_certifications(text);
        assert_eq!(certs.len(), 1);
        assert_eq!(certs[0].name, "Certified Kubernetes Administrator");
        assert!(certs[0].issuer.is_none());
        assert!(certs[0].date.is_none());
    }

    #[test]
    fn test_languages_colon_and_paren_forms() {
        let text = "LANGUAGES\nEnglish: Fluent, Spanish (Native)\nGerman\n";
        let languages = extract_languages(text);
        assert_eq!(languages.len(), 3);
        assert_eq!(languages[0].language, "English");
        assert_eq!(languages[0].proficiency.as_deref(), Some("Fluent"));
        assert_eq!(languages[1].language, "Spanish");
        assert_eq!(languages[1].proficiency.as_deref(), Some("Native"));
        assert_eq!(languages[2].language, "German");
        assert!(languages[2].proficiency.is_none());
    }

    #[test]
    fn test_interests_split() {
        let text = "INTERESTS\nHiking, Chess; Photography\n";
        let interests = extract_interests(text);
        assert_eq!(interests, vec!["Hiking", "Chess", "Photography"]);
    }

    #[test]
    fn test_all_empty_without_sections() {
        let text = "just a plain paragraph";
        assert!(extract_projects(text).is_empty());
        assert!(extract_certifications(text).is_empty());
        assert!(extract_languages(text).is_empty());
        assert!(extract_interests(text).is_empty());
    }
}
