//! Skill extraction: a delimiter pattern pass over the Skills section plus
//! a dictionary pass over the whole document.
//!
//! The dictionary scan uses Aho-Corasick with case-insensitive
//! leftmost-longest matching so "JavaScript" wins over the embedded "Java",
//! with a manual word-boundary check on both ends of each hit.

use std::collections::HashSet;
use std::sync::LazyLock;

use aho_corasick::{AhoCorasick, MatchKind};

use crate::extract::sections::{self, SectionKind};
use crate::models::profile::Skills;

/// Canonical technical-skill vocabulary. Casing is preserved in output.
const TECHNICAL_SKILLS: &[&str] = &[
    "Python", "Java", "JavaScript", "TypeScript", "C++", "C#", "Ruby", "PHP", "Swift",
    "Kotlin", "Scala", "Rust", "Golang", "Perl", "MATLAB", "SQL", "HTML", "CSS", "Bash",
    "React", "Angular", "Vue", "Svelte", "Next.js", "Node.js", "Express", "Django", "Flask",
    "FastAPI", "Spring Boot", "Spring", "Rails", "Laravel", ".NET", "ASP.NET", "jQuery",
    "Bootstrap", "Tailwind", "Pandas", "NumPy", "scikit-learn", "TensorFlow", "PyTorch",
    "Keras", "Spark", "Hadoop", "Kafka", "Airflow", "Tableau", "Power BI", "Excel",
    "Machine Learning", "Deep Learning", "NLP", "Computer Vision", "Data Analysis",
    "AWS", "Azure", "GCP", "Docker", "Kubernetes", "Terraform", "Ansible", "Jenkins",
    "Git", "GitHub", "GitLab", "CI/CD", "Linux", "Nginx", "GraphQL", "REST API",
    "Microservices", "Serverless", "Lambda", "PostgreSQL", "MySQL", "MongoDB", "Redis",
    "Elasticsearch", "Cassandra", "SQLite", "Oracle", "DynamoDB", "Firebase", "Agile",
    "Scrum", "Jira", "Confluence", "Selenium", "Cypress", "JUnit", "Pytest", "Webpack",
    "Vite", "Redux", "RabbitMQ", "gRPC", "OAuth", "WebSockets", "Unity", "Android", "iOS",
];

/// Canonical soft-skill vocabulary.
const SOFT_SKILLS: &[&str] = &[
    "Communication", "Leadership", "Teamwork", "Problem Solving", "Critical Thinking",
    "Time Management", "Adaptability", "Collaboration", "Creativity", "Work Ethic",
    "Attention to Detail", "Project Management", "Public Speaking", "Negotiation",
    "Conflict Resolution", "Decision Making", "Emotional Intelligence", "Mentoring",
    "Organization", "Presentation", "Interpersonal Skills", "Analytical Thinking",
    "Strategic Planning", "Customer Service", "Multitasking",
];

/// Label/degree noise the pattern pass must not emit as skills.
const TOKEN_BLACKLIST: &[&str] = &[
    "skills", "skill", "technical", "soft", "languages", "tools", "technologies",
    "frameworks", "libraries", "databases", "other", "bachelor", "master", "degree",
    "proficient", "familiar", "experience", "years", "expert", "advanced", "intermediate",
    "beginner",
];

static TECH_MATCHER: LazyLock<AhoCorasick> = LazyLock::new(|| build_matcher(TECHNICAL_SKILLS));
static SOFT_MATCHER: LazyLock<AhoCorasick> = LazyLock::new(|| build_matcher(SOFT_SKILLS));

fn build_matcher(patterns: &[&str]) -> AhoCorasick {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .match_kind(MatchKind::LeftmostLongest)
        .build(patterns)
        .expect("skill matcher builds from static vocabulary")
}

/// Extracts technical and soft skills, deduplicated case-insensitively in
/// insertion order: pattern-pass tokens first, dictionary hits after.
pub fn extract_skills(text: &str) -> Skills {
    let section = sections::section_body(text, SectionKind::Skills);

    let mut skills = Skills::default();
    let mut seen_technical: HashSet<String> = HashSet::new();
    let mut seen_soft: HashSet<String> = HashSet::new();

    // Pass 1: delimiter tokens inside the skills-labeled section.
    if let Some(body) = &section {
        for token in pattern_tokens(body) {
            if is_soft_skill(&token) {
                push_unique(&mut skills.soft, &mut seen_soft, token);
            } else {
                push_unique(&mut skills.technical, &mut seen_technical, token);
            }
        }
    }

    // Pass 2: dictionary presence. Technical anywhere in the document; soft
    // refined to the skills section when one exists.
    for hit in dictionary_hits(&TECH_MATCHER, TECHNICAL_SKILLS, text) {
        push_unique(&mut skills.technical, &mut seen_technical, hit);
    }
    let soft_scope = section.as_deref().unwrap_or(text);
    for hit in dictionary_hits(&SOFT_MATCHER, SOFT_SKILLS, soft_scope) {
        push_unique(&mut skills.soft, &mut seen_soft, hit);
    }

    skills
}

fn pattern_tokens(body: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for line in body.lines() {
        let line = line.trim().trim_start_matches(['-', '•', '*', '·']).trim();
        if line.is_empty() {
            continue;
        }
        // A colon marks a category label; tokens follow it.
        let content = match line.split_once(':') {
            Some((_, rest)) => rest,
            None => line,
        };
        for raw in content
            .split([',', ';', '/', '•'])
            .flat_map(|part| part.split(" and "))
            .flat_map(|part| part.split(" & "))
        {
            let candidate = raw
                .trim()
                .trim_matches(|c: char| "()[]".contains(c))
                .trim_end_matches('.')
                .trim();
            if is_valid_token(candidate) {
                tokens.push(title_case(candidate));
            }
        }
    }
    tokens
}

fn is_valid_token(token: &str) -> bool {
    if token.len() < 2 || token.len() > 40 {
        return false;
    }
    if !token.chars().any(|c| c.is_alphabetic()) {
        return false;
    }
    if token.split_whitespace().count() > 4 {
        return false;
    }
    let lower = token.to_lowercase();
    !TOKEN_BLACKLIST.contains(&lower.as_str())
}

fn title_case(token: &str) -> String {
    token
        .split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                // Keep interior casing: "JavaScript" must not become "Javascript".
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn dictionary_hits(
    matcher: &AhoCorasick,
    vocabulary: &'static [&'static str],
    text: &str,
) -> Vec<String> {
    let bytes = text.as_bytes();
    let mut hits = Vec::new();
    for m in matcher.find_iter(text) {
        if !word_bounded(bytes, m.start(), m.end()) {
            continue;
        }
        hits.push(vocabulary[m.pattern().as_usize()].to_string());
    }
    hits
}

/// Both ends of the match must sit on word boundaries, except where the
/// pattern itself ends in a symbol ("C++", ".NET").
fn word_bounded(bytes: &[u8], start: usize, end: usize) -> bool {
    let is_word = |b: u8| b.is_ascii_alphanumeric() || b == b'_';
    let before_ok = start == 0 || !is_word(bytes[start - 1]) || !is_word(bytes[start]);
    let after_ok = end == bytes.len() || !is_word(bytes[end - 1]) || !is_word(bytes[end]);
    before_ok && after_ok
}

fn is_soft_skill(token: &str) -> bool {
    SOFT_SKILLS.iter().any(|s| s.eq_ignore_ascii_case(token))
}

fn push_unique(list: &mut Vec<String>, seen: &mut HashSet<String>, value: String) {
    if seen.insert(value.to_lowercase()) {
        list.push(value);
    }
}
