//! Candidate-name extraction over the document header.
//!
//! Only the first ~20 non-empty lines are scanned: names live in the header,
//! and scanning further starts matching section content. Rules are tried in
//! priority order; the first hit wins.

use std::sync::LazyLock;

use regex::Regex;

use crate::extract::mentions_job_title;
use crate::extract::sections::is_section_heading;

const HEADER_LINES: usize = 20;

static NAME_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^name\s*[:\-]\s*(.{2,60})$").expect("valid name label regex"));

static TITLE_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:Mr|Mrs|Ms|Mx|Dr|Prof|Er)\.?\s+(.{2,60})$").expect("valid title prefix regex")
});

/// "J. K. Rowling", "John A. Smith" — at least one dotted initial.
static INITIALS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Z]\.\s*)+[A-Z][a-z]+$|^[A-Z][a-z]+\s+(?:[A-Z]\.\s*)+[A-Z][a-z]+$")
        .expect("valid initials regex")
});

/// Lines that look like document titles rather than names.
const NON_NAME_LINES: &[&str] = &["RESUME", "CURRICULUM VITAE", "CV", "COVER LETTER"];

/// Extracts the candidate name from the document header, or `None`.
pub fn extract_name(text: &str) -> Option<String> {
    let header: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .take(HEADER_LINES)
        .collect();

    // (a) explicit "Name:" label
    for line in &header {
        if let Some(caps) = NAME_LABEL_RE.captures(line) {
            let value = caps[1].trim().to_string();
            if !value.is_empty() {
                return Some(value);
            }
        }
    }

    // (b) Title-Case two-to-three word line that is neither a section
    // heading nor a job title
    for line in &header {
        if is_candidate_line(line) && is_title_case_name(line, 2, 3) {
            return Some((*line).to_string());
        }
    }

    // (c) ALL-CAPS two-to-four word line, re-cased
    for line in &header {
        if is_candidate_line(line) && is_all_caps_name(line, 2, 4) {
            return Some(to_title_case(line));
        }
    }

    // (d) line carrying an honorific title
    for line in &header {
        if let Some(caps) = TITLE_PREFIX_RE.captures(line) {
            let rest = caps[1].trim();
            if is_title_case_name(rest, 2, 3) || is_all_caps_name(rest, 2, 4) {
                return Some(to_title_case(rest));
            }
        }
    }

    // (e) initials pattern
    for line in &header {
        if is_candidate_line(line) && INITIALS_RE.is_match(line) {
            return Some((*line).to_string());
        }
    }

    // (f) fallback: a looser two-word name-shaped line within 3 lines above
    // detected contact info ("DJ Thompson" and similar casings the strict
    // rules reject)
    for (idx, line) in header.iter().enumerate() {
        if looks_like_contact(line) {
            let from = idx.saturating_sub(3);
            for candidate in &header[from..idx] {
                if is_candidate_line(candidate) && is_loose_two_word_name(candidate) {
                    return Some((*candidate).to_string());
                }
            }
        }
    }

    None
}

fn is_candidate_line(line: &str) -> bool {
    if is_section_heading(line) || mentions_job_title(line) {
        return false;
    }
    if line.contains('@') || line.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }
    let upper = line.to_uppercase();
    !NON_NAME_LINES.iter().any(|n| upper == *n)
}

fn is_title_case_name(line: &str, min_words: usize, max_words: usize) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.len() < min_words || words.len() > max_words {
        return false;
    }
    words.iter().all(|w| is_title_case_word(w))
}

fn is_title_case_word(word: &str) -> bool {
    let first_upper = word.chars().next().is_some_and(|c| c.is_uppercase());
    let has_lower = word.chars().any(|c| c.is_lowercase());
    first_upper
        && has_lower
        && word
            .chars()
            .all(|c| c.is_alphabetic() || c == '\'' || c == '-')
}

fn is_all_caps_name(line: &str, min_words: usize, max_words: usize) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.len() < min_words || words.len() > max_words {
        return false;
    }
    words.iter().all(|w| {
        w.len() > 1
            && w.chars().all(|c| c.is_uppercase() || c == '\'' || c == '-')
            && w.chars().any(|c| c.is_alphabetic())
    })
}

/// Two words, each starting uppercase. Accepts mixed casings like "DJ" or
/// "McKenzie" that the strict title-case rule rejects.
fn is_loose_two_word_name(line: &str) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    words.len() == 2
        && words.iter().all(|w| {
            w.chars().next().is_some_and(|c| c.is_uppercase())
                && w.chars().all(|c| c.is_alphabetic() || c == '\'' || c == '-')
        })
}

fn to_title_case(line: &str) -> String {
    line.split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn looks_like_contact(line: &str) -> bool {
    line.contains('@') || line.chars().filter(|c| c.is_ascii_digit()).count() >= 7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_name_label_wins() {
        let text = "Name: Priya Sharma\nJOHN OTHER\n";
        assert_eq!(extract_name(text).as_deref(), Some("Priya Sharma"));
    }

    #[test]
    fn test_title_case_line() {
        let text = "John Doe\njohn@example.com\n";
        assert_eq!(extract_name(text).as_deref(), Some("John Doe"));
    }

    #[test]
    fn test_three_word_title_case() {
        let text = "Mary Jane Watson\nmary@example.com\n";
        assert_eq!(extract_name(text).as_deref(), Some("Mary Jane Watson"));
    }

    #[test]
    fn test_job_title_line_is_not_a_name() {
        let text = "Senior Developer\nresume body follows here\n";
        assert_eq!(extract_name(text), None);
    }

    #[test]
    fn test_all_caps_recased() {
        let text = "JOHN DOE\njohn@example.com\n";
        assert_eq!(extract_name(text).as_deref(), Some("John Doe"));
    }

    #[test]
    fn test_honorific_title_line() {
        let text = "Resume 2024\nDr. ALICE SMITH\nalice@example.com\n";
        assert_eq!(extract_name(text).as_deref(), Some("Alice Smith"));
    }

    #[test]
    fn test_initials_pattern() {
        let text = "the document starts with some words\nJ. K. Rowling\n";
        assert_eq!(extract_name(text).as_deref(), Some("J. K. Rowling"));
    }

    #[test]
    fn test_section_heading_is_not_a_name() {
        let text = "Work Experience\nbuilt software for years\n";
        assert_eq!(extract_name(text), None);
    }

    #[test]
    fn test_document_title_is_not_a_name() {
        let text = "CURRICULUM VITAE\n+1 (555) 123-4567\n";
        assert_eq!(extract_name(text), None);
    }

    #[test]
    fn test_fallback_near_contact_line() {
        // "DJ" has no lowercase so rules (b)/(c) skip it; the
        // contact-adjacent fallback still finds it.
        let text = "an introduction line with many lowercase words\nDJ Thompson\ndj@example.com\n";
        assert_eq!(extract_name(text).as_deref(), Some("DJ Thompson"));
    }

    #[test]
    fn test_empty_text_yields_none() {
        assert_eq!(extract_name(""), None);
    }

    #[test]
    fn test_idempotent() {
        let text = "John Doe\njohn@example.com\n";
        assert_eq!(extract_name(text), extract_name(text));
    }
}
