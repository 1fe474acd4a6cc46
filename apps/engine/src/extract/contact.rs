//! Email and phone extraction.
//!
//! Emails are matched over a deobfuscated copy of the text ("user [at]
//! domain [dot] com" forms decoded first). Phones are matched against the
//! contact block (first 10 lines) before the whole document.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").expect("valid email regex")
});

/// Obfuscated at/dot spellings, replaced in order (bracketed forms first so
/// the bare spaced words do not eat their brackets).
static AT_FORMS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*(?:\[\s*at\s*\]|\(\s*at\s*\)|\s\bat\b\s)\s*").expect("valid at regex"));
static DOT_FORMS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*(?:\[\s*dot\s*\]|\(\s*dot\s*\)|\s\bdot\b\s)\s*").expect("valid dot regex"));

/// Domains that suggest a personal mailbox rather than a corporate alias.
const PERSONAL_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "outlook.com",
    "hotmail.com",
];

/// Domains at most this long count as personal-looking ("doe.io").
const SHORT_DOMAIN_LEN: usize = 10;

/// Extracts the most plausible candidate email, or `None`.
pub fn extract_email(text: &str) -> Option<String> {
    let decoded = decode_obfuscations(text);

    let mut seen: HashSet<String> = HashSet::new();
    let mut candidates: Vec<String> = Vec::new();
    for m in EMAIL_RE.find_iter(&decoded) {
        let candidate = m.as_str().trim_matches('.').to_string();
        if seen.insert(candidate.to_lowercase()) {
            candidates.push(candidate);
        }
    }

    // Personal-looking domains are preferred: résumés often list a work
    // alias alongside the personal address that actually reaches the
    // candidate.
    if let Some(personal) = candidates
        .iter()
        .find(|c| is_valid_email(c) && is_personal_domain(c))
    {
        return Some(personal.clone());
    }
    candidates.into_iter().find(|c| is_valid_email(c))
}

fn decode_obfuscations(text: &str) -> String {
    let decoded = AT_FORMS.replace_all(text, "@");
    DOT_FORMS.replace_all(&decoded, ".").into_owned()
}

fn is_personal_domain(email: &str) -> bool {
    let domain = match email.split_once('@') {
        Some((_, d)) => d.to_lowercase(),
        None => return false,
    };
    PERSONAL_DOMAINS.contains(&domain.as_str()) || domain.len() <= SHORT_DOMAIN_LEN
}

/// Structural validity: non-empty parts, no leading/trailing/consecutive
/// dots, dotted TLD segment of at least 2 chars. Also used by the strict
/// reconciliation mode to gate oracle-supplied emails.
pub fn is_valid_email(email: &str) -> bool {
    let (local, domain) = match email.split_once('@') {
        Some(parts) => parts,
        None => return false,
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    for part in [local, domain] {
        if part.starts_with('.') || part.ends_with('.') || part.contains("..") {
            return false;
        }
    }
    match domain.rsplit_once('.') {
        Some((_, tld)) => tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()),
        None => false,
    }
}

static PHONE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // (123) 456-7890
        r"\(\d{3}\)\s*\d{3}[-.\s]?\d{4}",
        // +92 318 0623294 and other international forms
        r"\+\d{1,3}[\s\-]?\d{1,4}(?:[\s\-]?\d{2,4}){1,3}",
        // 123-456-7890
        r"\b\d{3}-\d{3}-\d{4}\b",
        // 123.456.7890
        r"\b\d{3}\.\d{3}\.\d{4}\b",
        // plain 10-15 digit run
        r"\b\d{10,15}\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid phone regex"))
    .collect()
});

const PHONE_LINE_KEYWORDS: &[&str] = &["tel", "phone", "mobile", "cell", "contact"];

/// Extracts the most plausible phone number, or `None`.
/// A match is valid only when its digit-only length is 10–15.
pub fn extract_phone(text: &str) -> Option<String> {
    let lines: Vec<&str> = text.lines().collect();
    let contact_block: Vec<&str> = lines.iter().take(10).copied().collect();

    scan_lines(&contact_block).or_else(|| scan_lines(&lines))
}

fn scan_lines(lines: &[&str]) -> Option<String> {
    let mut first_valid: Option<String> = None;
    for line in lines {
        let labeled = has_phone_keyword(line);
        for pattern in PHONE_PATTERNS.iter() {
            for m in pattern.find_iter(line) {
                let candidate = m.as_str().trim();
                if !is_valid_phone(candidate) {
                    continue;
                }
                if labeled {
                    return Some(candidate.to_string());
                }
                if first_valid.is_none() {
                    first_valid = Some(candidate.to_string());
                }
            }
        }
    }
    first_valid
}

fn has_phone_keyword(line: &str) -> bool {
    let lower = line.to_lowercase();
    PHONE_LINE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Digit-count validity, shared with the strict reconciliation mode
/// (which requires at least 10 digits from oracle-supplied phones).
pub fn phone_digit_count(candidate: &str) -> usize {
    candidate.chars().filter(|c| c.is_ascii_digit()).count()
}

fn is_valid_phone(candidate: &str) -> bool {
    let digits = phone_digit_count(candidate);
    (10..=15).contains(&digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_email() {
        let text = "Contact: john.doe@example.com\n";
        assert_eq!(extract_email(text).as_deref(), Some("john.doe@example.com"));
    }

    #[test]
    fn test_obfuscated_bracket_email() {
        let text = "Contact: user [at] domain [dot] com\n";
        assert_eq!(extract_email(text).as_deref(), Some("user@domain.com"));
    }

    #[test]
    fn test_obfuscated_paren_email() {
        let text = "reach me: jane(at)company(dot)org\n";
        assert_eq!(extract_email(text).as_deref(), Some("jane@company.org"));
    }

    #[test]
    fn test_obfuscated_spaced_words() {
        let text = "email is john at gmail dot com thanks\n";
        assert_eq!(extract_email(text).as_deref(), Some("john@gmail.com"));
    }

    #[test]
    fn test_personal_domain_preferred_over_corporate() {
        let text = "j.doe@enterprise-systems-international.com\njohn@gmail.com\n";
        assert_eq!(extract_email(text).as_deref(), Some("john@gmail.com"));
    }

    #[test]
    fn test_case_insensitive_dedup_keeps_first() {
        let text = "John@Example.com and john@example.com\n";
        assert_eq!(extract_email(text).as_deref(), Some("John@Example.com"));
    }

    #[test]
    fn test_no_email_is_none() {
        assert_eq!(extract_email("no contact details here"), None);
    }

    #[test]
    fn test_email_validity_rules() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@.b.co"));
        assert!(!is_valid_email("a..b@c.co"));
        assert!(!is_valid_email("a@b..co"));
        assert!(!is_valid_email("a@b.c"));
    }

    #[test]
    fn test_us_parenthesized_phone() {
        let text = "Call (555) 123-4567 anytime\n";
        assert_eq!(extract_phone(text).as_deref(), Some("(555) 123-4567"));
    }

    #[test]
    fn test_international_phone() {
        let text = "Phone: +92 318 0623294\n";
        assert_eq!(extract_phone(text).as_deref(), Some("+92 318 0623294"));
    }

    #[test]
    fn test_too_few_digits_rejected() {
        assert_eq!(extract_phone("call 555-1234"), None);
    }

    #[test]
    fn test_labeled_line_preferred() {
        let text = "fax 1112223333 on file\nMobile: 444-555-6666\n";
        assert_eq!(extract_phone(text).as_deref(), Some("444-555-6666"));
    }

    #[test]
    fn test_contact_block_scanned_before_body() {
        let mut text = String::from("header 999-888-7777 here\n");
        for _ in 0..12 {
            text.push_str("filler line\n");
        }
        text.push_str("body 111-222-3333\n");
        assert_eq!(extract_phone(&text).as_deref(), Some("999-888-7777"));
    }

    #[test]
    fn test_year_range_is_not_a_phone() {
        assert_eq!(extract_phone("2020-2024 at TechCorp"), None);
    }
}
