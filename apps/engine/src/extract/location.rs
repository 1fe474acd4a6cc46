//! Location extraction from the document header.
//!
//! Tries address-shaped patterns over the first ~20 lines, preferring lines
//! that announce a location outright. Lines naming a company or carrying
//! date tokens are excluded: "TechCorp Inc, Austin" is an employer, not an
//! address. Last resort is a fixed major-city vocabulary over the whole
//! document.

use std::sync::LazyLock;

use regex::Regex;

const HEADER_LINES: usize = 20;

const LOCATION_LINE_KEYWORDS: &[&str] = &["location", "city", "based", "reside", "address"];

const COMPANY_SUFFIXES: &[&str] = &["inc", "llc", "corp", "ltd", "gmbh", "pvt"];

static LOCATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // 123 Main Street, optionally with more after it
        r"\d{1,5}\s+[A-Z][A-Za-z]+\s+(?:Street|St|Avenue|Ave|Road|Rd|Boulevard|Blvd|Lane|Ln|Drive|Dr)\b",
        // Austin, TX 78701 / Austin, TX
        r"[A-Z][a-zA-Z]+(?:\s[A-Z][a-zA-Z]+)?,\s*[A-Z]{2}(?:\s+\d{5}(?:-\d{4})?)?",
        // Berlin, Germany / San Francisco, California
        r"[A-Z][a-zA-Z]+(?:\s[A-Z][a-zA-Z]+)?,\s*[A-Z][a-zA-Z]+",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid location regex"))
    .collect()
});

static DATE_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\b|\b(?:19|20)\d{2}\b",
    )
    .expect("valid date token regex")
});

const MAJOR_CITIES: &[&str] = &[
    "New York",
    "San Francisco",
    "Los Angeles",
    "Chicago",
    "Boston",
    "Seattle",
    "Austin",
    "Denver",
    "Atlanta",
    "Toronto",
    "Vancouver",
    "London",
    "Dublin",
    "Paris",
    "Berlin",
    "Munich",
    "Amsterdam",
    "Stockholm",
    "Copenhagen",
    "Zurich",
    "Vienna",
    "Warsaw",
    "Prague",
    "Lisbon",
    "Madrid",
    "Barcelona",
    "Rome",
    "Cairo",
    "Lagos",
    "Nairobi",
    "Dubai",
    "Mumbai",
    "Delhi",
    "Bangalore",
    "Karachi",
    "Lahore",
    "Islamabad",
    "Singapore",
    "Hong Kong",
    "Seoul",
    "Tokyo",
    "Beijing",
    "Shanghai",
    "Sydney",
    "Melbourne",
    "Mexico City",
    "Buenos Aires",
];

static CITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = MAJOR_CITIES
        .iter()
        .map(|c| regex::escape(c))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).expect("valid city regex")
});

/// Extracts the candidate's location, or `None`.
pub fn extract_location(text: &str) -> Option<String> {
    let header: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .take(HEADER_LINES)
        .collect();

    // Pass 1: lines that announce a location.
    for line in header.iter().filter(|l| has_location_keyword(l)) {
        if let Some(loc) = match_location_line(line) {
            return Some(loc);
        }
    }

    // Pass 2: any eligible header line.
    for line in &header {
        if let Some(loc) = match_location_line(line) {
            return Some(loc);
        }
    }

    // Last resort: known major city anywhere in the document.
    CITY_RE
        .find(text)
        .map(|m| canonical_city(m.as_str()).to_string())
}

fn match_location_line(line: &str) -> Option<String> {
    if has_company_suffix(line) || DATE_TOKEN_RE.is_match(line) {
        return None;
    }
    for pattern in LOCATION_PATTERNS.iter() {
        if let Some(m) = pattern.find(line) {
            return Some(m.as_str().trim().to_string());
        }
    }
    None
}

fn has_location_keyword(line: &str) -> bool {
    let lower = line.to_lowercase();
    LOCATION_LINE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

fn has_company_suffix(line: &str) -> bool {
    line.split_whitespace().any(|word| {
        let cleaned: String = word
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        COMPANY_SUFFIXES.contains(&cleaned.as_str())
    })
}

fn canonical_city(matched: &str) -> &'static str {
    MAJOR_CITIES
        .iter()
        .find(|c| c.eq_ignore_ascii_case(matched))
        .copied()
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_state_line() {
        let text = "John Doe\nAustin, TX 78701\n";
        assert_eq!(extract_location(text).as_deref(), Some("Austin, TX 78701"));
    }

    #[test]
    fn test_location_keyword_line_preferred() {
        let text = "Portland, OR\nLocation: Berlin, Germany\n";
        assert_eq!(extract_location(text).as_deref(), Some("Berlin, Germany"));
    }

    #[test]
    fn test_street_address() {
        let text = "Jane Roe\n42 Elm Street\n";
        assert_eq!(extract_location(text).as_deref(), Some("42 Elm Street"));
    }

    #[test]
    fn test_company_line_excluded() {
        let text = "TechCorp Inc, Austin\nfiller line\n";
        // "Austin" is still found by the major-city fallback, but the
        // company line itself never matches as an address.
        assert_eq!(extract_location(text).as_deref(), Some("Austin"));
    }

    #[test]
    fn test_date_line_excluded() {
        let text = "March 2020, Boston\n";
        assert_eq!(extract_location(text).as_deref(), Some("Boston"));
    }

    #[test]
    fn test_major_city_fallback() {
        let text = "worked across several offices including singapore hub\n";
        assert_eq!(extract_location(text).as_deref(), Some("Singapore"));
    }

    #[test]
    fn test_no_location_is_none() {
        assert_eq!(extract_location("nothing geographic here"), None);
    }
}
