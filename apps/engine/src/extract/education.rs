//! Education extraction — a single incremental pass over the Education
//! section.
//!
//! School-keyword lines start a new entry (flushing any started one),
//! degree-keyword lines attach to the current entry or start a second one
//! when the current entry is already complete, date tokens attach as the
//! entry's dates. Fields no line filled stay `None`; display placeholders
//! are a formatter concern.

use std::sync::LazyLock;

use regex::Regex;

use crate::extract::sections::{self, SectionKind};
use crate::models::profile::EducationEntry;

const SCHOOL_KEYWORDS: &[&str] = &[
    "university",
    "college",
    "institute",
    "school",
    "academy",
    "polytechnic",
];

static DEGREE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:bachelor(?:'?s)?|master(?:'?s)?|associate|doctorate|doctor of|diploma|ph\.?d|m\.?b\.?a|b\.?sc|m\.?sc|b\.?tech|m\.?tech|b\.e|b\.?a|b\.?s|m\.?a|m\.?s)\b",
    )
    .expect("valid degree regex")
});

static DATE_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:19|20)\d{2}\s*(?:-|–|—|\bto\b)\s*(?:(?:19|20)\d{2}|present|current)")
        .expect("valid education date range regex")
});

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("valid year regex"));

static GPA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bc?gpa\s*[:\-]?\s*([0-9](?:\.\d{1,2})?(?:\s*/\s*(?:4|5|10)(?:\.0)?)?)")
        .expect("valid gpa regex")
});

/// Extracts education entries from the Education section. Returns an empty
/// list when the section is absent.
pub fn extract_education(text: &str) -> Vec<EducationEntry> {
    let body = match sections::section_body(text, SectionKind::Education) {
        Some(body) => body,
        None => return Vec::new(),
    };

    let mut entries: Vec<EducationEntry> = Vec::new();
    let mut current = EducationEntry::default();

    for line in body.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if is_school_line(line) {
            // A school line always starts a new entry.
            if current.has_content() {
                entries.push(std::mem::take(&mut current));
            }
            absorb_school_line(line, &mut current);
        } else if DEGREE_RE.is_match(line) {
            // A second degree under the same school closes the first entry.
            if current.degree.is_some() && current.institution.is_some() {
                entries.push(std::mem::take(&mut current));
            }
            if current.degree.is_none() {
                let segment = line
                    .split([',', '|'])
                    .map(str::trim)
                    .find(|s| DEGREE_RE.is_match(s))
                    .unwrap_or(line);
                current.degree = Some(strip_dates(segment));
            }
            absorb_date_and_gpa(line, &mut current);
        } else {
            absorb_date_and_gpa(line, &mut current);
        }
    }

    if current.has_content() {
        entries.push(current);
    }
    entries
}

fn is_school_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    SCHOOL_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Splits a school line into comma/pipe segments: the school-keyword segment
/// becomes the institution, and a degree/date/gpa riding on the same line
/// ("MIT, BSc Computer Science, 2010-2014") still attaches.
fn absorb_school_line(line: &str, entry: &mut EducationEntry) {
    let segments: Vec<&str> = line.split([',', '|']).map(str::trim).collect();

    for segment in &segments {
        if is_school_line(segment) && entry.institution.is_none() {
            entry.institution = Some(strip_dates(segment));
        } else if DEGREE_RE.is_match(segment) && entry.degree.is_none() {
            entry.degree = Some(strip_dates(segment));
        }
    }
    if entry.institution.is_none() {
        entry.institution = Some(strip_dates(line));
    }
    absorb_date_and_gpa(line, entry);
}

fn absorb_date_and_gpa(line: &str, entry: &mut EducationEntry) {
    if entry.dates.is_none() {
        if let Some(m) = DATE_RANGE_RE.find(line) {
            entry.dates = Some(m.as_str().trim().to_string());
        } else if let Some(m) = YEAR_RE.find(line) {
            entry.dates = Some(m.as_str().to_string());
        }
    }
    if entry.gpa.is_none() {
        if let Some(caps) = GPA_RE.captures(line) {
            entry.gpa = Some(caps[1].trim().to_string());
        }
    }
}

fn strip_dates(segment: &str) -> String {
    let no_range = DATE_RANGE_RE.replace_all(segment, "");
    let no_year = YEAR_RE.replace_all(&no_range, "");
    no_year
        .trim()
        .trim_matches(|c: char| "()[],-".contains(c))
        .trim()
        .to_string()
}
