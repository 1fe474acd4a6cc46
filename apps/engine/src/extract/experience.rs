//! Experience extraction as an explicit line-scan state machine.
//!
//! States and transitions:
//! - `SeekingEntryStart`: advance until a date-range line. A date line seeds
//!   a new entry; the accumulate step then resolves company/position from
//!   the date line and its immediate neighbors (labels, "X at Y",
//!   "X | Y" / "X - Y" with job-title keyword side assignment, ±2-line
//!   title search) before moving to `SeekingResponsibilities`.
//! - `SeekingResponsibilities`: collect bullet-prefixed or long lines into
//!   the open entry, for at most a 10-line window. The next date line flushes
//!   and seeds again; a section heading flushes and returns to seeking.
//!
//! Entries are returned in scan order (not chronologically), capped at 10.

use std::sync::LazyLock;

use regex::Regex;

use crate::extract::sections::{self, SectionKind};
use crate::extract::JOB_TITLE_KEYWORDS;
use crate::models::profile::ExperienceEntry;

const MAX_ENTRIES: usize = 10;
const RESPONSIBILITY_WINDOW: usize = 10;

/// `MonthName? Year (-|–|to) (MonthName? Year|Present)`
static DATE_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+)?(?:19|20)\d{2}\s*(?:-|–|—|\bto\b)\s*(?:(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+)?(?:(?:19|20)\d{2}|present|current)",
    )
    .expect("valid date range regex")
});

static COMPANY_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:company|employer|organization|institute)\s*:\s*(.+)$")
        .expect("valid company label regex")
});

static POSITION_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:job\s*title|position|role|designation)\s*:\s*(.+)$")
        .expect("valid position label regex")
});

/// "Software Engineer at TechCorp"
static AT_PATTERN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s+at\s+(.+)$").expect("valid at pattern regex"));

#[derive(Debug)]
enum State {
    SeekingEntryStart,
    SeekingResponsibilities { window_left: usize },
}

/// Extracts work-experience entries from the Experience section, falling
/// back to the whole document when no heading was found.
pub fn extract_experience(text: &str) -> Vec<ExperienceEntry> {
    let scope = sections::section_text(text, SectionKind::Experience).unwrap_or(text);
    let lines: Vec<&str> = scope.lines().map(str::trim).collect();

    let mut entries: Vec<ExperienceEntry> = Vec::new();
    let mut open: Option<ExperienceEntry> = None;
    let mut state = State::SeekingEntryStart;
    let mut i = 0;

    while i < lines.len() && entries.len() < MAX_ENTRIES {
        let line = lines[i];
        match state {
            State::SeekingEntryStart => {
                if let Some(duration) = date_range(line) {
                    // Accumulating phase: header fields resolve from the
                    // date line and its neighbors before scanning on.
                    open = Some(accumulate_entry(&lines, i, duration));
                    state = State::SeekingResponsibilities {
                        window_left: RESPONSIBILITY_WINDOW,
                    };
                }
                i += 1;
            }
            State::SeekingResponsibilities { window_left } => {
                if date_range(line).is_some() {
                    // Next entry begins; flush and re-seed on this line.
                    flush(&mut entries, &mut open);
                    state = State::SeekingEntryStart;
                    continue;
                }
                if sections::is_section_heading(line) {
                    flush(&mut entries, &mut open);
                    state = State::SeekingEntryStart;
                    i += 1;
                    continue;
                }
                if window_left == 0 {
                    flush(&mut entries, &mut open);
                    state = State::SeekingEntryStart;
                    continue;
                }
                if let Some(resp) = responsibility_line(line) {
                    if let Some(entry) = open.as_mut() {
                        entry.responsibilities.push(resp);
                    }
                }
                state = State::SeekingResponsibilities {
                    window_left: window_left - 1,
                };
                i += 1;
            }
        }
    }
    flush(&mut entries, &mut open);
    entries.truncate(MAX_ENTRIES);
    entries
}

fn flush(entries: &mut Vec<ExperienceEntry>, open: &mut Option<ExperienceEntry>) {
    if let Some(entry) = open.take() {
        if entries.len() < MAX_ENTRIES {
            entries.push(entry);
        }
    }
}

fn date_range(line: &str) -> Option<String> {
    DATE_RANGE_RE.find(line).map(|m| m.as_str().trim().to_string())
}

/// Resolves company/position for the entry seeded at `lines[seed]`.
fn accumulate_entry(lines: &[&str], seed: usize, duration: String) -> ExperienceEntry {
    let mut entry = ExperienceEntry {
        duration: Some(duration),
        ..Default::default()
    };

    // The date line itself (date span stripped) plus immediate neighbors.
    let candidates = header_candidates(lines, seed);

    for candidate in &candidates {
        resolve_labels(candidate, &mut entry);
    }
    if entry.company.is_none() || entry.position.is_none() {
        for candidate in &candidates {
            if resolve_at_pattern(candidate, &mut entry) {
                break;
            }
        }
    }
    if entry.company.is_none() || entry.position.is_none() {
        for candidate in &candidates {
            if resolve_delimited(candidate, &mut entry) {
                break;
            }
        }
    }

    // Position still unresolved: a nearby line that reads like a job title.
    if entry.position.is_none() {
        let from = seed.saturating_sub(2);
        let to = (seed + 2).min(lines.len().saturating_sub(1));
        for line in &lines[from..=to] {
            if is_title_line(line) {
                entry.position = Some(strip_date(line));
                break;
            }
        }
    }

    entry
}

fn header_candidates(lines: &[&str], seed: usize) -> Vec<String> {
    let mut out = Vec::new();
    let seed_clean = clean_decoration(&strip_date(lines[seed]));
    if !seed_clean.is_empty() {
        out.push(seed_clean);
    }
    // Bullet, heading, and date-bearing neighbors never carry header fields
    // (a date neighbor belongs to the previous or next entry).
    for idx in [seed.wrapping_sub(1), seed + 1] {
        if let Some(line) = lines.get(idx) {
            if is_bullet(line) || sections::is_section_heading(line) || date_range(line).is_some() {
                continue;
            }
            let cleaned = clean_decoration(line);
            if !cleaned.is_empty() {
                out.push(cleaned);
            }
        }
    }
    out
}

fn clean_decoration(line: &str) -> String {
    line.trim()
        .trim_matches(|c: char| "()[],-".contains(c))
        .trim()
        .to_string()
}

fn resolve_labels(candidate: &str, entry: &mut ExperienceEntry) {
    if entry.company.is_none() {
        if let Some(caps) = COMPANY_LABEL_RE.captures(candidate) {
            entry.company = non_empty(caps[1].trim());
        }
    }
    if entry.position.is_none() {
        if let Some(caps) = POSITION_LABEL_RE.captures(candidate) {
            entry.position = non_empty(caps[1].trim());
        }
    }
}

fn resolve_at_pattern(candidate: &str, entry: &mut ExperienceEntry) -> bool {
    if let Some(caps) = AT_PATTERN_RE.captures(candidate) {
        let position = caps[1].trim();
        let company = caps[2].trim();
        if !position.is_empty() && !company.is_empty() {
            entry.position.get_or_insert_with(|| position.to_string());
            entry.company.get_or_insert_with(|| company.to_string());
            return true;
        }
    }
    false
}

/// "X | Y" or "X - Y": the side naming a job title is the position, the
/// other side the company. Neither side matching defaults first = company.
fn resolve_delimited(candidate: &str, entry: &mut ExperienceEntry) -> bool {
    let (left, right) = match candidate
        .split_once('|')
        .or_else(|| candidate.split_once(" - "))
    {
        Some(parts) => parts,
        None => return false,
    };
    let left = left.trim();
    let right = right.trim();
    if left.is_empty() || right.is_empty() {
        return false;
    }

    let (company, position) = if is_title_line(left) && !is_title_line(right) {
        (right, left)
    } else if is_title_line(right) && !is_title_line(left) {
        (left, right)
    } else {
        (left, right)
    };
    entry.company.get_or_insert_with(|| company.to_string());
    entry.position.get_or_insert_with(|| position.to_string());
    true
}

fn is_title_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    JOB_TITLE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

fn strip_date(line: &str) -> String {
    DATE_RANGE_RE
        .replace_all(line, "")
        .trim()
        .trim_matches(|c: char| "()[]|,-".contains(c))
        .trim()
        .to_string()
}

fn is_bullet(line: &str) -> bool {
    line.starts_with('-') || line.starts_with('•') || line.starts_with('*') || line.starts_with('·')
}

fn responsibility_line(line: &str) -> Option<String> {
    if line.is_empty() || date_range(line).is_some() {
        return None;
    }
    if is_bullet(line) {
        let stripped = line.trim_start_matches(['-', '•', '*', '·', ' ']).trim();
        return non_empty(stripped);
    }
    if line.len() > 10 {
        return Some(line.to_string());
    }
    None
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
    fn test_at_pattern_entry() {
        let text = "EXPERIENCE\nSoftware Engineer at TechCorp (2020-Present)\n- Developed web applications\n";
        let entries = extract_experience(text);
        assert_eq!(entries.len(), 1);
        let e = &entries[0];
        assert_eq!(e.position.as_deref(), Some("Software Engineer"));
        assert_eq!(e.company.as_deref(), Some("TechCorp"));
        assert_eq!(e.duration.as_deref(), Some("2020-Present"));
        assert_eq!(e.responsibilities, vec!["Developed web applications"]);
    }

    #[test]
    fn test_pipe_pattern_title_side_detected() {
        let text = "EXPERIENCE\nAcme Systems | Senior Data Analyst\n2018 - 2021\n- Modeled churn across accounts\n";
        let entries = extract_experience(text);
        assert_eq!(entries.len(), 1);
        let e = &entries[0];
        assert_eq!(e.company.as_deref(), Some("Acme Systems"));
        assert_eq!(e.position.as_deref(), Some("Senior Data Analyst"));
    }

    #[test]
    fn test_dash_pattern_defaults_first_part_company() {
        let text = "EXPERIENCE\nNorthwind - Platform Team\nJan 2019 to Dec 2020\n";
        let entries = extract_experience(text);
        assert_eq!(entries.len(), 1);
        let e = &entries[0];
        assert_eq!(e.company.as_deref(), Some("Northwind"));
        assert_eq!(e.position.as_deref(), Some("Platform Team"));
    }

    #[test]
    fn test_explicit_labels() {
        let text = "EXPERIENCE\nCompany: Initech\nJob Title: QA Engineer (2015-2017)\n";
        let entries = extract_experience(text);
        assert_eq!(entries.len(), 1);
        let e = &entries[0];
        assert_eq!(e.company.as_deref(), Some("Initech"));
        assert_eq!(e.position.as_deref(), Some("QA Engineer"));
    }

    #[test]
    fn test_nearby_title_line_fills_position() {
        let text = "EXPERIENCE\nGlobex\n2012 - 2014\nBackend Developer\nShipped the billing rewrite project\n";
        let entries = extract_experience(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].position.as_deref(), Some("Backend Developer"));
    }

    #[test]
    fn test_multiple_entries_in_scan_order() {
        let text = "EXPERIENCE\n\
            Software Engineer at TechCorp (2020-Present)\n\
            - Built APIs for the data platform\n\
            Junior Developer at StartupCo (2018-2020)\n\
            - Maintained the legacy monolith\n";
        let entries = extract_experience(text);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].company.as_deref(), Some("TechCorp"));
        assert_eq!(entries[1].company.as_deref(), Some("StartupCo"));
    }

    #[test]
    fn test_responsibilities_stop_at_next_section() {
        let text = "EXPERIENCE\nEngineer at Hooli (2019-2021)\n- Scaled the ingest tier\nEDUCATION\nStanford University\n";
        let entries = extract_experience(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].responsibilities, vec!["Scaled the ingest tier"]);
    }

    #[test]
    fn test_short_non_bullet_lines_skipped() {
        let text = "EXPERIENCE\nEngineer at Hooli (2019-2021)\nok\n- Real responsibility text\n";
        let entries = extract_experience(text);
        assert_eq!(entries[0].responsibilities, vec!["Real responsibility text"]);
    }

    #[test]
    fn test_entry_cap_at_ten() {
        let mut text = String::from("EXPERIENCE\n");
        for year in 2000..2014 {
            text.push_str(&format!("Engineer at Corp{year} ({year}-{})\n", year + 1));
        }
        let entries = extract_experience(&text);
        assert_eq!(entries.len(), 10);
    }

    #[test]
    fn test_no_section_falls_back_to_whole_text() {
        let text = "Jane worked as Staff Engineer at BigCo from 2016 to 2020\n";
        let entries = extract_experience(text);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].duration.as_deref().unwrap().contains("2016"));
    }

    #[test]
    fn test_no_dates_no_entries() {
        let text = "EXPERIENCE\nDid some things at some point\n";
        assert!(extract_experience(text).is_empty());
    }

    #[test]
    fn test_date_only_entry_still_recorded() {
        let text = "EXPERIENCE\n2020 - 2021\n";
        let entries = extract_experience(text);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].company.is_none());
        assert_eq!(entries[0].duration.as_deref(), Some("2020 - 2021"));
    }
}
