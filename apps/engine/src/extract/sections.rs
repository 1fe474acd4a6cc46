//! Section Segmenter — splits résumé text into heading-delimited regions.
//!
//! A section runs from its first matching heading line up to (not including)
//! the next heading belonging to any *other* known section, or end of text.
//! Boundaries are determined purely by recognized heading tokens, never by
//! blank lines: two sections joined without a separator still split apart.

/// The known section vocabulary. Each kind carries a synonym heading set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Languages,
    Interests,
}

impl SectionKind {
    pub const ALL: &'static [SectionKind] = &[
        SectionKind::Summary,
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Skills,
        SectionKind::Projects,
        SectionKind::Certifications,
        SectionKind::Languages,
        SectionKind::Interests,
    ];

    /// Heading synonyms, uppercase. Matched case-insensitively against
    /// trimmed lines, with an optional trailing colon.
    pub fn synonyms(&self) -> &'static [&'static str] {
        match self {
            SectionKind::Summary => &[
                "PROFESSIONAL SUMMARY",
                "CAREER OBJECTIVE",
                "SUMMARY",
                "OBJECTIVE",
                "PROFILE",
                "ABOUT ME",
                "ABOUT",
            ],
            SectionKind::Experience => &[
                "WORK EXPERIENCE",
                "PROFESSIONAL EXPERIENCE",
                "EMPLOYMENT HISTORY",
                "WORK HISTORY",
                "CAREER HISTORY",
                "EXPERIENCE",
            ],
            SectionKind::Education => &[
                "EDUCATIONAL BACKGROUND",
                "ACADEMIC BACKGROUND",
                "EDUCATION",
                "ACADEMICS",
                "QUALIFICATIONS",
            ],
            SectionKind::Skills => &[
                "TECHNICAL SKILLS",
                "CORE COMPETENCIES",
                "SKILL SET",
                "SKILLS",
                "COMPETENCIES",
            ],
            SectionKind::Projects => &[
                "PERSONAL PROJECTS",
                "ACADEMIC PROJECTS",
                "KEY PROJECTS",
                "PROJECTS",
            ],
            SectionKind::Certifications => &[
                "CERTIFICATIONS",
                "CERTIFICATES",
                "LICENSES",
                "CREDENTIALS",
            ],
            SectionKind::Languages => &["LANGUAGES", "LANGUAGE PROFICIENCY", "SPOKEN LANGUAGES"],
            SectionKind::Interests => &["HOBBIES AND INTERESTS", "INTERESTS", "HOBBIES", "ACTIVITIES"],
        }
    }
}

/// Headings are short lines. Anything longer is prose that merely mentions
/// a section word ("10 years of experience in...").
const MAX_HEADING_LEN: usize = 48;

/// Returns the section kind this line is a heading for, if any.
///
/// A heading line is the synonym alone (any case, optional trailing colon),
/// or the synonym followed by a colon and inline content, which some résumés
/// use for one-line sections ("Skills: Java, Python").
pub fn heading_of(line: &str) -> Option<SectionKind> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.len() > MAX_HEADING_LEN {
        return None;
    }
    let upper = trimmed.to_uppercase();

    for kind in SectionKind::ALL {
        for syn in kind.synonyms() {
            if upper == *syn {
                return Some(*kind);
            }
            if let Some(rest) = upper.strip_prefix(syn) {
                let rest = rest.trim_start();
                if rest.is_empty() || rest.starts_with(':') {
                    return Some(*kind);
                }
            }
        }
    }
    None
}

/// True when the line is a heading of any known section.
pub fn is_section_heading(line: &str) -> bool {
    heading_of(line).is_some()
}

/// Slices the given section out of the full text, heading line included.
/// Returns `None` when no heading for `kind` exists; the caller decides
/// whether to fall back to scanning the whole document.
pub fn section_text(text: &str, kind: SectionKind) -> Option<&str> {
    let mut offset = 0usize;
    let mut start: Option<usize> = None;

    for line in text.split('\n') {
        let line_start = offset;
        offset += line.len() + 1;

        match heading_of(line) {
            Some(k) if start.is_none() => {
                if k == kind {
                    start = Some(line_start);
                }
            }
            Some(k) if k != kind => {
                // Next recognized heading of a different section ends ours.
                if let Some(s) = start {
                    return Some(&text[s..line_start]);
                }
            }
            _ => {}
        }
    }

    start.map(|s| &text[s..])
}

/// The section body without its heading line. When the heading carries
/// inline content after a colon, that content is kept as the first line.
pub fn section_body(text: &str, kind: SectionKind) -> Option<String> {
    let slice = section_text(text, kind)?;
    let mut lines = slice.split('\n');
    let heading = lines.next().unwrap_or("");
    let inline = heading.split_once(':').map(|(_, rest)| rest.trim()).unwrap_or("");

    let mut body = String::new();
    if !inline.is_empty() {
        body.push_str(inline);
        body.push('\n');
    }
    for line in lines {
        body.push_str(line);
        body.push('\n');
    }
    Some(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "John Doe\n\
        john@example.com\n\
        \n\
        EXPERIENCE\n\
        Software Engineer at TechCorp (2020-Present)\n\
        - Built things\n\
        EDUCATION\n\
        MIT, BSc Computer Science\n\
        SKILLS\n\
        Rust, Python\n";

    #[test]
    fn test_heading_of_exact() {
        assert_eq!(heading_of("EXPERIENCE"), Some(SectionKind::Experience));
        assert_eq!(heading_of("Work Experience"), Some(SectionKind::Experience));
        assert_eq!(heading_of("education:"), Some(SectionKind::Education));
    }

    #[test]
    fn test_heading_with_inline_content() {
        assert_eq!(heading_of("Skills: Java, Python"), Some(SectionKind::Skills));
    }

    #[test]
    fn test_prose_mentioning_section_word_is_not_heading() {
        assert_eq!(
            heading_of("I have 10 years of experience in building distributed systems"),
            None
        );
    }

    #[test]
    fn test_section_text_stops_at_next_heading() {
        let exp = section_text(SAMPLE, SectionKind::Experience).unwrap();
        assert!(exp.contains("TechCorp"));
        assert!(!exp.contains("MIT"));
    }

    #[test]
    fn test_section_boundary_without_blank_line() {
        // EDUCATION follows the experience bullet with no separator line.
        let exp = section_text(SAMPLE, SectionKind::Experience).unwrap();
        assert!(exp.contains("Built things"));
        assert!(!exp.contains("EDUCATION"));
    }

    #[test]
    fn test_last_section_runs_to_end() {
        let skills = section_text(SAMPLE, SectionKind::Skills).unwrap();
        assert!(skills.contains("Rust, Python"));
    }

    #[test]
    fn test_missing_section_is_none() {
        assert!(section_text(SAMPLE, SectionKind::Certifications).is_none());
    }

    #[test]
    fn test_duplicate_same_kind_heading_does_not_end_section() {
        let text = "EXPERIENCE\nfirst\nWORK EXPERIENCE\nsecond\nEDUCATION\nx\n";
        let exp = section_text(text, SectionKind::Experience).unwrap();
        assert!(exp.contains("first"));
        assert!(exp.contains("second"));
        assert!(!exp.contains("EDUCATION\nx"));
    }

    #[test]
    fn test_section_body_strips_heading_and_keeps_inline() {
        let text = "Skills: Java, Python\nDocker\nEDUCATION\nMIT\n";
        let body = section_body(text, SectionKind::Skills).unwrap();
        assert!(body.contains("Java, Python"));
        assert!(body.contains("Docker"));
        assert!(!body.to_uppercase().contains("EDUCATION"));
    }

    #[test]
    fn test_unknown_caps_line_does_not_end_section() {
        let text = "SKILLS\nRust\nAWARDS\nBest hacker\n";
        let skills = section_text(text, SectionKind::Skills).unwrap();
        // AWARDS is not in the known vocabulary, so it does not terminate.
        assert!(skills.contains("Best hacker"));
    }
}
