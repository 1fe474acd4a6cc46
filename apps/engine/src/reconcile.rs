//! Reconciliation of oracle output with heuristic extraction.
//!
//! The oracle is higher-fidelity but occasionally emits boilerplate
//! placeholders ("unknown", "n/a") that must not clobber a positive
//! heuristic finding, so an oracle value only wins when it is *meaningful*.
//! Oracle JSON is handled as a raw `Value`: unknown keys are ignored,
//! missing keys are non-meaningful, malformed sub-objects are skipped.

use serde_json::Value;

use crate::extract::contact::{is_valid_email, phone_digit_count};
use crate::models::profile::{
    Certification, EducationEntry, ExperienceEntry, ExtractedProfile, LanguageSkill, Project,
};

/// How aggressively oracle values override heuristics. The two historical
/// parser variants disagreed on contact fields; the flag makes the choice
/// explicit per pipeline. `Lenient` is the default: any meaningful oracle
/// value wins. `Strict` additionally requires oracle emails to pass format
/// validation and oracle phones to carry at least 10 digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strictness {
    #[default]
    Lenient,
    Strict,
}

/// Boilerplate strings the oracle emits when it has nothing.
const BOILERPLATE: &[&str] = &[
    "null",
    "unknown",
    "n/a",
    "not provided",
    "undefined",
    "string",
    "none",
];

/// The merge-worthiness predicate: non-null, non-blank, non-boilerplate
/// strings; non-empty lists; objects with at least one key.
pub fn is_meaningful(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => is_meaningful_str(s),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

fn is_meaningful_str(s: &str) -> bool {
    let trimmed = s.trim();
    !trimmed.is_empty() && !BOILERPLATE.contains(&trimmed.to_lowercase().as_str())
}

/// Merges oracle output over a heuristic base profile.
pub fn merge(heuristic: ExtractedProfile, ai: &Value, strictness: Strictness) -> ExtractedProfile {
    let mut merged = heuristic;
    let ai = match ai.as_object() {
        Some(map) => map,
        None => return merged,
    };

    merge_string(&mut merged.name, ai.get("name"));
    merge_contact_email(&mut merged.email, ai.get("email"), strictness);
    merge_contact_phone(&mut merged.phone, ai.get("phone"), strictness);
    merge_string(&mut merged.address, ai.get("address"));
    merge_string(&mut merged.summary, ai.get("summary"));

    // Skills sub-values reconcile independently: the oracle may know the
    // technical stack while having nothing on soft skills, or vice versa.
    if let Some(skills) = ai.get("skills").and_then(Value::as_object) {
        if let Some(technical) = skills.get("technical").filter(|v| is_meaningful(v)) {
            merged.skills.technical = string_list(technical);
        }
        if let Some(soft) = skills.get("soft").filter(|v| is_meaningful(v)) {
            merged.skills.soft = string_list(soft);
        }
    }

    merge_entries::<ExperienceEntry>(&mut merged.experience, ai.get("experience"));
    merge_entries::<EducationEntry>(&mut merged.education, ai.get("education"));
    merge_entries::<Project>(&mut merged.projects, ai.get("projects"));
    merge_entries::<Certification>(&mut merged.certifications, ai.get("certifications"));
    merge_entries::<LanguageSkill>(&mut merged.languages, ai.get("languages"));

    if let Some(interests) = ai.get("interests").filter(|v| is_meaningful(v)) {
        let list = string_list(interests);
        if !list.is_empty() {
            merged.interests = list;
        }
    }

    merged
}

fn merge_string(slot: &mut Option<String>, ai_value: Option<&Value>) {
    if let Some(Value::String(s)) = ai_value {
        if is_meaningful_str(s) {
            *slot = Some(s.trim().to_string());
        }
    }
}

fn merge_contact_email(slot: &mut Option<String>, ai_value: Option<&Value>, strictness: Strictness) {
    if let Some(Value::String(s)) = ai_value {
        let candidate = s.trim();
        if !is_meaningful_str(candidate) {
            return;
        }
        if strictness == Strictness::Strict && !is_valid_email(candidate) {
            return;
        }
        *slot = Some(candidate.to_string());
    }
}

fn merge_contact_phone(slot: &mut Option<String>, ai_value: Option<&Value>, strictness: Strictness) {
    if let Some(Value::String(s)) = ai_value {
        let candidate = s.trim();
        if !is_meaningful_str(candidate) {
            return;
        }
        if strictness == Strictness::Strict && phone_digit_count(candidate) < 10 {
            return;
        }
        *slot = Some(candidate.to_string());
    }
}

/// Replaces a typed entry list with the oracle's when the oracle list is
/// meaningful. Elements that fail to deserialize are dropped individually;
/// if none survive, the heuristic list stands.
fn merge_entries<T: serde::de::DeserializeOwned>(slot: &mut Vec<T>, ai_value: Option<&Value>) {
    let items = match ai_value {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => return,
    };
    let parsed: Vec<T> = items
        .iter()
        .filter(|v| is_meaningful(v))
        .filter_map(|v| serde_json::from_value(v.clone()).ok())
        .collect();
    if !parsed.is_empty() {
        *slot = parsed;
    }
}

fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .filter(|s| is_meaningful_str(s))
            .map(|s| s.trim().to_string())
            .collect(),
        Value::String(s) if is_meaningful_str(s) => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn heuristic_base() -> ExtractedProfile {
        ExtractedProfile {
            name: Some("Heuristic Name".to_string()),
            email: Some("heuristic@example.com".to_string()),
            phone: Some("111-222-3333".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_meaningful_ai_value_wins() {
        let ai = json!({"name": "Oracle Name"});
        let merged = merge(heuristic_base(), &ai, Strictness::Lenient);
        assert_eq!(merged.name.as_deref(), Some("Oracle Name"));
    }

    #[test]
    fn test_boilerplate_does_not_clobber() {
        for placeholder in ["", "  ", "null", "Unknown", "N/A", "not provided", "NONE"] {
            let ai = json!({ "name": placeholder });
            let merged = merge(heuristic_base(), &ai, Strictness::Lenient);
            assert_eq!(
                merged.name.as_deref(),
                Some("Heuristic Name"),
                "placeholder {placeholder:?} must not win"
            );
        }
    }

    #[test]
    fn test_missing_key_keeps_heuristic() {
        let ai = json!({});
        let merged = merge(heuristic_base(), &ai, Strictness::Lenient);
        assert_eq!(merged.email.as_deref(), Some("heuristic@example.com"));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let ai = json!({"hallucinated_field": {"deep": true}, "name": "Oracle Name"});
        let merged = merge(heuristic_base(), &ai, Strictness::Lenient);
        assert_eq!(merged.name.as_deref(), Some("Oracle Name"));
    }

    #[test]
    fn test_lenient_accepts_unvalidated_email() {
        let ai = json!({"email": "not-an-email"});
        let merged = merge(heuristic_base(), &ai, Strictness::Lenient);
        assert_eq!(merged.email.as_deref(), Some("not-an-email"));
    }

    #[test]
    fn test_strict_rejects_invalid_email() {
        let ai = json!({"email": "not-an-email"});
        let merged = merge(heuristic_base(), &ai, Strictness::Strict);
        assert_eq!(merged.email.as_deref(), Some("heuristic@example.com"));
    }

    #[test]
    fn test_strict_accepts_valid_email() {
        let ai = json!({"email": "oracle@domain.com"});
        let merged = merge(heuristic_base(), &ai, Strictness::Strict);
        assert_eq!(merged.email.as_deref(), Some("oracle@domain.com"));
    }

    #[test]
    fn test_strict_rejects_short_phone() {
        let ai = json!({"phone": "555-1234"});
        let merged = merge(heuristic_base(), &ai, Strictness::Strict);
        assert_eq!(merged.phone.as_deref(), Some("111-222-3333"));
    }

    #[test]
    fn test_skills_sub_values_merge_independently() {
        let mut base = heuristic_base();
        base.skills.technical = vec!["Rust".to_string()];
        base.skills.soft = vec!["Teamwork".to_string()];

        let ai = json!({"skills": {"technical": ["Python", "SQL"], "soft": []}});
        let merged = merge(base, &ai, Strictness::Lenient);
        assert_eq!(merged.skills.technical, vec!["Python", "SQL"]);
        // Empty soft list is not meaningful; heuristic survives.
        assert_eq!(merged.skills.soft, vec!["Teamwork"]);
    }

    #[test]
    fn test_experience_list_overrides_when_meaningful() {
        let mut base = heuristic_base();
        base.experience = vec![ExperienceEntry {
            company: Some("OldCo".to_string()),
            ..Default::default()
        }];

        let ai = json!({"experience": [
            {"company": "NewCo", "position": "Engineer", "responsibilities": ["shipped"]}
        ]});
        let merged = merge(base, &ai, Strictness::Lenient);
        assert_eq!(merged.experience.len(), 1);
        assert_eq!(merged.experience[0].company.as_deref(), Some("NewCo"));
    }

    #[test]
    fn test_malformed_entries_dropped_individually() {
        let mut base = heuristic_base();
        base.experience = vec![ExperienceEntry::default()];

        let ai = json!({"experience": [
            "just a string",
            {"company": "RealCo"}
        ]});
        let merged = merge(base, &ai, Strictness::Lenient);
        assert_eq!(merged.experience.len(), 1);
        assert_eq!(merged.experience[0].company.as_deref(), Some("RealCo"));
    }

    #[test]
    fn test_non_object_oracle_payload_is_noop() {
        let merged = merge(heuristic_base(), &json!("prose, not an object"), Strictness::Lenient);
        assert_eq!(merged.name.as_deref(), Some("Heuristic Name"));
    }

    #[test]
    fn test_merge_precedence_property() {
        // For every scalar field: ai wins iff meaningful.
        let ai = json!({
            "name": "A", "email": "a@b.co", "phone": "1234567890",
            "address": "unknown", "summary": "Did things."
        });
        let base = ExtractedProfile {
            name: Some("H".to_string()),
            address: Some("H addr".to_string()),
            ..Default::default()
        };
        let merged = merge(base, &ai, Strictness::Lenient);
        assert_eq!(merged.name.as_deref(), Some("A"));
        assert_eq!(merged.email.as_deref(), Some("a@b.co"));
        assert_eq!(merged.phone.as_deref(), Some("1234567890"));
        assert_eq!(merged.address.as_deref(), Some("H addr"));
        assert_eq!(merged.summary.as_deref(), Some("Did things."));
    }
}
