//! Normalization at session completion.
//!
//! The dialogue stores answers as the user gave them; this is the one
//! step that turns the collected strings into a typed record. It never
//! rejects: unparseable values fall back to the most conservative
//! canonical value for their field.

use crate::models::{
    DiaryRecord, HealthRecord, MedicationRecord, MoodRecord, Severity, SymptomRecord,
};

/// Answers that decline the notes follow-up. Compared trimmed and
/// case-insensitively; a decline stores no note, never the phrase.
pub const DECLINE_PHRASES: &[&str] = &["no", "none", "skip", "n/a", "not really", "no thanks"];

pub fn is_decline(answer: &str) -> bool {
    let normalized = answer.trim().to_lowercase();
    DECLINE_PHRASES.contains(&normalized.as_str())
}

/// Fallback mood rating when the answer holds no usable number.
const DEFAULT_RATING: i64 = 5;

/// Parse a 1..=10 rating out of a free-text answer ("7", "7/10",
/// "maybe an 8"). Out-of-range values clamp; no number means the
/// neutral midpoint.
fn parse_rating(answer: &str) -> i64 {
    let digits: String = answer
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits
        .parse::<i64>()
        .map(|n| n.clamp(1, 10))
        .unwrap_or(DEFAULT_RATING)
}

/// Split a comma-separated answer into trimmed, non-empty items.
fn parse_list(answer: &str) -> Vec<String> {
    answer
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

fn field<'a>(collected: &'a [(String, String)], name: &str) -> Option<&'a str> {
    collected
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn field_or_empty(collected: &[(String, String)], name: &str) -> String {
    field(collected, name).unwrap_or_default().to_string()
}

/// Build the typed record for a table from the collected fields.
///
/// Required fields are guaranteed present by the session state machine;
/// a missing one here still degrades to an empty string rather than a
/// panic. Unknown tables return None.
pub fn build_record(table: &str, collected: &[(String, String)]) -> Option<HealthRecord> {
    let notes = field(collected, "notes").map(String::from);

    match table {
        "symptoms" => Some(HealthRecord::Symptom(SymptomRecord {
            description: field_or_empty(collected, "description"),
            start_date: field_or_empty(collected, "start_date"),
            severity: Severity::from_input(field(collected, "severity").unwrap_or_default()),
            notes,
        })),
        "medications" => Some(HealthRecord::Medication(MedicationRecord {
            name: field_or_empty(collected, "name"),
            dosage: field_or_empty(collected, "dosage"),
            frequency: field_or_empty(collected, "frequency"),
            notes,
        })),
        "mood_entries" => Some(HealthRecord::Mood(MoodRecord {
            mood: field_or_empty(collected, "mood"),
            rating: parse_rating(field(collected, "rating").unwrap_or_default()),
            notes,
        })),
        "diary_entries" => Some(HealthRecord::Diary(DiaryRecord {
            title: field_or_empty(collected, "title"),
            content: field_or_empty(collected, "content"),
            tags: field(collected, "tags").map(parse_list).unwrap_or_default(),
            notes,
        })),
        _ => None,
    }
}
