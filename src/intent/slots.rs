//! Intent-specific slot extraction.
//!
//! Runs only on the winning intent(s) after ranking. Every sub-pattern
//! is opportunistic: a miss omits the slot, it is never an error. Input
//! is the already-normalized (trimmed, lowercased) utterance.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::types::Intent;

static SEVERITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(mild|moderate|severe|slight|intense|terrible|unbearable)\b").unwrap()
});

static ONSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:since|starting|from)\s+([a-z0-9' ]+?)(?:[,.!?]|$)").unwrap()
});

static DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bfor\s+(?:the\s+(?:last|past)\s+)?((?:\d+|a few|several)\s+(?:day|week|hour|month)s?)\b")
        .unwrap()
});

static DOSAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d+(?:\.\d+)?\s?(?:mg|mcg|g|ml|iu|units?))\b").unwrap()
});

static FREQUENCY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b((?:once|twice|three times|four times|\d+ times)(?: (?:a|per) day| daily)?|every \d+ hours?|daily|nightly|weekly|as needed)\b",
    )
    .unwrap()
});

static MED_NAME_AFTER_DOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d+(?:\.\d+)?\s?(?:mg|mcg|g|ml)\s+([a-z][a-z-]{2,})\b").unwrap()
});

static MED_NAME_AFTER_VERB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:started taking|started|taking|take)\s+([a-z][a-z-]{2,})\b").unwrap()
});

static MOOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(happy|sad|anxious|stressed|calm|angry|tired|exhausted|great|terrible|okay|low|down|flat|content|irritable)\b",
    )
    .unwrap()
});

static RATING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([1-9]|10)\s*(?:/\s*10|out of (?:10|ten))\b").unwrap()
});

static SLEEP_HOURS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d+(?:\.\d+)?)\s*(?:hours?|hrs?)\b").unwrap()
});

/// Words the medication-name patterns must not mistake for a name.
const NAME_STOPWORDS: &[&str] = &["the", "some", "more", "another", "new"];

/// Extract the structured slots this intent knows how to read.
pub fn extract_slots(intent: Intent, normalized: &str) -> HashMap<String, String> {
    let mut slots = HashMap::new();

    match intent {
        Intent::AddSymptom => {
            capture_into(&SEVERITY, normalized, "severity", &mut slots);
            capture_into(&ONSET, normalized, "onset", &mut slots);
            capture_into(&DURATION, normalized, "duration", &mut slots);
        }
        Intent::AddMedication => {
            capture_into(&DOSAGE, normalized, "dosage", &mut slots);
            capture_into(&FREQUENCY, normalized, "frequency", &mut slots);
            if let Some(name) = medication_name(normalized) {
                slots.insert("name".to_string(), name);
            }
        }
        Intent::AddMood => {
            capture_into(&MOOD, normalized, "mood", &mut slots);
            capture_into(&RATING, normalized, "rating", &mut slots);
        }
        Intent::AddSleep => {
            capture_into(&SLEEP_HOURS, normalized, "hours", &mut slots);
        }
        _ => {}
    }

    slots
}

fn capture_into(pattern: &Regex, text: &str, slot: &str, slots: &mut HashMap<String, String>) {
    if let Some(caps) = pattern.captures(text) {
        if let Some(value) = caps.get(1) {
            slots.insert(slot.to_string(), value.as_str().trim().to_string());
        }
    }
}

/// Medication name: prefer the word right after the dose ("500mg
/// metformin"), then after a taking verb, skipping obvious non-names.
fn medication_name(text: &str) -> Option<String> {
    if let Some(caps) = MED_NAME_AFTER_DOSE.captures(text) {
        let name = caps.get(1)?.as_str();
        if !NAME_STOPWORDS.contains(&name) {
            return Some(name.to_string());
        }
    }
    if let Some(caps) = MED_NAME_AFTER_VERB.captures(text) {
        let name = caps.get(1)?.as_str();
        if !NAME_STOPWORDS.contains(&name) {
            return Some(name.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symptom_severity_and_onset() {
        let slots = extract_slots(
            Intent::AddSymptom,
            "add a new symptom, severe headache since this morning",
        );
        assert_eq!(slots.get("severity").map(String::as_str), Some("severe"));
        assert_eq!(slots.get("onset").map(String::as_str), Some("this morning"));
    }

    #[test]
    fn symptom_duration_phrase() {
        let slots = extract_slots(Intent::AddSymptom, "i've had mild back pain for 3 days");
        assert_eq!(slots.get("severity").map(String::as_str), Some("mild"));
        assert_eq!(slots.get("duration").map(String::as_str), Some("3 days"));
    }

    #[test]
    fn medication_dosage_frequency_and_name() {
        let slots = extract_slots(
            Intent::AddMedication,
            "started taking 500mg metformin twice daily",
        );
        assert_eq!(slots.get("dosage").map(String::as_str), Some("500mg"));
        assert_eq!(slots.get("frequency").map(String::as_str), Some("twice daily"));
        assert_eq!(slots.get("name").map(String::as_str), Some("metformin"));
    }

    #[test]
    fn medication_name_after_verb() {
        let slots = extract_slots(Intent::AddMedication, "i'm taking ibuprofen as needed");
        assert_eq!(slots.get("name").map(String::as_str), Some("ibuprofen"));
        assert_eq!(slots.get("frequency").map(String::as_str), Some("as needed"));
    }

    #[test]
    fn mood_adjective_and_rating() {
        let slots = extract_slots(Intent::AddMood, "feeling anxious today, maybe 4 out of 10");
        assert_eq!(slots.get("mood").map(String::as_str), Some("anxious"));
        assert_eq!(slots.get("rating").map(String::as_str), Some("4"));
    }

    #[test]
    fn mood_rating_slash_form() {
        let slots = extract_slots(Intent::AddMood, "pretty happy, 8/10");
        assert_eq!(slots.get("rating").map(String::as_str), Some("8"));
    }

    #[test]
    fn sleep_hours() {
        let slots = extract_slots(Intent::AddSleep, "i slept 7.5 hours last night");
        assert_eq!(slots.get("hours").map(String::as_str), Some("7.5"));
    }

    #[test]
    fn missing_subpatterns_omit_slots() {
        let slots = extract_slots(Intent::AddSymptom, "add a symptom");
        assert!(slots.is_empty());
    }

    #[test]
    fn non_entry_intents_extract_nothing() {
        assert!(extract_slots(Intent::QueryData, "show me severe symptoms").is_empty());
        assert!(extract_slots(Intent::Unknown, "500mg twice daily").is_empty());
    }
}
