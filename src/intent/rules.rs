//! Declarative intent rule table.
//!
//! Each intent carries an ordered list of lowercase phrases matched by
//! containment against the normalized utterance, plus trigger words that
//! earn the keyword bonus. Phrases for doctor/pharmacy/appointment
//! wording are interpolated from the regional vocabulary, so the same
//! rule recognizes "see my gp" in Australia and "see my pcp" in the US.
//!
//! Declaration order is a policy choice, not an accident: when two
//! intents tie on confidence, the earlier rule wins. Tests pin it.

use crate::intent::types::Intent;
use crate::vocabulary::{vocabulary_for, Region};

/// Generic action words that reinforce any data-entry phrasing.
pub const ACTION_KEYWORDS: &[&str] = &["record", "log", "add", "track"];

/// One intent's matching rule set.
#[derive(Debug, Clone)]
pub struct IntentRule {
    pub intent: Intent,
    /// Lowercase phrases, matched by containment. Longer matches score
    /// higher, so specific phrasings come first only for readability.
    pub phrases: Vec<String>,
    /// Intent-specific trigger words, same bonus as ACTION_KEYWORDS.
    pub triggers: &'static [&'static str],
    /// Route template surfaced to the UI alongside the match.
    pub route: &'static str,
}

/// Build the full rule table for a region (None = broadest vocabulary).
pub fn rules_for(region: Option<Region>) -> Vec<IntentRule> {
    let vocab = vocabulary_for(region);

    let mut appointment_phrases: Vec<String> = vec![
        "add an appointment".into(),
        "new appointment".into(),
        "book an appointment".into(),
        "schedule an appointment".into(),
    ];
    for term in vocab.doctor_terms {
        appointment_phrases.push(format!("see my {term}"));
        appointment_phrases.push(format!("seeing my {term}"));
        appointment_phrases.push(format!("appointment with my {term}"));
        appointment_phrases.push(format!("{term} appointment"));
    }
    for term in vocab.appointment_terms {
        appointment_phrases.push(format!("book a {term}"));
        appointment_phrases.push(format!("i have a {term}"));
    }

    let mut medication_phrases: Vec<String> = [
        "add a new medication",
        "add a medication",
        "record a medication",
        "new medication",
        "started taking",
        "i'm taking",
        "new prescription",
        "prescription",
        "medication",
    ]
    .into_iter()
    .map(String::from)
    .collect();
    for term in vocab.pharmacy_terms {
        medication_phrases.push(format!("picked up from the {term}"));
        medication_phrases.push(format!("filled at the {term}"));
    }

    vec![
        IntentRule {
            intent: Intent::AddSymptom,
            phrases: to_owned(&[
                "add a new symptom",
                "add a symptom",
                "record a symptom",
                "new symptom",
                "i'm not feeling well",
                "not feeling well",
                "i've been having",
                "i have a",
                "i feel",
                "symptom",
            ]),
            triggers: &["symptom", "pain", "ache", "hurts", "sore"],
            route: "/records/symptoms/new",
        },
        IntentRule {
            intent: Intent::AddMedication,
            phrases: medication_phrases,
            triggers: &["medication", "meds", "pill", "tablet", "dose", "taking", "prescribed"],
            route: "/records/medications/new",
        },
        IntentRule {
            intent: Intent::AddAppointment,
            phrases: appointment_phrases,
            triggers: &["appointment", "booked", "booking"],
            route: "/appointments/new",
        },
        IntentRule {
            intent: Intent::AddMood,
            phrases: to_owned(&[
                "record my mood",
                "log my mood",
                "track my mood",
                "how i'm feeling today",
                "feeling down",
                "feeling low",
                "i feel",
                "my mood",
                "mood",
            ]),
            triggers: &["mood", "feeling"],
            route: "/records/mood/new",
        },
        IntentRule {
            intent: Intent::AddSleep,
            phrases: to_owned(&[
                "log my sleep",
                "record my sleep",
                "track my sleep",
                "hours of sleep",
                "i slept",
                "slept",
                "sleep",
            ]),
            triggers: &["sleep", "slept", "nap"],
            route: "/records/sleep/new",
        },
        IntentRule {
            intent: Intent::AddNote,
            phrases: to_owned(&[
                "write in my diary",
                "new diary entry",
                "diary entry",
                "journal entry",
                "add a note",
                "write a note",
                "diary",
                "note",
            ]),
            triggers: &["note", "diary", "journal"],
            route: "/diary/new",
        },
        IntentRule {
            intent: Intent::QueryData,
            phrases: to_owned(&[
                "show me my",
                "show me",
                "show my",
                "list my",
                "what did i",
                "when did i",
                "how many",
                "my history",
                "my records",
            ]),
            triggers: &["show", "list", "history"],
            route: "/records",
        },
        IntentRule {
            intent: Intent::AnalyzeSymptoms,
            phrases: to_owned(&[
                "any patterns in my symptoms",
                "analyze my symptoms",
                "analyse my symptoms",
                "insights about my symptoms",
                "what's causing my symptoms",
            ]),
            triggers: &["pattern", "analyze", "analyse", "insight", "trend"],
            route: "/insights/symptoms",
        },
        IntentRule {
            intent: Intent::AnalyzeMedications,
            phrases: to_owned(&[
                "any patterns in my medications",
                "analyze my medications",
                "analyse my medications",
                "are my medications working",
                "insights about my medications",
            ]),
            triggers: &["pattern", "analyze", "analyse", "insight", "trend"],
            route: "/insights/medications",
        },
        IntentRule {
            intent: Intent::AnalyzeMood,
            phrases: to_owned(&[
                "any patterns in my mood",
                "analyze my mood",
                "analyse my mood",
                "mood trends",
                "insights about my mood",
            ]),
            triggers: &["pattern", "analyze", "analyse", "insight", "trend"],
            route: "/insights/mood",
        },
        IntentRule {
            intent: Intent::AnalyzeSleep,
            phrases: to_owned(&[
                "any patterns in my sleep",
                "analyze my sleep",
                "analyse my sleep",
                "sleep trends",
                "insights about my sleep",
            ]),
            triggers: &["pattern", "analyze", "analyse", "insight", "trend"],
            route: "/insights/sleep",
        },
    ]
}

fn to_owned(phrases: &[&str]) -> Vec<String> {
    phrases.iter().map(|p| (*p).to_string()).collect()
}
